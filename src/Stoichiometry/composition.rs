//! Mass percent composition: the share of each element in the molar mass of a compound,
//! largest contributor first.
use crate::Stoichiometry::errors::ChemError;
use crate::Stoichiometry::molmass::calculate_molar_mass;
use crate::Stoichiometry::periodic_table::PeriodicTable;
use crate::Utils::numeric::round_to;
use prettytable::{Table, row};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionElement {
    pub symbol: String,
    pub name: String,
    pub count: u32,
    /// g/mol contributed by this element
    pub mass_contribution: f64,
    /// mass percent, 2 decimals
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionResult {
    /// normalized formula
    pub formula: String,
    pub total_mass: f64,
    /// sorted by percentage, descending
    pub elements: Vec<CompositionElement>,
}

impl CompositionResult {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Element", "Name", "Atoms", "Mass, g/mol", "Mass %"]);
        for e in &self.elements {
            table.add_row(row![
                e.symbol,
                e.name,
                e.count,
                format!("{:.3}", e.mass_contribution),
                format!("{:.2}", e.percentage)
            ]);
        }
        println!(
            "Composition of {} (M = {:.4} g/mol)",
            self.formula, self.total_mass
        );
        table.printstd();
    }
}

pub fn calculate_composition(
    formula: &str,
    table: &PeriodicTable,
) -> Result<CompositionResult, ChemError> {
    let molar_mass = calculate_molar_mass(formula, table)?;
    let total_mass = molar_mass.total_mass;
    let mut elements: Vec<CompositionElement> = molar_mass
        .breakdown
        .into_iter()
        .map(|b| CompositionElement {
            percentage: round_to(b.subtotal / total_mass * 100.0, 2),
            symbol: b.symbol,
            name: b.name,
            count: b.count,
            mass_contribution: b.subtotal,
            color: b.color,
        })
        .collect();
    // stable: equal percentages keep atomic number order
    elements.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    Ok(CompositionResult {
        formula: molar_mass.formula_normalized,
        total_mass,
        elements,
    })
}
