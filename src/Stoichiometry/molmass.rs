//! Module to calculate the atomic composition and molar mass of a chemical formula
//!
//! The molar mass is the sum of atomic mass × number of atoms over all elements of the
//! parsed formula. The total is rounded to 4 decimals, per-element subtotals keep full precision.
use crate::Stoichiometry::errors::ChemError;
use crate::Stoichiometry::formula_parser::parse_formula;
use crate::Stoichiometry::periodic_table::PeriodicTable;
use crate::Utils::numeric::round_to;
use log::info;
use prettytable::{Table, row};
use serde::Serialize;

/// contribution of one element to the molar mass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementBreakdown {
    pub symbol: String,
    pub name: String,
    pub count: u32,
    pub atomic_mass: f64,
    /// atomic_mass × count, not rounded
    pub subtotal: f64,
    /// "#RRGGBB"
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MolarMassResult {
    pub formula: String,
    pub formula_normalized: String,
    /// g/mol, 4 decimals
    pub total_mass: f64,
    /// one row per element, ascending atomic number
    pub breakdown: Vec<ElementBreakdown>,
}

impl MolarMassResult {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Element", "Name", "Atoms", "Atomic mass", "Subtotal, g/mol"]);
        for b in &self.breakdown {
            table.add_row(row![
                b.symbol,
                b.name,
                b.count,
                format!("{:.4}", b.atomic_mass),
                format!("{:.3}", b.subtotal)
            ]);
        }
        table.add_row(row!["Total", "", "", "", format!("{:.4}", self.total_mass)]);
        println!("Molar mass of {}", self.formula_normalized);
        table.printstd();
    }
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(
    formula: &str,
    table: &PeriodicTable,
) -> Result<MolarMassResult, ChemError> {
    let parsed = parse_formula(formula, table)?;
    let mut breakdown = Vec::with_capacity(parsed.elements.len());
    let mut molar_mass = 0.0;
    for element_count in &parsed.elements {
        // parse_formula only keeps symbols found in the same table
        let Some(element) = table.lookup(&element_count.symbol) else {
            continue;
        };
        let subtotal = element.atomic_mass * element_count.count as f64;
        molar_mass += subtotal;
        breakdown.push(ElementBreakdown {
            symbol: element.symbol.clone(),
            name: element.name.clone(),
            count: element_count.count,
            atomic_mass: element.atomic_mass,
            subtotal,
            color: element.color(),
        });
    }
    let total_mass = round_to(molar_mass, 4);
    info!("molar mass of {}: {} g/mol", parsed.normalized, total_mass);
    Ok(MolarMassResult {
        formula: parsed.original,
        formula_normalized: parsed.normalized,
        total_mass,
        breakdown,
    })
}
