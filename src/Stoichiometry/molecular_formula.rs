//! Molecular formula from an empirical formula and an experimentally measured molar mass.
//! The molecular formula is the empirical one times n = experimental mass / empirical mass,
//! accepted only when n is within 0.05 of a whole number not smaller than 1.
use crate::Stoichiometry::errors::{ChemError, MassSuggestion, MolecularError};
use crate::Stoichiometry::formula_parser::{
    ElementCount, build_formula_string, format_with_subscripts, parse_formula,
};
use crate::Stoichiometry::molmass::calculate_molar_mass;
use crate::Stoichiometry::periodic_table::PeriodicTable;
use crate::Utils::numeric::round_to_count;
use log::info;
use serde::Serialize;

const MIN_RAW_MULTIPLIER: f64 = 0.95;
const MULTIPLIER_TOLERANCE: f64 = 0.05;
const SUGGESTIONS_BELOW_EMPIRICAL: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MolecularResult {
    /// normalized empirical formula
    pub empirical_formula: String,
    pub molecular_formula: String,
    pub molecular_formula_formatted: String,
    pub empirical_mass: f64,
    pub experimental_mass: f64,
    /// whole number of empirical units in one molecule, at least 1
    pub multiplier: u32,
}

impl MolecularResult {
    pub fn pretty_print(&self) {
        println!(
            "n = {} ÷ {:.2} ≈ {}",
            self.experimental_mass, self.empirical_mass, self.multiplier
        );
        println!(
            "({}){} = {}",
            self.empirical_formula, self.multiplier, self.molecular_formula_formatted
        );
    }
}

fn suggestion(multiplier: u32, empirical_mass: f64) -> MassSuggestion {
    MassSuggestion {
        multiplier,
        mass: empirical_mass * multiplier as f64,
    }
}

/// Scales `empirical_formula` to the molecule whose molar mass is `experimental_mass`.
///
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::molecular_formula::calculate_molecular_formula;
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// let table = PeriodicTable::embedded().unwrap();
/// let glucose = calculate_molecular_formula("CH2O", 180.0, &table).unwrap();
/// assert_eq!(glucose.multiplier, 6);
/// assert_eq!(glucose.molecular_formula, "H12C6O6");
/// ```
pub fn calculate_molecular_formula(
    empirical_formula: &str,
    experimental_mass: f64,
    table: &PeriodicTable,
) -> Result<MolecularResult, ChemError> {
    let empirical = calculate_molar_mass(empirical_formula, table)?;
    if !(experimental_mass.is_finite() && experimental_mass > 0.0) {
        return Err(MolecularError::InvalidExperimentalMass(experimental_mass).into());
    }
    let empirical_mass = empirical.total_mass;
    let raw_multiplier = experimental_mass / empirical_mass;

    if raw_multiplier < MIN_RAW_MULTIPLIER {
        return Err(MolecularError::MassBelowEmpirical {
            experimental_mass,
            empirical_mass,
            suggestions: (1..=SUGGESTIONS_BELOW_EMPIRICAL)
                .map(|n| suggestion(n, empirical_mass))
                .collect(),
        }
        .into());
    }

    let Some(multiplier) = round_to_count(raw_multiplier) else {
        return Err(MolecularError::MultiplierOverflow(raw_multiplier).into());
    };
    let rounded = raw_multiplier.round();
    if (raw_multiplier - rounded).abs() > MULTIPLIER_TOLERANCE {
        return Err(MolecularError::NonIntegerMultiplier {
            experimental_mass,
            empirical_mass,
            raw_multiplier,
            lower: suggestion(raw_multiplier.floor() as u32, empirical_mass),
            upper: suggestion(raw_multiplier.ceil() as u32, empirical_mass),
        }
        .into());
    }
    // raw >= 0.95 rounds to at least 1
    let multiplier = multiplier.max(1);

    let parsed = parse_formula(empirical_formula, table)?;
    let molecular = parsed
        .elements
        .iter()
        .map(|e| {
            e.count
                .checked_mul(multiplier)
                .map(|count| ElementCount::new(&e.symbol, count))
                .ok_or_else(|| MolecularError::CountOverflow(e.symbol.clone()))
        })
        .collect::<Result<Vec<ElementCount>, MolecularError>>()?;
    let molecular_formula = build_formula_string(&molecular);
    info!(
        "molecular formula for {} at {} g/mol: {} (n = {})",
        empirical.formula_normalized, experimental_mass, molecular_formula, multiplier
    );
    Ok(MolecularResult {
        empirical_formula: empirical.formula_normalized,
        molecular_formula_formatted: format_with_subscripts(&molecular_formula),
        molecular_formula,
        empirical_mass,
        experimental_mass,
        multiplier,
    })
}
