//! # Moles ⇄ grams ⇄ particles
//!
//! Given a formula (for its molar mass M) and one known quantity, the other two follow from
//! `grams = moles × M` and `particles = moles × N_A`.
//! Moles and grams are rounded to 6 decimals; particle counts are kept at full precision
//! because they are shown in scientific notation.
use crate::Stoichiometry::errors::{ChemError, ConversionError};
use crate::Stoichiometry::molmass::calculate_molar_mass;
use crate::Stoichiometry::periodic_table::PeriodicTable;
use crate::Utils::numeric::{format_scientific, round_to};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Avogadro constant, 1/mol (CODATA 2018, exact)
pub const AVOGADRO: f64 = 6.02214076e23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Moles,
    Grams,
    Particles,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Moles => "moles",
            Unit::Grams => "grams",
            Unit::Particles => "particles",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moles" | "mol" | "mole" => Ok(Unit::Moles),
            "grams" | "g" | "gram" => Ok(Unit::Grams),
            "particles" | "particle" => Ok(Unit::Particles),
            other => Err(ConversionError::UnknownUnit(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub moles: f64,
    pub grams: f64,
    pub particles: f64,
    pub molar_mass: f64,
    /// normalized formula
    pub formula: String,
}

impl ConversionResult {
    pub fn pretty_print(&self) {
        println!("{} (M = {:.4} g/mol)", self.formula, self.molar_mass);
        println!("  moles:     {}", format_scientific(self.moles, 6));
        println!("  grams:     {}", format_scientific(self.grams, 6));
        println!("  particles: {}", format_scientific(self.particles, 4));
    }
}

pub fn moles_to_grams(moles: f64, molar_mass: f64) -> f64 {
    round_to(moles * molar_mass, 6)
}

/// 0 for a zero molar mass
pub fn grams_to_moles(grams: f64, molar_mass: f64) -> f64 {
    if molar_mass == 0.0 {
        return 0.0;
    }
    round_to(grams / molar_mass, 6)
}

pub fn moles_to_particles(moles: f64) -> f64 {
    moles * AVOGADRO
}

pub fn particles_to_moles(particles: f64) -> f64 {
    particles / AVOGADRO
}

/// Converts `value` expressed in `from` into all three units for the compound `formula`.
///
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// use StoichCalc::Stoichiometry::unit_converter::{Unit, convert_units};
/// let table = PeriodicTable::embedded().unwrap();
/// let result = convert_units("H2O", 36.03, Unit::Grams, &table).unwrap();
/// assert!((result.moles - 2.0).abs() < 1e-3);
/// ```
pub fn convert_units(
    formula: &str,
    value: f64,
    from: Unit,
    table: &PeriodicTable,
) -> Result<ConversionResult, ChemError> {
    let molar_mass = calculate_molar_mass(formula, table)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConversionError::InvalidValue(value).into());
    }
    let m = molar_mass.total_mass;
    let (moles, grams, particles) = match from {
        Unit::Moles => (value, moles_to_grams(value, m), moles_to_particles(value)),
        Unit::Grams => {
            let moles = grams_to_moles(value, m);
            (moles, value, moles_to_particles(moles))
        }
        Unit::Particles => {
            let moles = particles_to_moles(value);
            (moles, moles_to_grams(moles, m), value)
        }
    };
    Ok(ConversionResult {
        moles: round_to(moles, 6),
        grams: round_to(grams, 6),
        particles,
        molar_mass: m,
        formula: molar_mass.formula_normalized,
    })
}

/// Parses a user-typed quantity. Everything except digits, '.', 'e' and 'E' is dropped
/// (so a minus sign cannot sneak in) and only the first decimal point is kept.
/// Empty or unparsable text gives `None`.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let sanitized: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E'))
        .collect();
    let mut parts = sanitized.splitn(2, '.');
    let head = parts.next().unwrap_or_default();
    let sanitized = match parts.next() {
        Some(tail) => format!("{}.{}", head, tail.replace('.', "")),
        None => head.to_string(),
    };
    if sanitized.is_empty() {
        return None;
    }
    sanitized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
