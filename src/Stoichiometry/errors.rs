//! # Error types of the stoichiometry engine
//!
//! Every calculator reports failures as values. The `Display` text of each variant is the
//! message a front-end shows to the user, so variants carry the offending symbol or the
//! computed numbers that explain the failure.
use thiserror::Error;

/// errors produced while turning a formula string into element counts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("enter a chemical formula")]
    Empty,
    #[error("formula contains invalid characters")]
    InvalidCharacters,
    #[error("empty or invalid formula")]
    NoTokens,
    #[error("element \"{0}\" does not exist in the periodic table")]
    UnknownElement(String),
    #[error("unmatched closing parenthesis")]
    UnmatchedClose,
    #[error("unclosed parenthesis")]
    Unclosed,
    #[error("atom count of \"{0}\" is too large")]
    CountOverflow(String),
}

/// errors produced while loading or validating a periodic table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read periodic table file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to deserialize periodic table: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("periodic table contains no elements")]
    EmptyTable,
    #[error("duplicate atomic number {0} in periodic table")]
    DuplicateNumber(u32),
    #[error("duplicate element symbol \"{0}\" in periodic table")]
    DuplicateSymbol(String),
    #[error("element \"{symbol}\" has invalid atomic mass {mass}")]
    InvalidMass { symbol: String, mass: f64 },
    #[error("element \"{symbol}\" has invalid color \"{color}\"")]
    InvalidColor { symbol: String, color: String },
}

/// errors of moles/grams/particles conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("value {0} must be a finite non-negative number")]
    InvalidValue(f64),
    #[error("unknown unit \"{0}\", expected moles, grams or particles")]
    UnknownUnit(String),
}

/// errors of empirical formula derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmpiricalError {
    #[error("at least 2 elements required")]
    TooFewElements,
    #[error("percentages sum to {0:.1}%, should sum to ~100%")]
    BadPercentageSum(f64),
    #[error("element \"{0}\" not valid")]
    InvalidElement(String),
    #[error("percentage for {0} must be positive")]
    NonPositivePercentage(String),
    #[error("atom count of \"{0}\" is too large")]
    CountOverflow(String),
}

/// one suggested experimental mass: `multiplier` copies of the empirical formula weigh `mass`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassSuggestion {
    pub multiplier: u32,
    pub mass: f64,
}

impl std::fmt::Display for MassSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.2} g/mol (n={})", self.mass, self.multiplier)
    }
}

fn join_suggestions(suggestions: &[MassSuggestion]) -> String {
    suggestions
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// errors of empirical -> molecular formula scaling
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MolecularError {
    #[error("experimental molar mass {0} must be a positive number")]
    InvalidExperimentalMass(f64),
    #[error("multiplier n = {0:.0} is too large")]
    MultiplierOverflow(f64),
    #[error("atom count of \"{0}\" is too large")]
    CountOverflow(String),
    #[error(
        "experimental molar mass ({experimental_mass} g/mol) is smaller than the empirical formula mass ({empirical_mass:.2} g/mol); the molecular formula cannot be smaller than the empirical formula. Valid masses: {}",
        join_suggestions(.suggestions)
    )]
    MassBelowEmpirical {
        experimental_mass: f64,
        empirical_mass: f64,
        suggestions: Vec<MassSuggestion>,
    },
    #[error(
        "multiplier n = {experimental_mass} ÷ {empirical_mass:.2} = {raw_multiplier:.2} is not a whole number. Nearest valid masses: {lower}, {upper}"
    )]
    NonIntegerMultiplier {
        experimental_mass: f64,
        empirical_mass: f64,
        raw_multiplier: f64,
        lower: MassSuggestion,
        upper: MassSuggestion,
    },
}

/// umbrella error returned by the calculators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChemError {
    #[error(transparent)]
    Formula(#[from] FormulaError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Empirical(#[from] EmpiricalError),
    #[error(transparent)]
    Molecular(#[from] MolecularError),
}

impl ChemError {
    /// true for mistakes in the formula text itself (as opposed to domain errors found after parsing)
    pub fn is_input_error(&self) -> bool {
        matches!(self, ChemError::Formula(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_error_messages_name_the_symbol() {
        let e = FormulaError::UnknownElement("Xy".to_string());
        assert_eq!(
            e.to_string(),
            "element \"Xy\" does not exist in the periodic table"
        );
        let chem: ChemError = e.into();
        assert!(chem.is_input_error());
        assert!(chem.to_string().contains("Xy"));
    }

    #[test]
    fn percentage_sum_is_reported_with_one_decimal() {
        let e = EmpiricalError::BadPercentageSum(80.04);
        assert_eq!(e.to_string(), "percentages sum to 80.0%, should sum to ~100%");
    }

    #[test]
    fn molecular_errors_carry_suggestions() {
        let e = MolecularError::NonIntegerMultiplier {
            experimental_mass: 75.0,
            empirical_mass: 30.026,
            raw_multiplier: 2.4978,
            lower: MassSuggestion {
                multiplier: 2,
                mass: 60.052,
            },
            upper: MassSuggestion {
                multiplier: 3,
                mass: 90.078,
            },
        };
        let text = e.to_string();
        assert!(text.contains("2.50"));
        assert!(text.contains("60.05 g/mol (n=2)"));
        assert!(text.contains("90.08 g/mol (n=3)"));
    }
}
