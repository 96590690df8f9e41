//! # Empirical formula from mass percent composition
//!
//! ## Aim
//! Derives the simplest whole-number ratio of atoms from the mass percentages of the elements
//! of an unknown compound, keeping a step-by-step record of the derivation.
//!
//! ## Logic
//! A 100 g sample is assumed, so each percentage is a mass in grams.
//! 1. moles of each element = percentage / atomic mass
//! 2. mole ratios = moles / smallest number of moles
//! 3. the smallest multiplier m in 1..=6 turning every ratio into a number within 0.1 of an
//!    integer; counts are the rounded ratio × m.
//!
//! When no multiplier up to 6 fits, m = 1 is used and the counts are the plain rounded ratios.
//! Compounds needing a larger multiplier therefore get an approximate answer, not an error.
use crate::Stoichiometry::errors::{ChemError, EmpiricalError};
use crate::Stoichiometry::formula_parser::{ElementCount, build_formula_string};
use crate::Stoichiometry::periodic_table::PeriodicTable;
use crate::Utils::numeric::{round_to_count, to_subscript};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const MAX_MULTIPLIER: u32 = 6;
const INTEGER_TOLERANCE: f64 = 0.1;
const MIN_PERCENT_SUM: f64 = 95.0;
const MAX_PERCENT_SUM: f64 = 105.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalInput {
    pub symbol: String,
    /// mass percent, 0..100
    pub percentage: f64,
}

impl EmpiricalInput {
    pub fn new(symbol: &str, percentage: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepValue {
    pub symbol: String,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpiricalStep {
    pub step_number: u32,
    pub description: String,
    pub values: Vec<StepValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpiricalResult {
    /// e.g. "CH2O", elements in input order
    pub formula: String,
    /// e.g. "CH₂O"
    pub formula_formatted: String,
    pub counts: Vec<ElementCount>,
    pub multiplier: u32,
    pub steps: Vec<EmpiricalStep>,
}

impl EmpiricalResult {
    pub fn pretty_print(&self) {
        for step in &self.steps {
            println!("Step {}: {}", step.step_number, step.description);
            for v in &step.values {
                println!("   {}: {}", v.symbol, v.display);
            }
        }
        println!("Empirical formula: {}", self.formula_formatted);
    }
}

/// smallest m in 1..=MAX_MULTIPLIER making every ratio × m near-integer, 1 if none does
fn find_multiplier(ratios: &[f64]) -> u32 {
    (1..=MAX_MULTIPLIER)
        .find(|&m| {
            ratios.iter().all(|r| {
                let scaled = r * m as f64;
                (scaled - scaled.round()).abs() < INTEGER_TOLERANCE
            })
        })
        .unwrap_or_else(|| {
            warn!(
                "no multiplier up to {} gives whole-number ratios {:?}, rounding as is",
                MAX_MULTIPLIER, ratios
            );
            1
        })
}

fn formatted_formula(counts: &[ElementCount]) -> String {
    counts
        .iter()
        .map(|c| {
            if c.count == 1 {
                c.symbol.clone()
            } else {
                format!("{}{}", c.symbol, to_subscript(c.count))
            }
        })
        .collect()
}

/// Derives the empirical formula from `{symbol, percentage}` pairs.
///
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::empirical_formula::{EmpiricalInput, calculate_empirical_formula};
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// let table = PeriodicTable::embedded().unwrap();
/// let inputs = vec![
///     EmpiricalInput::new("C", 40.0),
///     EmpiricalInput::new("H", 6.7),
///     EmpiricalInput::new("O", 53.3),
/// ];
/// let result = calculate_empirical_formula(&inputs, &table).unwrap();
/// assert_eq!(result.formula, "CH2O");
/// assert_eq!(result.steps.len(), 3);
/// ```
pub fn calculate_empirical_formula(
    inputs: &[EmpiricalInput],
    table: &PeriodicTable,
) -> Result<EmpiricalResult, ChemError> {
    if inputs.len() < 2 {
        return Err(EmpiricalError::TooFewElements.into());
    }
    let total: f64 = inputs.iter().map(|i| i.percentage).sum();
    if !(MIN_PERCENT_SUM..=MAX_PERCENT_SUM).contains(&total) {
        return Err(EmpiricalError::BadPercentageSum(total).into());
    }

    // step 1: grams in a 100 g sample -> moles
    let mut moles_data: Vec<(String, f64)> = Vec::with_capacity(inputs.len());
    let mut step1 = Vec::with_capacity(inputs.len());
    for input in inputs {
        let element = table
            .lookup(input.symbol.trim())
            .ok_or_else(|| EmpiricalError::InvalidElement(input.symbol.clone()))?;
        if !(input.percentage.is_finite() && input.percentage > 0.0) {
            return Err(EmpiricalError::NonPositivePercentage(element.symbol.clone()).into());
        }
        let moles = input.percentage / element.atomic_mass;
        step1.push(StepValue {
            symbol: element.symbol.clone(),
            value: moles,
            display: format!(
                "{} ÷ {} = {:.4} mol",
                input.percentage, element.atomic_mass, moles
            ),
        });
        moles_data.push((element.symbol.clone(), moles));
    }
    let mut steps = vec![EmpiricalStep {
        step_number: 1,
        description: "Convert percentages to moles (% ÷ atomic mass)".to_string(),
        values: step1,
    }];

    // step 2: divide by the smallest amount
    let min_moles = moles_data
        .iter()
        .map(|(_, m)| *m)
        .fold(f64::INFINITY, f64::min);
    let ratios: Vec<f64> = moles_data.iter().map(|(_, m)| m / min_moles).collect();
    let step2 = moles_data
        .iter()
        .zip(&ratios)
        .map(|((symbol, moles), ratio)| StepValue {
            symbol: symbol.clone(),
            value: *ratio,
            display: format!("{:.4} ÷ {:.4} = {:.2}", moles, min_moles, ratio),
        })
        .collect();
    steps.push(EmpiricalStep {
        step_number: 2,
        description: format!("Divide all by the smallest ({:.4})", min_moles),
        values: step2,
    });

    // step 3: whole numbers
    let multiplier = find_multiplier(&ratios);
    debug!("mole ratios {:?}, multiplier {}", ratios, multiplier);
    let mut counts = Vec::with_capacity(ratios.len());
    let mut step3 = Vec::with_capacity(ratios.len());
    for ((symbol, _), ratio) in moles_data.iter().zip(&ratios) {
        let count = round_to_count(ratio * multiplier as f64)
            .ok_or_else(|| EmpiricalError::CountOverflow(symbol.clone()))?;
        step3.push(StepValue {
            symbol: symbol.clone(),
            value: count as f64,
            display: if multiplier > 1 {
                format!("{:.2} × {} = {}", ratio, multiplier, count)
            } else {
                format!("≈ {}", count)
            },
        });
        counts.push(ElementCount::new(symbol, count));
    }
    steps.push(EmpiricalStep {
        step_number: 3,
        description: if multiplier > 1 {
            format!("Multiply by {} to get whole numbers", multiplier)
        } else {
            "Round to the nearest whole numbers".to_string()
        },
        values: step3,
    });

    Ok(EmpiricalResult {
        formula: build_formula_string(&counts),
        formula_formatted: formatted_formula(&counts),
        counts,
        multiplier,
        steps,
    })
}
