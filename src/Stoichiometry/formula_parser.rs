//! # Chemical formula parser
//!
//! ## Aim
//! Turns a formula string such as `"Al2(SO4)3"` or `"K4[Fe(CN)6]"` into the multiset of its atoms:
//! `{Al: 2, S: 3, O: 12}`.
//!
//! ## Main Data Structures and Logic
//! - `normalize_formula`: strips whitespace and repairs capitalisation of formulae typed
//!   entirely in lower or upper case (`"nacl"` -> `"NaCl"`)
//! - `tokenize`: one pass over the string producing `Token`s; an uppercase letter plus at most
//!   one following lowercase letter is an element symbol, digit runs are counts,
//!   `(`/`[` and `)`/`]` open and close groups
//! - `parse_formula`: walks the tokens with a stack of per-group counters. A closing bracket pops
//!   the innermost group and merges it into the enclosing one, multiplied by the number that
//!   follows the bracket. Elements are checked against the `PeriodicTable` as they appear.
//!
//! The result is ordered by atomic number, so `"OH2"` and `"H2O"` parse to the same `ParsedFormula::elements`.
//!
//! Two-letter symbols are matched greedily without backtracking: `"Co"` is always cobalt and never
//! carbon + oxygen.
use crate::Stoichiometry::errors::FormulaError;
use crate::Stoichiometry::periodic_table::PeriodicTable;
use crate::Utils::numeric::digits_to_subscripts;
use log::debug;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static ELEMENT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z])([a-z]?)(\d*)").expect("element run regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Element(String),
    Number(u32),
    GroupOpen,
    GroupClose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    pub symbol: String,
    pub count: u32,
}

impl ElementCount {
    pub fn new(symbol: &str, count: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            count,
        }
    }
}

/// successfully parsed formula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFormula {
    /// one entry per distinct element, ascending atomic number
    pub elements: Vec<ElementCount>,
    /// input exactly as given
    pub original: String,
    /// input after `normalize_formula`
    pub normalized: String,
}

impl ParsedFormula {
    pub fn to_map(&self) -> BTreeMap<String, u32> {
        self.elements
            .iter()
            .map(|e| (e.symbol.clone(), e.count))
            .collect()
    }

    /// number of atoms of `symbol`, 0 if the element is absent
    pub fn count_of(&self, symbol: &str) -> u32 {
        self.elements
            .iter()
            .find(|e| e.symbol == symbol)
            .map_or(0, |e| e.count)
    }

    /// canonical flat formula, e.g. "Al2S3O12"
    pub fn to_formula_string(&self) -> String {
        build_formula_string(&self.elements)
    }
}

/// Removes whitespace; a formula written all in lower case or all in upper case gets
/// every `letter [lowercase letter] [digits]` run recapitalised. This is a heuristic only:
/// `"co"` becomes cobalt, and `"NACL"` is left untouched.
pub fn normalize_formula(formula: &str) -> String {
    let normalized: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if normalized == normalized.to_lowercase() || normalized == normalized.to_uppercase() {
        ELEMENT_RUN
            .replace_all(&normalized, |caps: &Captures| {
                format!(
                    "{}{}{}",
                    caps[1].to_uppercase(),
                    caps[2].to_lowercase(),
                    &caps[3]
                )
            })
            .into_owned()
    } else {
        normalized
    }
}

pub fn tokenize(formula: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = formula.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'A'..='Z' => {
                let mut symbol = c.to_string();
                if let Some(&next) = chars.peek() {
                    if next.is_ascii_lowercase() {
                        symbol.push(next);
                        chars.next();
                    }
                }
                tokens.push(Token::Element(symbol));
            }
            '0'..='9' => {
                let mut value = c.to_digit(10).unwrap_or(0);
                while let Some(d) = chars.peek().and_then(|n| n.to_digit(10)) {
                    value = value.saturating_mul(10).saturating_add(d);
                    chars.next();
                }
                tokens.push(Token::Number(value));
            }
            '(' | '[' => tokens.push(Token::GroupOpen),
            ')' | ']' => tokens.push(Token::GroupClose),
            // anything else has been rejected by the caller before tokenizing
            _ => {}
        }
    }
    tokens
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '(' | ')' | '[' | ']')
}

/// number token directly after position `i`, if any
fn count_after(tokens: &[Token], i: usize) -> Option<u32> {
    match tokens.get(i + 1) {
        Some(Token::Number(n)) => Some(*n),
        _ => None,
    }
}

fn add_count(group: &mut HashMap<String, u32>, symbol: &str, count: u32) -> Result<(), FormulaError> {
    let entry = group.entry(symbol.to_string()).or_insert(0);
    *entry = entry
        .checked_add(count)
        .ok_or_else(|| FormulaError::CountOverflow(symbol.to_string()))?;
    Ok(())
}

fn count_atoms(
    tokens: &[Token],
    table: &PeriodicTable,
) -> Result<HashMap<String, u32>, FormulaError> {
    // groups[0] is the formula itself, every open bracket pushes a new group
    let mut groups: Vec<HashMap<String, u32>> = vec![HashMap::new()];
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Element(symbol) => {
                let element = table
                    .lookup(symbol)
                    .ok_or_else(|| FormulaError::UnknownElement(symbol.clone()))?;
                let count = match count_after(tokens, i) {
                    Some(n) => {
                        i += 1;
                        n
                    }
                    None => 1,
                };
                debug!("element {} x{} at depth {}", element.symbol, count, groups.len() - 1);
                if let Some(current) = groups.last_mut() {
                    add_count(current, &element.symbol, count)?;
                }
            }
            Token::GroupOpen => groups.push(HashMap::new()),
            Token::GroupClose => {
                if groups.len() < 2 {
                    return Err(FormulaError::UnmatchedClose);
                }
                let multiplier = match count_after(tokens, i) {
                    Some(n) => {
                        i += 1;
                        n
                    }
                    None => 1,
                };
                let closed = groups.pop().unwrap_or_default();
                debug!("group {:?} closed with multiplier {}", closed, multiplier);
                if let Some(parent) = groups.last_mut() {
                    for (symbol, count) in closed {
                        let scaled = count
                            .checked_mul(multiplier)
                            .ok_or_else(|| FormulaError::CountOverflow(symbol.clone()))?;
                        add_count(parent, &symbol, scaled)?;
                    }
                }
            }
            // a number that follows neither an element nor a group (e.g. "2H2O") carries no atoms
            Token::Number(n) => debug!("skipping standalone number {}", n),
        }
        i += 1;
    }
    if groups.len() != 1 {
        return Err(FormulaError::Unclosed);
    }
    Ok(groups.pop().unwrap_or_default())
}

/// Parses `formula` into element counts ordered by atomic number.
///
/// Checks are applied in this order, the first failure is returned:
/// empty input, characters other than letters/digits/brackets, no tokens,
/// unknown element, unmatched `)`, unclosed `(`.
///
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::formula_parser::parse_formula;
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// let table = PeriodicTable::embedded().unwrap();
/// let parsed = parse_formula("Al2(SO4)3", &table).unwrap();
/// assert_eq!(parsed.count_of("O"), 12);
/// assert_eq!(parsed.to_formula_string(), "O12Al2S3");
/// ```
pub fn parse_formula(formula: &str, table: &PeriodicTable) -> Result<ParsedFormula, FormulaError> {
    if formula.trim().is_empty() {
        return Err(FormulaError::Empty);
    }
    let normalized = normalize_formula(formula);
    if !normalized.chars().all(is_allowed_char) {
        return Err(FormulaError::InvalidCharacters);
    }
    let tokens = tokenize(&normalized);
    if tokens.is_empty() {
        return Err(FormulaError::NoTokens);
    }
    debug!("formula {} tokenized: {:?}", normalized, tokens);
    let counts = count_atoms(&tokens, table)?;

    let mut elements: Vec<(u32, ElementCount)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .filter_map(|(symbol, count)| {
            table
                .lookup(&symbol)
                .map(|e| (e.atomic_number, ElementCount { symbol, count }))
        })
        .collect();
    // "()" or "H0" leave no atoms at all
    if elements.is_empty() {
        return Err(FormulaError::NoTokens);
    }
    elements.sort_by_key(|(number, _)| *number);

    Ok(ParsedFormula {
        elements: elements.into_iter().map(|(_, e)| e).collect(),
        original: formula.to_string(),
        normalized,
    })
}

/// "C" + "H2" + "O": symbols in the given order, count 1 omitted
pub fn build_formula_string(elements: &[ElementCount]) -> String {
    elements
        .iter()
        .map(|e| {
            if e.count == 1 {
                e.symbol.clone()
            } else {
                format!("{}{}", e.symbol, e.count)
            }
        })
        .collect()
}

/// "C6H12O6" -> "C₆H₁₂O₆"
pub fn format_with_subscripts(formula: &str) -> String {
    digits_to_subscripts(formula)
}
