//! # Periodic table
//!
//! ## Aim
//! Read-only element data (symbol, name, atomic number, standard atomic mass, CPK display color)
//! used by every calculator of the crate.
//!
//! ## Main Data Structures and Logic
//! - `Element`: one element record as stored in the JSON asset
//! - `PeriodicTable`: validated list of elements ordered by atomic number with two indices:
//!   uppercased symbol -> position, and atomic number -> position
//!
//! The default data set (118 elements) is embedded at compile time from `data/periodic_table.json`;
//! an alternative table in the same format can be loaded from a file. The table is never mutated
//! after construction, so it can be shared between threads by plain reference.
use crate::Stoichiometry::errors::TableError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const PERIODIC_TABLE_JSON: &str = include_str!("../../data/periodic_table.json");

/// one chemical element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "number")]
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    /// standard atomic weight, g/mol
    pub atomic_mass: f64,
    /// 6 hex digits without leading '#'
    pub cpk_hex: String,
    #[serde(default)]
    pub category: String,
}

impl Element {
    /// CSS-style color "#RRGGBB"
    pub fn color(&self) -> String {
        format!("#{}", self.cpk_hex)
    }
}

#[derive(Debug, Deserialize)]
struct PeriodicTableJson {
    elements: Vec<Element>,
}

#[derive(Debug, Clone)]
pub struct PeriodicTable {
    elements: Vec<Element>,
    by_symbol: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
}

impl PeriodicTable {
    /// Table built from the JSON asset compiled into the crate.
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_json(PERIODIC_TABLE_JSON)
    }

    /// Table from a JSON document of the form `{"elements": [{"number":1, "symbol":"H", ...}]}`
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: PeriodicTableJson = serde_json::from_str(json)?;
        Self::from_elements(raw.elements)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json(&content)?;
        info!(
            "loaded periodic table with {} elements from '{}'",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Validates the records and builds lookup indices. Elements are stored in
    /// ascending atomic number order whatever the input order is.
    pub fn from_elements(mut elements: Vec<Element>) -> Result<Self, TableError> {
        if elements.is_empty() {
            return Err(TableError::EmptyTable);
        }
        elements.sort_by_key(|e| e.atomic_number);
        let mut by_symbol = HashMap::with_capacity(elements.len());
        let mut by_number = HashMap::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            if !(element.atomic_mass.is_finite() && element.atomic_mass > 0.0) {
                return Err(TableError::InvalidMass {
                    symbol: element.symbol.clone(),
                    mass: element.atomic_mass,
                });
            }
            if !is_hex_color(&element.cpk_hex) {
                return Err(TableError::InvalidColor {
                    symbol: element.symbol.clone(),
                    color: element.cpk_hex.clone(),
                });
            }
            if by_number.insert(element.atomic_number, i).is_some() {
                return Err(TableError::DuplicateNumber(element.atomic_number));
            }
            if by_symbol.insert(element.symbol.to_uppercase(), i).is_some() {
                return Err(TableError::DuplicateSymbol(element.symbol.clone()));
            }
        }
        debug!("periodic table indexed: {} elements", elements.len());
        Ok(Self {
            elements,
            by_symbol,
            by_number,
        })
    }

    /// Case-insensitive lookup by symbol; the returned record carries the canonical spelling.
    pub fn lookup(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol
            .get(&symbol.to_uppercase())
            .map(|&i| &self.elements[i])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(&symbol.to_uppercase())
    }

    pub fn by_atomic_number(&self, atomic_number: u32) -> Option<&Element> {
        self.by_number
            .get(&atomic_number)
            .map(|&i| &self.elements[i])
    }

    /// Elements whose symbol or name contains `query` (case-insensitive), in atomic number order.
    /// An empty query finds nothing.
    pub fn search(&self, query: &str) -> Vec<&Element> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.elements
            .iter()
            .filter(|e| {
                e.symbol.to_lowercase().contains(&query) || e.name.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_table() {
        let table = PeriodicTable::embedded().unwrap();
        assert_eq!(table.len(), 118);
        let numbers: Vec<u32> = table.iter().map(|e| e.atomic_number).collect();
        assert_eq!(numbers, (1..=118).collect::<Vec<u32>>());
        for element in table.iter() {
            assert!(element.atomic_mass > 0.0);
            assert_eq!(element.cpk_hex.len(), 6);
        }
    }

    #[test]
    fn test_lookup() {
        let table = PeriodicTable::embedded().unwrap();
        let na = table.lookup("Na").unwrap();
        assert_eq!(na.atomic_number, 11);
        assert_eq!(na.name, "Sodium");
        assert_relative_eq!(na.atomic_mass, 22.98976928);
        assert_eq!(na.color(), "#AB5CF2");
        // case-insensitive index, canonical symbol returned
        assert_eq!(table.lookup("NA").unwrap().symbol, "Na");
        assert_eq!(table.lookup("cl").unwrap().symbol, "Cl");
        assert!(table.lookup("Xy").is_none());
        assert!(table.contains("fe"));
        assert!(!table.contains("J"));
        assert_eq!(table.by_atomic_number(8).unwrap().symbol, "O");
        assert!(table.by_atomic_number(0).is_none());
    }

    #[test]
    fn test_search() {
        let table = PeriodicTable::embedded().unwrap();
        assert!(table.search("").is_empty());
        assert!(table.search("   ").is_empty());
        let carbon: Vec<&str> = table
            .search("carb")
            .iter()
            .map(|e| e.symbol.as_str())
            .collect();
        assert_eq!(carbon, vec!["C"]);
        let found = table.search("o");
        assert!(found.iter().any(|e| e.symbol == "O"));
        assert!(found.iter().any(|e| e.symbol == "Co"));
        assert!(
            found
                .windows(2)
                .all(|w| w[0].atomic_number < w[1].atomic_number)
        );
    }

    #[test]
    fn test_from_file_and_validation() {
        let json = r#"{"elements": [
            {"number": 8, "symbol": "O", "name": "Oxygen", "atomic_mass": 15.999, "cpk_hex": "FF0D0D"},
            {"number": 1, "symbol": "H", "name": "Hydrogen", "atomic_mass": 1.008, "cpk_hex": "FFFFFF"}
        ]}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let table = PeriodicTable::from_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().symbol, "H");
        assert_eq!(table.lookup("o").unwrap().category, "");

        let duplicate = r#"{"elements": [
            {"number": 1, "symbol": "H", "name": "Hydrogen", "atomic_mass": 1.008, "cpk_hex": "FFFFFF"},
            {"number": 2, "symbol": "h", "name": "Other", "atomic_mass": 2.0, "cpk_hex": "FFFFFF"}
        ]}"#;
        assert!(matches!(
            PeriodicTable::from_json(duplicate),
            Err(TableError::DuplicateSymbol(_))
        ));
        let bad_mass = r#"{"elements": [
            {"number": 1, "symbol": "H", "name": "Hydrogen", "atomic_mass": 0.0, "cpk_hex": "FFFFFF"}
        ]}"#;
        assert!(matches!(
            PeriodicTable::from_json(bad_mass),
            Err(TableError::InvalidMass { .. })
        ));
        let bad_color = r##"{"elements": [
            {"number": 1, "symbol": "H", "name": "Hydrogen", "atomic_mass": 1.008, "cpk_hex": "#FFF"}
        ]}"##;
        assert!(matches!(
            PeriodicTable::from_json(bad_color),
            Err(TableError::InvalidColor { .. })
        ));
        assert!(matches!(
            PeriodicTable::from_json(r#"{"elements": []}"#),
            Err(TableError::EmptyTable)
        ));
        assert!(matches!(
            PeriodicTable::from_file("no_such_table.json"),
            Err(TableError::Io { .. })
        ));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PeriodicTable>();
    }
}
