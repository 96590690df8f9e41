use super::cli_main::{get_user_input, print_error, prompt};
use crate::Stoichiometry::composition::calculate_composition;
use crate::Stoichiometry::empirical_formula::{EmpiricalInput, calculate_empirical_formula};
use crate::Stoichiometry::molecular_formula::calculate_molecular_formula;
use crate::Stoichiometry::molmass::calculate_molar_mass;
use crate::Stoichiometry::periodic_table::{Element, PeriodicTable};
use crate::Stoichiometry::unit_converter::{Unit, convert_units, parse_quantity};
use log::error;
use prettytable::{Table, row};

fn ask(text: &str) -> Option<String> {
    prompt(text);
    get_user_input().map(|s| s.trim().to_string())
}

fn ask_quantity(text: &str) -> Result<f64, String> {
    let answer = ask(text).unwrap_or_default();
    parse_quantity(&answer).ok_or_else(|| format!("\"{}\" is not a number", answer))
}

fn report(result: Result<(), String>) {
    if let Err(e) = result {
        error!("{}", e);
        print_error(&e);
    }
}

pub fn molar_mass_menu(table: &PeriodicTable) {
    println!("\n=== Molar mass ===");
    let formula = ask("Formula (e.g. Ca(OH)2): ").unwrap_or_default();
    report(
        calculate_molar_mass(&formula, table)
            .map(|r| r.pretty_print())
            .map_err(|e| e.to_string()),
    );
}

pub fn composition_menu(table: &PeriodicTable) {
    println!("\n=== Percent composition ===");
    let formula = ask("Formula (e.g. C6H12O6): ").unwrap_or_default();
    report(
        calculate_composition(&formula, table)
            .map(|r| r.pretty_print())
            .map_err(|e| e.to_string()),
    );
}

pub fn conversion_menu(table: &PeriodicTable) {
    println!("\n=== Moles / grams / particles ===");
    report(run_conversion(table));
}

fn run_conversion(table: &PeriodicTable) -> Result<(), String> {
    let formula = ask("Formula: ").unwrap_or_default();
    let unit = ask("Known quantity unit (moles, grams, particles): ")
        .unwrap_or_default()
        .parse::<Unit>()
        .map_err(|e| e.to_string())?;
    let value = ask_quantity(&format!("Value in {}: ", unit))?;
    let result = convert_units(&formula, value, unit, table).map_err(|e| e.to_string())?;
    result.pretty_print();
    Ok(())
}

pub fn empirical_menu(table: &PeriodicTable) {
    println!("\n=== Empirical formula ===");
    println!("Enter element percentages separated by commas, e.g. C 40, H 6.7, O 53.3");
    let line = ask("Composition: ").unwrap_or_default();
    report(parse_percentages(&line).and_then(|inputs| {
        calculate_empirical_formula(&inputs, table)
            .map(|r| r.pretty_print())
            .map_err(|e| e.to_string())
    }));
}

pub fn molecular_menu(table: &PeriodicTable) {
    println!("\n=== Molecular formula ===");
    report(run_molecular(table));
}

fn run_molecular(table: &PeriodicTable) -> Result<(), String> {
    let empirical = ask("Empirical formula (e.g. CH2O): ").unwrap_or_default();
    let mass = ask_quantity("Experimental molar mass, g/mol: ")?;
    let result =
        calculate_molecular_formula(&empirical, mass, table).map_err(|e| e.to_string())?;
    result.pretty_print();
    Ok(())
}

pub fn element_search_menu(table: &PeriodicTable) {
    println!("\n=== Element search ===");
    let query = ask("Symbol, name or atomic number: ").unwrap_or_default();
    let found = find_elements(&query, table);
    if found.is_empty() {
        print_error(&format!("no element matches \"{}\"", query));
        return;
    }
    let mut out = Table::new();
    out.add_row(row!["No.", "Symbol", "Name", "Atomic mass", "Category", "Color"]);
    for e in found {
        out.add_row(row![
            e.atomic_number,
            e.symbol,
            e.name,
            e.atomic_mass,
            e.category,
            e.color()
        ]);
    }
    out.printstd();
}

/// an atomic number selects one element, any other text is a symbol/name search
fn find_elements<'a>(query: &str, table: &'a PeriodicTable) -> Vec<&'a Element> {
    match query.trim().parse::<u32>() {
        Ok(number) => table.by_atomic_number(number).into_iter().collect(),
        Err(_) => table.search(query),
    }
}

/// "C 40, H 6.7, O 53.3" (also "C:40" or "C=40", ';' as separator) -> inputs
fn parse_percentages(line: &str) -> Result<Vec<EmpiricalInput>, String> {
    line.split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry
                .split(|c: char| c.is_whitespace() || c == ':' || c == '=')
                .filter(|p| !p.is_empty());
            let (Some(symbol), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(format!("cannot read \"{}\", expected e.g. \"C 40\"", entry));
            };
            let percentage = parse_quantity(value)
                .ok_or_else(|| format!("\"{}\" is not a percentage", value))?;
            Ok(EmpiricalInput::new(symbol, percentage))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percentages() {
        let inputs = parse_percentages("C 40, H 6.7, O 53.3").unwrap();
        assert_eq!(
            inputs,
            vec![
                EmpiricalInput::new("C", 40.0),
                EmpiricalInput::new("H", 6.7),
                EmpiricalInput::new("O", 53.3)
            ]
        );
        let inputs = parse_percentages("Fe:69.94; O=30.06").unwrap();
        assert_eq!(inputs[0], EmpiricalInput::new("Fe", 69.94));
        assert_eq!(inputs[1], EmpiricalInput::new("O", 30.06));
        assert!(parse_percentages("C 40 H 6.7").is_err());
        assert!(parse_percentages("C forty").is_err());
        assert_eq!(parse_percentages("").unwrap(), vec![]);
    }

    #[test]
    fn test_find_elements() {
        let table = PeriodicTable::embedded().unwrap();
        let found = find_elements("26", &table);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].symbol, "Fe");
        assert!(find_elements("0", &table).is_empty());
        assert!(find_elements("oxy", &table).iter().any(|e| e.symbol == "O"));
    }
}
