/// error enums of the calculators and of periodic table loading; every calculator returns
/// `Result<_, ChemError>` and the `Display` text of an error is the message shown to the user
pub mod errors;
/// element data: 118 elements embedded from `data/periodic_table.json`, case-insensitive lookup
/// by symbol, lookup by atomic number and search by symbol or name
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// let table = PeriodicTable::embedded().unwrap();
/// let iron = table.lookup("fe").unwrap();
/// assert_eq!(iron.symbol, "Fe");
/// assert_eq!(iron.atomic_number, 26);
/// assert_eq!(table.by_atomic_number(8).unwrap().name, "Oxygen");
/// ```
pub mod periodic_table;
/// eng
/// Parser of chemical formulae. Turns text such as "Ca(OH)2", "K4[Fe(CN)6]" or "CuSO4(H2O)5"
/// into element counts:
/// 1) whitespace is removed and a formula typed entirely in one case gets its element
///    symbols recapitalized ("nacl" -> "NaCl")
/// 2) the normalized text is split into tokens: element symbols, counts, `(`/`[` and `)`/`]`
/// 3) counts are accumulated on a stack of groups; a count after a closing bracket multiplies
///    the whole group
///
/// The result lists each element once, in ascending atomic number order. Every unknown
/// symbol and every unbalanced bracket is reported as a `FormulaError`.
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// use StoichCalc::Stoichiometry::formula_parser::parse_formula;
/// let table = PeriodicTable::embedded().unwrap();
/// let parsed = parse_formula("Al2(SO4)3", &table).unwrap();
/// assert_eq!(parsed.count_of("Al"), 2);
/// assert_eq!(parsed.count_of("S"), 3);
/// assert_eq!(parsed.count_of("O"), 12);
/// assert!(parse_formula("Xy2", &table).is_err());
/// ```
pub mod formula_parser;
/// molar mass of a formula with per-element breakdown
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// use StoichCalc::Stoichiometry::molmass::calculate_molar_mass;
/// let table = PeriodicTable::embedded().unwrap();
/// let water = calculate_molar_mass("H2O", &table).unwrap();
/// assert!((water.total_mass - 18.015).abs() < 0.01);
/// water.pretty_print();
/// ```
pub mod molmass;
/// mass percent of every element of a formula, largest first
/// # Examples
/// ```
/// use StoichCalc::Stoichiometry::periodic_table::PeriodicTable;
/// use StoichCalc::Stoichiometry::composition::calculate_composition;
/// let table = PeriodicTable::embedded().unwrap();
/// let water = calculate_composition("H2O", &table).unwrap();
/// assert_eq!(water.elements[0].symbol, "O");
/// assert!((water.elements[0].percentage - 88.81).abs() < 0.1);
/// ```
pub mod composition;
/// conversion between moles, grams and number of particles
pub mod unit_converter;
/// empirical formula from mass percentages, with the derivation kept step by step
pub mod empirical_formula;
/// molecular formula from an empirical formula and an experimental molar mass
pub mod molecular_formula;
mod formula_parser_tests;
