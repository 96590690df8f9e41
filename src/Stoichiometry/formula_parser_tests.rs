#[cfg(test)]
mod tests {
    use crate::Stoichiometry::errors::FormulaError;
    use crate::Stoichiometry::formula_parser::{
        ElementCount, Token, build_formula_string, format_with_subscripts, normalize_formula,
        parse_formula, tokenize,
    };
    use crate::Stoichiometry::periodic_table::PeriodicTable;
    use std::collections::BTreeMap;

    fn table() -> PeriodicTable {
        PeriodicTable::embedded().unwrap()
    }

    fn counts(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    #[test]
    fn test_normalize_formula() {
        assert_eq!(normalize_formula(" H2 O "), "H2O");
        assert_eq!(normalize_formula("h2o"), "H2O");
        assert_eq!(normalize_formula("nacl"), "NaCl");
        assert_eq!(normalize_formula("ca(oh)2"), "Ca(Oh)2");
        // mixed case is trusted as typed
        assert_eq!(normalize_formula("NaCl"), "NaCl");
        // upper case runs cannot be split into two-letter symbols
        assert_eq!(normalize_formula("NACL"), "NACL");
        assert_eq!(normalize_formula("co2"), "Co2");
        assert_eq!(normalize_formula("\t\n"), "");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Al2(SO4)3"),
            vec![
                Token::Element("Al".to_string()),
                Token::Number(2),
                Token::GroupOpen,
                Token::Element("S".to_string()),
                Token::Element("O".to_string()),
                Token::Number(4),
                Token::GroupClose,
                Token::Number(3),
            ]
        );
        assert_eq!(
            tokenize("[Fe]12"),
            vec![
                Token::GroupOpen,
                Token::Element("Fe".to_string()),
                Token::GroupClose,
                Token::Number(12),
            ]
        );
        // at most two letters per symbol
        assert_eq!(
            tokenize("Uuo"),
            vec![Token::Element("Uu".to_string())]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("+-").is_empty());
    }

    #[test]
    fn test_simple_formulae() {
        let table = table();
        let parsed = parse_formula("H2O", &table).unwrap();
        assert_eq!(
            parsed.elements,
            vec![ElementCount::new("H", 2), ElementCount::new("O", 1)]
        );
        assert_eq!(parsed.original, "H2O");
        assert_eq!(parsed.normalized, "H2O");

        let parsed = parse_formula("C6H8O6", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("C", 6), ("H", 8), ("O", 6)]));

        // repeated symbols are summed
        let parsed = parse_formula("C5H6OOH", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("C", 5), ("H", 7), ("O", 2)]));
    }

    #[test]
    fn test_groups_and_multipliers() {
        let table = table();
        let parsed = parse_formula("Al2(SO4)3", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("Al", 2), ("S", 3), ("O", 12)]));

        let parsed = parse_formula("Na(NO3)2", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("Na", 1), ("N", 2), ("O", 6)]));

        let parsed = parse_formula("Ca(OH)2", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("Ca", 1), ("O", 2), ("H", 2)]));

        // nested groups and square brackets
        let parsed = parse_formula("K4[Fe(CN)6]", &table).unwrap();
        assert_eq!(
            parsed.to_map(),
            counts(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
        );
        let parsed = parse_formula("((CH3)3C)2O", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("C", 8), ("H", 18), ("O", 1)]));

        // the same element inside and outside groups
        let parsed = parse_formula("CH3(CH2)2CH3", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("C", 4), ("H", 10)]));
    }

    #[test]
    fn test_atomic_number_order() {
        let table = table();
        let parsed = parse_formula("OH2", &table).unwrap();
        let symbols: Vec<&str> = parsed.elements.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["H", "O"]);

        let parsed = parse_formula("Al2(SO4)3", &table).unwrap();
        let symbols: Vec<&str> = parsed.elements.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["O", "Al", "S"]);
    }

    #[test]
    fn test_case_repair() {
        let table = table();
        let parsed = parse_formula("nacl", &table).unwrap();
        assert_eq!(parsed.normalized, "NaCl");
        assert_eq!(parsed.to_map(), counts(&[("Na", 1), ("Cl", 1)]));
        // "NACL" stays N + A + C + L and "A" is not an element
        assert_eq!(
            parse_formula("NACL", &table),
            Err(FormulaError::UnknownElement("A".to_string()))
        );
    }

    #[test]
    fn test_error_order() {
        let table = table();
        assert_eq!(parse_formula("", &table), Err(FormulaError::Empty));
        assert_eq!(parse_formula("   ", &table), Err(FormulaError::Empty));
        assert_eq!(
            parse_formula("H2O!", &table),
            Err(FormulaError::InvalidCharacters)
        );
        // invalid characters win over unknown elements
        assert_eq!(
            parse_formula("Xy-", &table),
            Err(FormulaError::InvalidCharacters)
        );
        // brackets alone hold no atoms
        assert_eq!(parse_formula("()", &table), Err(FormulaError::NoTokens));
        assert_eq!(
            parse_formula("Xy", &table),
            Err(FormulaError::UnknownElement("Xy".to_string()))
        );
        assert_eq!(
            parse_formula("H2O)", &table),
            Err(FormulaError::UnmatchedClose)
        );
        assert_eq!(
            parse_formula("Ca(OH", &table),
            Err(FormulaError::Unclosed)
        );
        // the unknown element is reported before the bracket problem further on
        assert_eq!(
            parse_formula("Qq(OH", &table),
            Err(FormulaError::UnknownElement("Qq".to_string()))
        );
    }

    #[test]
    fn test_unknown_element_message() {
        let table = table();
        let err = parse_formula("Xy", &table).unwrap_err();
        assert!(err.to_string().contains("Xy"));
    }

    #[test]
    fn test_greedy_two_letter_symbols() {
        let table = table();
        // "Co" is cobalt, never C + O
        let parsed = parse_formula("Co", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("Co", 1)]));
        // no backtracking: "Cx" is not split into C + x
        assert_eq!(
            parse_formula("Cx", &table),
            Err(FormulaError::UnknownElement("Cx".to_string()))
        );
    }

    #[test]
    fn test_standalone_numbers_and_zero_counts() {
        let table = table();
        let parsed = parse_formula("2H2O", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("H", 2), ("O", 1)]));
        let parsed = parse_formula("NaCl(H2O)0", &table).unwrap();
        assert_eq!(parsed.to_map(), counts(&[("Na", 1), ("Cl", 1)]));
        assert_eq!(parse_formula("H0", &table), Err(FormulaError::NoTokens));
    }

    #[test]
    fn test_count_overflow() {
        let table = table();
        assert_eq!(
            parse_formula("(H4000000000)2", &table),
            Err(FormulaError::CountOverflow("H".to_string()))
        );
    }

    #[test]
    fn test_round_trip() {
        let table = table();
        let formulae = [
            "H2O",
            "Al2(SO4)3",
            "K4[Fe(CN)6]",
            "C6H12O6",
            "Ca3(PO4)2",
            "CuSO4(H2O)5",
            "((CH3)3C)2O",
            "UF6",
        ];
        for formula in formulae {
            let parsed = parse_formula(formula, &table).unwrap();
            let rebuilt = parsed.to_formula_string();
            let reparsed = parse_formula(&rebuilt, &table).unwrap();
            assert_eq!(parsed.elements, reparsed.elements, "round trip of {}", formula);
        }
    }

    #[test]
    fn test_build_and_format() {
        let elements = vec![
            ElementCount::new("C", 6),
            ElementCount::new("H", 12),
            ElementCount::new("O", 6),
        ];
        assert_eq!(build_formula_string(&elements), "C6H12O6");
        assert_eq!(format_with_subscripts("C6H12O6"), "C₆H₁₂O₆");
        assert_eq!(
            build_formula_string(&[ElementCount::new("Na", 1), ElementCount::new("Cl", 1)]),
            "NaCl"
        );
    }
}
