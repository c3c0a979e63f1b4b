#[cfg(test)]
mod test_parameter_registry {
    use rotascan_chem::{Coefficients, Hybridization, ParameterRegistry, ParametersError, KNOWN_PARAMETERS};

    #[test]
    fn element_lookups() {
        let registry = ParameterRegistry::new();
        assert_eq!(registry.count_elements(), 8);
        assert!((registry.vdw_radius("N").unwrap() - 1.55).abs() < 1e-10);
        assert!((registry.partial_charge("O").unwrap() + 0.45).abs() < 1e-10);
        assert!((registry.covalent_radius("C", Hybridization::Sp2).unwrap() - 0.67).abs() < 1e-10);
        assert!(registry.vdw_radius("XX").is_none());
    }

    #[test]
    fn bond_length_candidates_cover_common_bonds() {
        let registry = ParameterRegistry::new();
        let tolerance = registry.coefficients().length_error;

        // --- typical protein bonds must be matched by at least one candidate
        let expected = [("C", "C", 1.53), ("C", "N", 1.47), ("C", "O", 1.43),
                        ("C", "N", 1.33), ("C", "O", 1.23), ("C", "S", 1.81),
                        ("N", "H", 1.01), ("O", "H", 0.96)];
        for (ei, ej, observed) in expected {
            let candidates = registry.bond_length_candidates(ei, ej);
            assert!(candidates.iter().any(|&l| (l - observed).abs() <= tolerance),
                    "no candidate within {} of {} for {}-{}", tolerance, observed, ei, ej);
        }
        // --- unknown elements produce no candidates
        assert!(registry.bond_length_candidates("C", "XX").is_empty());
    }

    #[test]
    fn grid_cell_size_covers_every_candidate() {
        let registry = ParameterRegistry::new();
        let max_len = registry.max_bond_length();
        for ei in ["H", "C", "N", "O", "S", "SE"] {
            for ej in ["H", "C", "N", "O", "S", "SE"] {
                for l in registry.bond_length_candidates(ei, ej) {
                    assert!(l + registry.coefficients().length_error <= max_len + 1e-10);
                }
            }
        }
    }

    #[test]
    fn rotatable_bond_topology() {
        let registry = &KNOWN_PARAMETERS;
        assert_eq!(registry.chi_definitions("SER").unwrap().len(), 1);
        assert_eq!(registry.chi_definitions("ARG").unwrap().len(), 4);
        assert_eq!(registry.chi_definitions("LYS").unwrap().len(), 4);
        assert!(registry.chi_definitions("GLY").is_none());
        assert!(registry.chi_definitions("HOH").is_none());

        let ser_chi = &registry.chi_definitions("SER").unwrap()[0];
        assert_eq!(ser_chi.name, "chi0");
        assert_eq!(ser_chi.axis(), ("CA", "CB"));
        // --- the chi list is ordered outwards along the side chain
        let arg = registry.chi_definitions("ARG").unwrap();
        assert_eq!(arg[0].atoms[0], "N");
        assert_eq!(arg[3].atoms[3], "CZ");
    }

    #[test]
    fn hydrogen_name_tables() {
        let registry = ParameterRegistry::new();
        assert_eq!(registry.hydrogen_names("SER", "OG").unwrap(), &vec!["HG".to_string()]);
        assert_eq!(registry.hydrogen_names("LYS", "NZ").unwrap().len(), 3);
        assert!(registry.is_protonated("ARG", "NE"));
        // --- a backbone carbonyl carbon carries no hydrogen
        assert!(!registry.is_protonated("SER", "C"));
        // --- proline has no amide hydrogen
        assert!(!registry.is_protonated("PRO", "N"));
    }

    #[test]
    fn coefficient_overrides() {
        let mut coefficients = Coefficients::default();
        coefficients.apply_overrides("h_k=0.0,cutoff_start=1.5, cutoff_end=3.0").unwrap();
        assert_eq!(coefficients.h_k, 0.0);
        assert_eq!(coefficients.cutoff_start, 1.5);
        assert!(coefficients.validate().is_ok());

        let bad_key = Coefficients::default().apply_overrides("lj_kk=1.0");
        assert!(matches!(bad_key, Err(ParametersError::UnknownParameter { .. })));
        let bad_value = Coefficients::default().apply_overrides("lj_k=fast");
        assert!(matches!(bad_value, Err(ParametersError::BadParameterValue { .. })));
        let bad_entry = Coefficients::default().apply_overrides("lj_k");
        assert!(matches!(bad_entry, Err(ParametersError::MalformedOverride { .. })));
    }

    #[test]
    fn cutoff_validation() {
        let mut coefficients = Coefficients::default();
        coefficients.cutoff_start = 5.0;
        coefficients.cutoff_end = 2.5;
        assert!(matches!(coefficients.validate(), Err(ParametersError::NonMonotoneCutoffs { .. })));

        let mut coefficients = Coefficients::default();
        coefficients.cutoff_atom = -1.0;
        assert!(matches!(coefficients.validate(), Err(ParametersError::NonPositiveCutoff { .. })));
    }
}
