#[cfg(test)]
mod test_atom_filters {
    use rotascan_structure::atom_filters::{AtomPredicate, AttributeSelector, ByChain, ByResidue,
                                           IsBackbone, IsHeavy, IsSideChain};
    use rotascan_structure::{ResidueKey, SiteAtom, Structure};

    fn serine_with_hydrogens() -> Structure {
        let rows = [
            ["ATOM", "1", "N", "N", ".", "SER", "A", "1", "68", "26.532", "28.200", "28.365", "1"],
            ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "68", "25.790", "28.757", "29.513", "1"],
            ["ATOM", "3", "C", "C", ".", "SER", "A", "1", "68", "26.891", "29.054", "30.649", "1"],
            ["ATOM", "4", "O", "O", ".", "SER", "A", "1", "68", "26.657", "29.867", "31.341", "1"],
            ["ATOM", "5", "C", "CB", ".", "SER", "A", "1", "68", "25.155", "27.554", "29.987", "1"],
            ["ATOM", "6", "O", "OG", ".", "SER", "A", "1", "68", "24.234", "27.854", "31.028", "1"],
            ["ATOM", "7", "H", "HG", ".", "SER", "A", "1", "68", "23.834", "27.054", "31.428", "1"],
            ["ATOM", "8", "C", "CA", ".", "GLY", "B", "2", "1", "15.790", "18.757", "19.513", "1"],
        ];
        let mut strctr = Structure::new("1xyz");
        for row in &rows { strctr.push_atom(SiteAtom::from_cif_row(row).unwrap()).unwrap(); }
        return strctr;
    }

    #[test]
    fn named_predicates() {
        let strctr = serine_with_hydrogens();
        let chain_a = ByChain::new("A");
        assert_eq!(strctr.atoms().iter().filter(|a| chain_a.check(a)).count(), 7);

        let ser = ByResidue::new(ResidueKey::new(68, "A", "1", "."));
        assert_eq!(strctr.atoms().iter().filter(|a| ser.check(a)).count(), 7);

        assert_eq!(strctr.atoms().iter().filter(|a| IsBackbone.check(a)).count(), 5);
        assert_eq!(strctr.atoms().iter().filter(|a| IsSideChain.check(a)).count(), 2);
        assert_eq!(strctr.atoms().iter().filter(|a| IsHeavy.check(a)).count(), 7);
    }

    #[test]
    fn attribute_selector_include_and_exclude() {
        let strctr = serine_with_hydrogens();

        // --- an atom passes `include` iff every listed attribute matches
        let side_chain_oxygens = AttributeSelector::new()
            .include("comp_id", &["SER"])
            .include("element", &["O"]);
        let selected: Vec<_> = strctr.atoms().iter().filter(|a| side_chain_oxygens.check(a)).collect();
        assert_eq!(selected.len(), 2);

        // --- an atom passes `exclude` iff no listed attribute matches
        let no_backbone_o = AttributeSelector::new()
            .include("element", &["O"])
            .exclude("name", &["O", "OXT"]);
        let selected: Vec<_> = strctr.atoms().iter().filter(|a| no_backbone_o.check(a)).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "OG");

        // --- an unknown attribute never matches
        let unknown = AttributeSelector::new().include("charge", &["1"]);
        assert_eq!(strctr.atoms().iter().filter(|a| unknown.check(a)).count(), 0);
    }

    #[test]
    fn grouping_by_an_attribute() {
        let strctr = serine_with_hydrogens();
        let heavy = AttributeSelector::new().exclude("element", &["H"]);
        let by_element = heavy.group(&strctr, "element");
        assert_eq!(by_element["C"], vec![2, 3, 5, 8]);
        assert_eq!(by_element["O"], vec![4, 6]);
        assert_eq!(by_element["N"], vec![1]);
        assert!(!by_element.contains_key("H"));
    }

    #[test]
    fn projection_follows_atom_id_order() {
        let strctr = serine_with_hydrogens();
        let selector = AttributeSelector::new().include("element", &["O"]);
        let rows = selector.project(&strctr, &["id", "name", "comp_id"]);
        assert_eq!(rows, vec![
            vec!["4".to_string(), "O".to_string(), "SER".to_string()],
            vec!["6".to_string(), "OG".to_string(), "SER".to_string()],
        ]);
    }
}
