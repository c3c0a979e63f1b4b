#[cfg(test)]
mod test_hybridization_inference {
    use rotascan_chem::{Hybridization, ParameterRegistry};
    use rotascan_rotamers::{assign_connections, assign_hybridization, count_implicit_hydrogens,
                            explicit_hydrogens, generalized_donor_angle, Diagnostics};
    use rotascan_structure::{SiteAtom, Structure};

    fn serine(with_hydroxyl_hydrogen: bool) -> Structure {
        let mut rows = vec![
            ["ATOM", "1", "N", "N", ".", "SER", "A", "1", "1", "-1.458", "0.000", "0.000", "1"],
            ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "1", "0.000", "0.000", "0.000", "1"],
            ["ATOM", "3", "C", "C", ".", "SER", "A", "1", "1", "0.538", "1.428", "0.000", "1"],
            ["ATOM", "4", "O", "O", ".", "SER", "A", "1", "1", "1.755", "1.556", "0.000", "1"],
            ["ATOM", "5", "C", "CB", ".", "SER", "A", "1", "1", "0.529", "-0.775", "1.195", "1"],
            ["ATOM", "6", "O", "OG", ".", "SER", "A", "1", "1", "-0.411", "-1.770", "1.568", "1"],
        ];
        if with_hydroxyl_hydrogen {
            rows.push(["ATOM", "7", "H", "HG", ".", "SER", "A", "1", "1", "-1.047", "-2.443", "1.820", "1"]);
        }
        let mut strctr = Structure::new("fixture");
        for row in &rows { strctr.push_atom(SiteAtom::from_cif_row(row).unwrap()).unwrap(); }
        let registry = ParameterRegistry::new();
        assign_connections(&mut strctr, &registry, &Diagnostics::new());
        return strctr;
    }

    #[test]
    fn steric_numbers_decide_the_states() {
        let mut strctr = serine(true);
        let registry = ParameterRegistry::new();
        assign_hybridization(&mut strctr, &registry);

        // --- CA: three heavy neighbors plus the implicit HA
        assert_eq!(strctr.atom(2).unwrap().hybridization, Some(Hybridization::Sp3));
        // --- the hydroxyl oxygen: CB plus its hydrogen
        assert_eq!(strctr.atom(6).unwrap().hybridization, Some(Hybridization::Sp3));
        // --- the carbonyl oxygen has a single neighbor
        assert_eq!(strctr.atom(4).unwrap().hybridization, Some(Hybridization::Sp2));
        // --- the amide nitrogen: CA plus the implicit amide hydrogen
        assert_eq!(strctr.atom(1).unwrap().hybridization, Some(Hybridization::Sp2));
        // --- hydrogens are never classified
        assert_eq!(strctr.atom(7).unwrap().hybridization, None);
    }

    #[test]
    fn implicit_hydrogens_complete_the_count() {
        let strctr = serine(false);
        let registry = ParameterRegistry::new();
        let hydroxyl = strctr.atom(6).unwrap();
        // --- the table expects HG; the input carries no hydrogens at all
        assert_eq!(count_implicit_hydrogens(hydroxyl, &strctr, &registry), 1);
        assert!(explicit_hydrogens(hydroxyl, &strctr).is_empty());

        let strctr = serine(true);
        let hydroxyl = strctr.atom(6).unwrap();
        assert_eq!(count_implicit_hydrogens(hydroxyl, &strctr, &registry), 0);
        assert_eq!(explicit_hydrogens(hydroxyl, &strctr), vec![7]);
    }

    #[test]
    fn donor_angles_follow_the_state() {
        let mut strctr = serine(true);
        let registry = ParameterRegistry::new();
        assign_hybridization(&mut strctr, &registry);

        let hydroxyl = strctr.atom(6).unwrap();
        assert!((generalized_donor_angle(hydroxyl).to_degrees() - 109.5).abs() < 1e-10);
        let amide = strctr.atom(1).unwrap();
        assert!((generalized_donor_angle(amide).to_degrees() - 120.0).abs() < 1e-10);
    }
}
