#[cfg(test)]
mod test_rotamer_sampling {
    use std::f64::consts::PI;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use rotascan_chem::{Coefficients, ParameterRegistry, ParametersError};
    use rotascan_rotamers::{apply_sweep, assign_connections, assign_hybridization, sweep_residue,
                            sweep_residues, AngleGrid, Diagnostics, PotentialKind, RotamerError,
                            SweepConfig};
    use rotascan_structure::assert_delta;
    use rotascan_structure::calc::dihedral_angle4;
    use rotascan_structure::{ResidueKey, SiteAtom, Structure};

    /// An idealized serine; a clash partner one residue later is optional.
    fn fixture(with_clash_atom: bool) -> Structure {
        let mut rows = vec![
            ["ATOM", "1", "N", "N", ".", "SER", "A", "1", "1", "-1.458", "0.000", "0.000", "1"],
            ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "1", "0.000", "0.000", "0.000", "1"],
            ["ATOM", "3", "C", "C", ".", "SER", "A", "1", "1", "0.538", "1.428", "0.000", "1"],
            ["ATOM", "4", "O", "O", ".", "SER", "A", "1", "1", "1.755", "1.556", "0.000", "1"],
            ["ATOM", "5", "C", "CB", ".", "SER", "A", "1", "1", "0.529", "-0.775", "1.195", "1"],
            ["ATOM", "6", "O", "OG", ".", "SER", "A", "1", "1", "-0.411", "-1.770", "1.568", "1"],
        ];
        if with_clash_atom {
            rows.push(["HETATM", "7", "O", "O", ".", "HOH", "A", "1", "2", "-1.371", "-2.786", "1.949", "1"]);
        }
        let mut strctr = Structure::new("fixture");
        for row in &rows { strctr.push_atom(SiteAtom::from_cif_row(row).unwrap()).unwrap(); }
        return strctr;
    }

    fn serine_key() -> ResidueKey { ResidueKey::new(1, "A", "1", ".") }

    fn prepare(strctr: &mut Structure, registry: &ParameterRegistry) {
        let diagnostics = Diagnostics::new();
        assign_connections(strctr, registry, &diagnostics);
        assign_hybridization(strctr, registry);
    }

    fn current_chi0(strctr: &Structure) -> f64 {
        dihedral_angle4(&strctr.atom(1).unwrap().pos, &strctr.atom(2).unwrap().pos,
                        &strctr.atom(5).unwrap().pos, &strctr.atom(6).unwrap().pos)
    }

    fn assert_same_angle(measured: f64, target: f64) {
        let difference = (measured - target).rem_euclid(2.0 * PI);
        assert!(difference < 1e-9 || 2.0 * PI - difference < 1e-9,
                "angles differ: measured = {}, target = {}", measured, target);
    }

    #[test]
    fn zero_change_reproduces_the_input() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(false);
        prepare(&mut strctr, &registry);

        // --- an empty grid keeps every dihedral at its current value
        let config = SweepConfig::new(AngleGrid::new(), PotentialKind::HardSphere);
        let sweep = sweep_residue(&strctr, &registry, &serine_key(), &config,
                                  &Diagnostics::new()).unwrap();
        assert_eq!(sweep.count_rotamers(), 1);
        let rotamer = &sweep.rotamers[0];
        assert_eq!(rotamer.positions.len(), 1);
        let (moved_id, moved_pos) = &rotamer.positions[0];
        assert_eq!(*moved_id, 6);
        assert!(moved_pos.distance_to(&strctr.atom(6).unwrap().pos) < 1e-9);
    }

    #[test]
    fn serine_hard_sphere_sweep() {
        let mut coefficients = Coefficients::default();
        coefficients.apply_overrides("cutoff_atom=0.5").unwrap();
        let registry = ParameterRegistry::with_coefficients(coefficients);
        let mut strctr = fixture(false);
        prepare(&mut strctr, &registry);

        let mut grid = AngleGrid::new();
        grid.set_angle("chi0", vec![0.0, PI]);
        let config = SweepConfig::new(grid, PotentialKind::HardSphere);
        let sweep = sweep_residue(&strctr, &registry, &serine_key(), &config,
                                  &Diagnostics::new()).unwrap();

        // --- two rotamers, both clash-free, tied at the first rank, in grid order
        assert_eq!(sweep.count_rotamers(), 2);
        assert_eq!(sweep.rotamers[0].energy, 0.0);
        assert_eq!(sweep.rotamers[1].energy, 0.0);
        assert_eq!(sweep.rotamers[0].rank, 1);
        assert_eq!(sweep.rotamers[1].rank, 1);
        assert_delta!(sweep.rotamers[0].angles[0].1, 0.0, 1e-12);
        assert_delta!(sweep.rotamers[1].angles[0].1, PI, 1e-12);

        // --- the generated positions realize the requested absolute dihedrals
        for rotamer in &sweep.rotamers {
            let og = &rotamer.positions[0].1;
            let measured = dihedral_angle4(&strctr.atom(1).unwrap().pos, &strctr.atom(2).unwrap().pos,
                                           &strctr.atom(5).unwrap().pos, og);
            assert_same_angle(measured, rotamer.angles[0].1);
        }

        // --- pseudo-atoms land behind the last input atom, annotated
        let mut strctr = strctr;
        apply_sweep(&mut strctr, &sweep).unwrap();
        assert_eq!(strctr.count_atoms(), 8);
        let first = strctr.atom(7).unwrap();
        assert!(first.is_pseudo);
        assert_eq!(first.rank, Some(1));
        assert_eq!(first.energy, Some(0.0));
        assert_eq!(first.dihedral_angles_entry(), "chi0=0.00000");
        let second = strctr.atom(8).unwrap();
        assert_eq!(second.dihedral_angles_entry(), "chi0=3.14159");
    }

    #[test]
    fn rotation_preserves_the_bond_geometry() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(false);
        prepare(&mut strctr, &registry);
        let chi0 = current_chi0(&strctr);

        let mut grid = AngleGrid::new();
        grid.set_angle("chi0", vec![chi0 + PI / 2.0]);
        let config = SweepConfig::new(grid, PotentialKind::HardSphere);
        let sweep = sweep_residue(&strctr, &registry, &serine_key(), &config,
                                  &Diagnostics::new()).unwrap();
        assert_eq!(sweep.count_rotamers(), 1);

        let og = &sweep.rotamers[0].positions[0].1;
        let measured = dihedral_angle4(&strctr.atom(1).unwrap().pos, &strctr.atom(2).unwrap().pos,
                                       &strctr.atom(5).unwrap().pos, og);
        assert_same_angle(measured, chi0 + PI / 2.0);

        // --- a rotation never stretches the rotated bond
        let cb = &strctr.atom(5).unwrap().pos;
        let input_length = cb.distance_to(&strctr.atom(6).unwrap().pos);
        assert_delta!(cb.distance_to(og), input_length, 1e-9);
    }

    #[test]
    fn clashing_rotamers_rank_last() {
        let mut coefficients = Coefficients::default();
        coefficients.apply_overrides("r_sigma=0.5").unwrap();
        let registry = ParameterRegistry::with_coefficients(coefficients);
        let mut strctr = fixture(true);
        prepare(&mut strctr, &registry);
        strctr.mark_selection(&[1, 2, 3, 4, 5, 6], &[7]);
        let chi0 = current_chi0(&strctr);

        let mut grid = AngleGrid::new();
        grid.set_angle("chi0", vec![chi0, chi0 + PI]);
        let mut config = SweepConfig::new(grid, PotentialKind::HardSphere);
        let sweep = sweep_residue(&strctr, &registry, &serine_key(), &config,
                                  &Diagnostics::new()).unwrap();

        // --- the input conformation clashes with the water oxygen; the
        // --- flipped one escapes it
        assert_eq!(sweep.count_rotamers(), 2);
        assert_eq!(sweep.rotamers[0].energy, 0.0);
        assert_eq!(sweep.rotamers[0].rank, 1);
        assert_same_angle(sweep.rotamers[0].angles[0].1, chi0 + PI);
        assert_eq!(sweep.rotamers[1].energy, f64::INFINITY);
        assert_eq!(sweep.rotamers[1].rank, 2);

        // --- keeping the single best rotamer drops the clashing one
        config.top_rank = Some(1);
        let sweep = sweep_residue(&strctr, &registry, &serine_key(), &config,
                                  &Diagnostics::new()).unwrap();
        assert_eq!(sweep.count_rotamers(), 1);
        assert_eq!(sweep.rotamers[0].rank, 1);
        assert_eq!(sweep.rotamers[0].energy, 0.0);
    }

    /// Rodrigues' rotation of a point around an axis through two points.
    fn rotate_about_axis(p: &rotascan_structure::calc::Vec3, start: &rotascan_structure::calc::Vec3,
                         end: &rotascan_structure::calc::Vec3, angle: f64)
                         -> rotascan_structure::calc::Vec3 {
        use rotascan_structure::calc::Vec3;
        let mut axis = end.clone();
        axis -= start;
        axis.normalize();
        let mut w = p.clone();
        w -= start;
        let cos_theta = angle.cos();
        let sin_theta = angle.sin();
        let along = Vec3::dot(&axis, &w);
        let cross = Vec3::cross(&axis, &w);
        Vec3::new(
            w.x * cos_theta + cross.x * sin_theta + axis.x * along * (1.0 - cos_theta) + start.x,
            w.y * cos_theta + cross.y * sin_theta + axis.y * along * (1.0 - cos_theta) + start.y,
            w.z * cos_theta + cross.z * sin_theta + axis.z * along * (1.0 - cos_theta) + start.z)
    }

    #[test]
    fn hydrogens_rotate_with_their_heavy_atom() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(false);
        strctr.push_atom(SiteAtom::from_cif_row(
            &["ATOM", "7", "H", "HG", ".", "SER", "A", "1", "1", "-1.047", "-2.443", "1.820", "1"])
            .unwrap()).unwrap();
        prepare(&mut strctr, &registry);
        let chi0 = current_chi0(&strctr);
        let delta = 2.0 * PI / 3.0;

        let mut grid = AngleGrid::new();
        grid.set_angle("chi0", vec![chi0 + delta]);
        let mut config = SweepConfig::new(grid, PotentialKind::HardSphere);
        config.hydrogens_present = true;
        let sweep = sweep_residue(&strctr, &registry, &serine_key(), &config,
                                  &Diagnostics::new()).unwrap();

        // --- both the hydroxyl oxygen and its hydrogen move with chi0
        assert_eq!(sweep.count_rotamers(), 1);
        let rotamer = &sweep.rotamers[0];
        let moved_ids: Vec<i32> = rotamer.positions.iter().map(|(id, _)| *id).collect();
        assert_eq!(moved_ids, vec![6, 7]);

        // --- the hydrogen lands on its analytically rotated position
        let expected = rotate_about_axis(&strctr.atom(7).unwrap().pos, &strctr.atom(2).unwrap().pos,
                                         &strctr.atom(5).unwrap().pos, delta);
        assert!(rotamer.positions[1].1.distance_to(&expected) < 1e-6);
    }

    #[test]
    fn unknown_residues_yield_zero_rotamers() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(true);
        prepare(&mut strctr, &registry);

        let water = ResidueKey::new(2, "A", "1", ".");
        let config = SweepConfig::new(AngleGrid::from_step(PI), PotentialKind::HardSphere);
        let sweep = sweep_residue(&strctr, &registry, &water, &config,
                                  &Diagnostics::new()).unwrap();
        assert_eq!(sweep.count_rotamers(), 0);
    }

    #[test]
    fn energies_and_ranks_are_deterministic() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(true);
        prepare(&mut strctr, &registry);
        strctr.mark_selection(&[1, 2, 3, 4, 5, 6], &[7]);

        let config = SweepConfig::new(AngleGrid::from_step(PI / 2.0), PotentialKind::Composite);
        let diagnostics = Diagnostics::new();
        let first = sweep_residue(&strctr, &registry, &serine_key(), &config, &diagnostics).unwrap();
        let second = sweep_residue(&strctr, &registry, &serine_key(), &config, &diagnostics).unwrap();

        assert_eq!(first.count_rotamers(), 4);
        for (a, b) in first.rotamers.iter().zip(second.rotamers.iter()) {
            assert_eq!(a.energy.to_bits(), b.energy.to_bits());
            assert_eq!(a.rank, b.rank);
            assert_eq!(a.angles, b.angles);
        }
    }

    #[test]
    fn parallel_sweeps_match_serial_ones() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(true);
        prepare(&mut strctr, &registry);
        strctr.mark_selection(&[1, 2, 3, 4, 5, 6], &[7]);

        let keys = vec![serine_key(), ResidueKey::new(2, "A", "1", ".")];
        let config = SweepConfig::new(AngleGrid::from_step(PI / 2.0), PotentialKind::Composite);
        let diagnostics = Diagnostics::new();
        let serial = sweep_residues(&strctr, &registry, &keys, &config, &diagnostics, false).unwrap();
        let parallel = sweep_residues(&strctr, &registry, &keys, &config, &diagnostics, true).unwrap();

        assert_eq!(serial.len(), parallel.len());
        for (a, b) in serial.iter().zip(parallel.iter()) {
            assert_eq!(a.residue, b.residue);
            assert_eq!(a.count_rotamers(), b.count_rotamers());
            for (ra, rb) in a.rotamers.iter().zip(b.rotamers.iter()) {
                assert_eq!(ra.energy.to_bits(), rb.energy.to_bits());
            }
        }
    }

    #[test]
    fn cancellation_stops_a_sweep() {
        let registry = ParameterRegistry::new();
        let mut strctr = fixture(false);
        prepare(&mut strctr, &registry);

        let flag = Arc::new(AtomicBool::new(false));
        flag.store(true, Ordering::Relaxed);
        let mut config = SweepConfig::new(AngleGrid::from_step(PI / 2.0), PotentialKind::HardSphere);
        config.cancel = Some(flag);
        let result = sweep_residue(&strctr, &registry, &serine_key(), &config, &Diagnostics::new());
        assert!(matches!(result, Err(RotamerError::Cancelled { .. })));
    }

    #[test]
    fn broken_cutoffs_stop_the_run_before_sampling() {
        let mut coefficients = Coefficients::default();
        coefficients.apply_overrides("cutoff_start=5.0,cutoff_end=2.5").unwrap();
        let registry = ParameterRegistry::with_coefficients(coefficients);
        let mut strctr = fixture(false);
        prepare(&mut strctr, &registry);

        let config = SweepConfig::new(AngleGrid::from_step(PI), PotentialKind::Composite);
        let result = sweep_residues(&strctr, &registry, &[serine_key()], &config,
                                    &Diagnostics::new(), false);
        assert!(matches!(result,
                Err(RotamerError::ConfigurationError(ParametersError::NonMonotoneCutoffs { .. }))));
    }
}
