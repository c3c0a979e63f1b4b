#[cfg(test)]
mod test_symbolic_transforms {
    use std::f64::consts::{FRAC_PI_2, PI};
    use rotascan_rotamers::rotatable_bonds::{bond_angle_transform, bond_stretch_transform,
                                             dihedral_rotation_transform};
    use rotascan_rotamers::SymMatrix4;
    use rotascan_structure::assert_vec3_eq;
    use rotascan_structure::calc::Vec3;

    #[test]
    fn symbolic_rotation_matches_numeric_rotation() {
        let p = Vec3::new(0.3, -1.2, 2.5);
        let symbolic = SymMatrix4::rotation_z_var(0);
        for angle in [0.0, 0.4, FRAC_PI_2, PI, 2.7, -1.1] {
            let expected = SymMatrix4::rotation_z(angle).apply(&[], &p);
            let rotated = symbolic.apply(&[angle], &p);
            assert_vec3_eq!(rotated, expected, 1e-12, "rotation_z mismatch");
        }
    }

    #[test]
    fn purely_numeric_composition_collapses_to_constants() {
        let product = SymMatrix4::mult(&[
            &SymMatrix4::translation(&Vec3::new(1.0, 2.0, 3.0)),
            &SymMatrix4::rotation_x(0.7),
            &SymMatrix4::rotation_y(-0.3),
        ]);
        assert!(product.variables().is_empty());
    }

    #[test]
    fn multiplication_applies_the_right_factor_first() {
        let p = Vec3::new(1.0, 0.0, 0.0);
        // --- rotate around z by 90 deg, then translate
        let translate_then = SymMatrix4::translation(&Vec3::new(5.0, 0.0, 0.0))
            .multiply(&SymMatrix4::rotation_z(FRAC_PI_2));
        let q = translate_then.apply(&[], &p);
        assert_vec3_eq!(q, Vec3::new(5.0, 1.0, 0.0), 1e-12, "rotation must act first");
    }

    /// Rodrigues' rotation of a point around an axis through two points.
    fn rotate_about_axis(p: &Vec3, start: &Vec3, end: &Vec3, angle: f64) -> Vec3 {
        let mut axis = end.clone();
        axis -= start;
        axis.normalize();
        let mut w = p.clone();
        w -= start;
        let cos_theta = angle.cos();
        let sin_theta = angle.sin();
        let axis_component = Vec3::dot(&axis, &w);
        let cross = Vec3::cross(&axis, &w);
        let x = w.x * cos_theta + cross.x * sin_theta + axis.x * axis_component * (1.0 - cos_theta) + start.x;
        let y = w.y * cos_theta + cross.y * sin_theta + axis.y * axis_component * (1.0 - cos_theta) + start.y;
        let z = w.z * cos_theta + cross.z * sin_theta + axis.z * axis_component * (1.0 - cos_theta) + start.z;
        return Vec3::new(x, y, z);
    }

    #[test]
    fn dihedral_transform_rotates_around_the_bond_axis() {
        let a = Vec3::new(-1.458, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.529, -0.775, 1.195);
        let p = Vec3::new(-0.411, -1.770, 1.568);

        let transform = dihedral_rotation_transform(&a, &b, &c, 0);
        for angle in [0.0, 0.8, FRAC_PI_2, PI, -2.3, 5.9] {
            let expected = rotate_about_axis(&p, &b, &c, angle);
            let rotated = transform.apply(&[angle], &p);
            assert_vec3_eq!(rotated, expected, 1e-9, "bond rotation mismatch");
        }
    }

    #[test]
    fn dihedral_transform_at_zero_is_the_identity() {
        let a = Vec3::new(-1.458, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.529, -0.775, 1.195);
        let transform = dihedral_rotation_transform(&a, &b, &c, 0);
        for p in [Vec3::new(-0.411, -1.770, 1.568), Vec3::new(3.0, 2.0, -1.0), c.clone()] {
            let q = transform.apply(&[0.0], &p);
            assert_vec3_eq!(q, p, 1e-9, "identity at zero angle");
        }
    }

    #[test]
    fn dihedral_transform_along_a_gimbal_axis() {
        // --- a bond aligned with the global z axis exercises the degenerate
        // --- Euler branch
        let a = Vec3::new(1.0, 0.0, -0.5);
        let b = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 1.5);
        let p = Vec3::new(1.0, 1.0, 2.0);
        let transform = dihedral_rotation_transform(&a, &b, &c, 0);
        for angle in [0.0, 1.1, PI] {
            let expected = rotate_about_axis(&p, &b, &c, angle);
            let rotated = transform.apply(&[angle], &p);
            assert_vec3_eq!(rotated, expected, 1e-9, "gimbal-axis rotation mismatch");
        }
    }

    #[test]
    fn axis_atoms_stay_on_the_axis() {
        let a = Vec3::new(-1.458, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.529, -0.775, 1.195);
        let transform = dihedral_rotation_transform(&a, &b, &c, 0);
        let b_rotated = transform.apply(&[2.1], &b);
        let c_rotated = transform.apply(&[2.1], &c);
        assert_vec3_eq!(b_rotated, b, 1e-9, "axis atom b moved");
        assert_vec3_eq!(c_rotated, c, 1e-9, "axis atom c moved");
    }

    #[test]
    fn bond_stretch_slides_along_the_axis() {
        let a = Vec3::new(-1.458, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.529, -0.775, 1.195);
        let transform = bond_stretch_transform(&a, &b, &c, 0);

        let mut axis = c.clone();
        axis -= &b;
        axis.normalize();
        let stretched = transform.apply(&[0.25], &c);
        let expected = Vec3::new(c.x + 0.25 * axis.x, c.y + 0.25 * axis.y, c.z + 0.25 * axis.z);
        assert_vec3_eq!(stretched, expected, 1e-9, "stretch along the bond axis");

        let unchanged = transform.apply(&[0.0], &c);
        assert_vec3_eq!(unchanged, c, 1e-9, "identity at zero stretch");
    }

    #[test]
    fn bond_angle_transform_at_zero_is_the_identity() {
        let a = Vec3::new(-1.458, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.529, -0.775, 1.195);
        let transform = bond_angle_transform(&a, &b, &c, 0, 1);
        let p = Vec3::new(-0.411, -1.770, 1.568);
        let q = transform.apply(&[0.0, 0.0], &p);
        assert_vec3_eq!(q, p, 1e-9, "identity at zero bend");
        // --- a bend by theta moves the point off its input position
        let bent = transform.apply(&[0.3, 0.0], &p);
        assert!(bent.distance_to(&p) > 1e-3);
    }
}
