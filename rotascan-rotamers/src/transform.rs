use std::collections::BTreeSet;

use rotascan_structure::calc::Vec3;

use crate::Expr;

/// A 4x4 affine transform whose entries are symbolic expressions.
///
/// Entries are stored row-major; a purely numeric transform holds only
/// constant entries (the smart constructors of [`Expr`] fold such entries on
/// composition), while rotations around rotatable bonds keep the angle
/// symbolic. Transforms compose by matrix multiplication and act on column
/// vectors, so in the product ``a.multiply(&b)`` the transform ``b`` is
/// applied first.
///
/// # Example
/// ```
/// use rotascan_rotamers::SymMatrix4;
/// use rotascan_structure::calc::Vec3;
/// use std::f64::consts::FRAC_PI_2;
/// // --- a numeric rotation by 90 degrees around the z axis
/// let rot = SymMatrix4::rotation_z(FRAC_PI_2);
/// let p = rot.apply(&[], &Vec3::new(1.0, 0.0, 0.0));
/// assert!((p.y - 1.0).abs() < 1e-12);
/// // --- the same rotation with a symbolic angle
/// let rot = SymMatrix4::rotation_z_var(0);
/// let p = rot.apply(&[FRAC_PI_2], &Vec3::new(1.0, 0.0, 0.0));
/// assert!((p.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct SymMatrix4 {
    entries: [Expr; 16],
}

impl SymMatrix4 {

    /// The identity transform
    pub fn identity() -> SymMatrix4 {
        let mut entries = std::array::from_fn(|_| Expr::constant(0.0));
        for i in 0..4 { entries[i * 4 + i] = Expr::constant(1.0); }
        SymMatrix4 { entries }
    }

    /// Creates a transform from 16 numeric entries given in row-major order
    pub fn from_array(values: [f64; 16]) -> SymMatrix4 {
        SymMatrix4 { entries: std::array::from_fn(|i| Expr::constant(values[i])) }
    }

    /// A translation by a given vector
    pub fn translation(t: &Vec3) -> SymMatrix4 {
        SymMatrix4::from_array([
            1.0, 0.0, 0.0, t.x,
            0.0, 1.0, 0.0, t.y,
            0.0, 0.0, 1.0, t.z,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A numeric rotation around the x axis
    pub fn rotation_x(angle: f64) -> SymMatrix4 {
        let (s, c) = angle.sin_cos();
        SymMatrix4::from_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A numeric rotation around the y axis
    pub fn rotation_y(angle: f64) -> SymMatrix4 {
        let (s, c) = angle.sin_cos();
        SymMatrix4::from_array([
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A numeric rotation around the z axis
    pub fn rotation_z(angle: f64) -> SymMatrix4 {
        let (s, c) = angle.sin_cos();
        SymMatrix4::from_array([
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// The canonical bond-axis rotation: a rotation around the z axis by a
    /// symbolic angle
    pub fn rotation_z_var(variable: usize) -> SymMatrix4 {
        let mut m = SymMatrix4::identity();
        let cos = Expr::cos(Expr::variable(variable));
        let sin = Expr::sin(Expr::variable(variable));
        m.entries[0] = cos.clone();
        m.entries[1] = Expr::neg(sin.clone());
        m.entries[4] = sin;
        m.entries[5] = cos;
        return m;
    }

    /// A rotation around the x axis by a symbolic angle
    pub fn rotation_x_var(variable: usize) -> SymMatrix4 {
        let mut m = SymMatrix4::identity();
        let cos = Expr::cos(Expr::variable(variable));
        let sin = Expr::sin(Expr::variable(variable));
        m.entries[5] = cos.clone();
        m.entries[6] = Expr::neg(sin.clone());
        m.entries[9] = sin;
        m.entries[10] = cos;
        return m;
    }

    /// A translation along the z axis by a symbolic length.
    ///
    /// Used by the bond-stretch transform, which slides an atom along its
    /// local bond axis.
    pub fn translation_z_var(variable: usize) -> SymMatrix4 {
        let mut m = SymMatrix4::identity();
        m.entries[11] = Expr::variable(variable);
        return m;
    }

    /// Provides the entry of a given row and column
    pub fn entry(&self, row: usize, column: usize) -> &Expr { &self.entries[row * 4 + column] }

    /// Multiplies this transform by another one; `other` is applied first
    pub fn multiply(&self, other: &SymMatrix4) -> SymMatrix4 {
        let mut entries = std::array::from_fn(|_| Expr::constant(0.0));
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = Expr::constant(0.0);
                for k in 0..4 {
                    sum = Expr::sum(sum, Expr::product(self.entry(row, k).clone(),
                                                       other.entry(k, col).clone()));
                }
                entries[row * 4 + col] = sum;
            }
        }
        return SymMatrix4 { entries };
    }

    /// Multiplies a sequence of transforms left to right.
    ///
    /// ``mult(&[a, b, c])`` returns ``a * b * c``; since transforms act on
    /// column vectors, the rightmost one is applied first.
    pub fn mult(factors: &[&SymMatrix4]) -> SymMatrix4 {
        let mut product = SymMatrix4::identity();
        for factor in factors { product = product.multiply(factor); }
        return product;
    }

    /// Applies this transform to a point, substituting the given variable values.
    pub fn apply(&self, variables: &[f64], p: &Vec3) -> Vec3 {
        let mut out = [0.0; 3];
        for (row, value) in out.iter_mut().enumerate() {
            *value = self.entry(row, 0).eval(variables) * p.x
                + self.entry(row, 1).eval(variables) * p.y
                + self.entry(row, 2).eval(variables) * p.z
                + self.entry(row, 3).eval(variables);
        }
        return Vec3::new(out[0], out[1], out[2]);
    }

    /// Collects the indexes of all variables appearing in this transform
    pub fn variables(&self) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        for e in &self.entries { e.collect_variables(&mut out); }
        return out;
    }
}
