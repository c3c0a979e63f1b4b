use std::fmt;
use std::ops::{Index, IndexMut, MulAssign};
use crate::calc::Vec3;

/// Represents a 3x3 matrix, e.g. for linear 3D transformations.
///
/// Internally the matrix elements are stored as an `[f64; 9]` array in the
/// order as follows:
/// ```text
///     | 0 1 2 |
/// m = | 3 4 5 |
///     | 6 7 8 |
/// ```
///
/// # Example
/// ```rust
/// use rotascan_structure::calc::{Matrix3x3, Vec3};
///
/// let vx = Vec3::new(0.0, 3.0, 6.0);
/// let vy = Vec3::new(1.0, 4.0, 7.0);
/// let vz = Vec3::new(2.0, 5.0, 8.0);
/// let mtx = Matrix3x3::from_column_vectors(&vx, &vy, &vz);
/// assert_eq!(mtx[0], 0.0); assert_eq!(mtx[3], 3.0); assert_eq!(mtx[7], 7.0);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Matrix3x3 {
    array: [f64; 9],
}

impl Index<usize> for Matrix3x3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.array[i]
    }
}

impl IndexMut<usize> for Matrix3x3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.array[i]
    }
}

impl fmt::Debug for Matrix3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "[ [{:.2}, {:.2}, {:.2}], [{:.2}, {:.2}, {:.2}], [{:.2}, {:.2}, {:.2}] ]",
            self.array[0], self.array[1], self.array[2], self.array[3], self.array[4],
            self.array[5], self.array[6], self.array[7], self.array[8]
        )
    }
}

impl MulAssign<f64> for Matrix3x3 {
    /// Provides the `*=` operator that multiplies this matrix by a scalar value
    fn mul_assign(&mut self, scalar: f64) {
        for i in 0..9 { self[i] *= scalar; }
    }
}

impl Matrix3x3 {

    /// Creates a matrix from an array of 9 values given in row-major order
    pub fn from_array(array: [f64; 9]) -> Matrix3x3 { Matrix3x3 { array } }

    /// Creates the identity matrix
    pub fn identity() -> Matrix3x3 {
        Matrix3x3 { array: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0] }
    }

    /// Creates a matrix whose columns are the three given vectors
    pub fn from_column_vectors(cx: &Vec3, cy: &Vec3, cz: &Vec3) -> Matrix3x3 {
        Matrix3x3 { array: [cx.x, cy.x, cz.x, cx.y, cy.y, cz.y, cx.z, cy.z, cz.z] }
    }

    /// Provides the element of a given row and column
    pub fn elem(&self, row: usize, column: usize) -> f64 { self.array[row * 3 + column] }

    /// Returns a given column of this matrix as a vector
    pub fn column(&self, column: usize) -> Vec3 {
        Vec3::new(self.array[column], self.array[3 + column], self.array[6 + column])
    }

    /// Transposes this matrix in place
    pub fn transpose(&mut self) {
        self.array.swap(1, 3);
        self.array.swap(2, 6);
        self.array.swap(5, 7);
    }

    /// Multiplies a given vector by this matrix; the result is stored in the input vector
    pub fn mul_vec_mut(&self, v: &mut Vec3) {
        let x = self.array[0] * v.x + self.array[1] * v.y + self.array[2] * v.z;
        let y = self.array[3] * v.x + self.array[4] * v.y + self.array[5] * v.z;
        let z = self.array[6] * v.x + self.array[7] * v.y + self.array[8] * v.z;
        v.set3(x, y, z);
    }
}
