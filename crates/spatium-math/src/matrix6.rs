//! A 6x6 matrix, split addressable as four 3x3 corner blocks.

use crate::helpers::equal;
use crate::matrix3::Matrix3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign};

/// One of the four 3x3 blocks of a [`Matrix6`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matrix6Corner {
    /// Rows 0..3, columns 0..3.
    TopLeft,
    /// Rows 0..3, columns 3..6.
    TopRight,
    /// Rows 3..6, columns 0..3.
    BottomLeft,
    /// Rows 3..6, columns 3..6.
    BottomRight,
}

impl Matrix6Corner {
    fn offsets(self) -> (usize, usize) {
        match self {
            Matrix6Corner::TopLeft => (0, 0),
            Matrix6Corner::TopRight => (0, 3),
            Matrix6Corner::BottomLeft => (3, 0),
            Matrix6Corner::BottomRight => (3, 3),
        }
    }
}

/// A row-major 6x6 matrix of f64.
///
/// Commonly used for spatial inertia and stiffness operators, where the
/// corner blocks carry distinct physical meaning.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Matrix6 {
    data: [[f64; 6]; 6],
}

impl Matrix6 {
    /// The identity matrix.
    pub const IDENTITY: Self = {
        let mut data = [[0.0; 6]; 6];
        let mut i = 0;
        while i < 6 {
            data[i][i] = 1.0;
            i += 1;
        }
        Self { data }
    };

    /// The all-zero matrix.
    pub const ZERO: Self = Self { data: [[0.0; 6]; 6] };

    /// A matrix from 36 values in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        v00: f64, v01: f64, v02: f64, v03: f64, v04: f64, v05: f64,
        v10: f64, v11: f64, v12: f64, v13: f64, v14: f64, v15: f64,
        v20: f64, v21: f64, v22: f64, v23: f64, v24: f64, v25: f64,
        v30: f64, v31: f64, v32: f64, v33: f64, v34: f64, v35: f64,
        v40: f64, v41: f64, v42: f64, v43: f64, v44: f64, v45: f64,
        v50: f64, v51: f64, v52: f64, v53: f64, v54: f64, v55: f64,
    ) -> Self {
        Self {
            data: [
                [v00, v01, v02, v03, v04, v05],
                [v10, v11, v12, v13, v14, v15],
                [v20, v21, v22, v23, v24, v25],
                [v30, v31, v32, v33, v34, v35],
                [v40, v41, v42, v43, v44, v45],
                [v50, v51, v52, v53, v54, v55],
            ],
        }
    }

    /// The value at a row and column, with indices clamped to 5.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row.min(5)][col.min(5)]
    }

    /// Set the value at a row and column. Returns false when either
    /// index is out of range.
    pub fn set_value(&mut self, row: usize, col: usize, value: f64) -> bool {
        if row > 5 || col > 5 {
            return false;
        }
        self.data[row][col] = value;
        true
    }

    /// One 3x3 corner block as a [`Matrix3`].
    pub fn submatrix(&self, corner: Matrix6Corner) -> Matrix3 {
        let (r, c) = corner.offsets();
        Matrix3::new(
            self.data[r][c],
            self.data[r][c + 1],
            self.data[r][c + 2],
            self.data[r + 1][c],
            self.data[r + 1][c + 1],
            self.data[r + 1][c + 2],
            self.data[r + 2][c],
            self.data[r + 2][c + 1],
            self.data[r + 2][c + 2],
        )
    }

    /// Overwrite one 3x3 corner block.
    pub fn set_submatrix(&mut self, corner: Matrix6Corner, m: Matrix3) {
        let (r, c) = corner.offsets();
        for i in 0..3 {
            for j in 0..3 {
                self.data[r + i][c + j] = m.get(i, j);
            }
        }
    }

    /// Transpose this matrix in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// The transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..6 {
            for j in 0..6 {
                out.data[i][j] = self.data[j][i];
            }
        }
        out
    }

    /// Elementwise comparison within a tolerance.
    pub fn equal(&self, other: &Self, tol: f64) -> bool {
        for i in 0..6 {
            for j in 0..6 {
                if !equal(self.data[i][j], other.data[i][j], tol) {
                    return false;
                }
            }
        }
        true
    }
}

impl PartialEq for Matrix6 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-6)
    }
}

impl Add for Matrix6 {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for Matrix6 {
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..6 {
            for j in 0..6 {
                self.data[i][j] += rhs.data[i][j];
            }
        }
    }
}

impl Mul for Matrix6 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..6 {
            for j in 0..6 {
                let mut sum = 0.0;
                for k in 0..6 {
                    sum += self.data[i][k] * rhs.data[k][j];
                }
                out.data[i][j] = sum;
            }
        }
        out
    }
}

impl MulAssign for Matrix6 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Index<(usize, usize)> for Matrix6 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row.min(5)][col.min(5)]
    }
}

impl IndexMut<(usize, usize)> for Matrix6 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row.min(5)][col.min(5)]
    }
}

impl fmt::Display for Matrix6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for row in &self.data {
            for v in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{v}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting() -> Matrix6 {
        let mut m = Matrix6::ZERO;
        for i in 0..6 {
            for j in 0..6 {
                m.set_value(i, j, (i * 6 + j) as f64);
            }
        }
        m
    }

    #[test]
    fn test_constants() {
        assert_eq!(Matrix6::IDENTITY.get(0, 0), 1.0);
        assert_eq!(Matrix6::IDENTITY.get(5, 5), 1.0);
        assert_eq!(Matrix6::IDENTITY.get(0, 5), 0.0);
        assert_eq!(Matrix6::ZERO.get(3, 3), 0.0);
    }

    #[test]
    fn test_submatrix() {
        let m = counting();
        let tl = m.submatrix(Matrix6Corner::TopLeft);
        assert_eq!(tl.get(0, 0), 0.0);
        assert_eq!(tl.get(2, 2), 14.0);
        let br = m.submatrix(Matrix6Corner::BottomRight);
        assert_eq!(br.get(0, 0), 21.0);
        assert_eq!(br.get(2, 2), 35.0);

        let mut m = Matrix6::ZERO;
        m.set_submatrix(Matrix6Corner::TopRight, Matrix3::IDENTITY);
        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.get(2, 5), 1.0);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn test_set_value_bounds() {
        let mut m = Matrix6::ZERO;
        assert!(m.set_value(5, 5, 2.0));
        assert_eq!(m.get(5, 5), 2.0);
        assert!(!m.set_value(6, 0, 1.0));
        assert!(!m.set_value(0, 6, 1.0));
    }

    #[test]
    fn test_mul_identity() {
        let m = counting();
        assert_eq!(m * Matrix6::IDENTITY, m);
        assert_eq!(Matrix6::IDENTITY * m, m);
    }

    #[test]
    fn test_add() {
        let m = counting();
        let sum = m + m;
        assert_eq!(sum.get(1, 1), 14.0);
        assert_eq!(sum.get(5, 5), 70.0);
    }

    #[test]
    fn test_transpose() {
        let m = counting();
        let t = m.transposed();
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(t.get(i, j), m.get(j, i));
            }
        }
        let mut m2 = m;
        m2.transpose();
        assert_eq!(m2, t);
    }

    #[test]
    fn test_index_clamped() {
        let m = counting();
        assert_eq!(m[(10, 10)], 35.0);
        assert_eq!(m[(0, 1)], 1.0);
    }

    #[test]
    fn test_display() {
        let mut m = Matrix6::ZERO;
        m.set_value(0, 0, 1.0);
        let s = m.to_string();
        assert!(s.starts_with("1 0 0"));
        assert_eq!(s.split(' ').count(), 36);
    }
}
