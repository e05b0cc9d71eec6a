//! Square matrices of dimension 2, 3 or 4
//!
//! Storage is row-major. Determinants are computed by cofactor expansion down to the 2x2 case,
//! which is all the inversion of 4x4 transforms needs.

use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use approx::AbsDiffEq;
use thiserror::Error;

use crate::{Tuple, EPSILON};

const MAX_SIZE: usize = 4;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MatrixError {
    /// The determinant is zero, so there is no inverse
    #[error("matrix is not invertible (determinant {determinant})")]
    NotInvertible { determinant: f64 },
}

/// A square matrix with `size` rows and columns
#[derive(Clone, Copy)]
pub struct Matrix {
    size: usize,
    data: [f64; MAX_SIZE * MAX_SIZE],
}
impl Matrix {
    /// A `size` x `size` matrix of zeros
    pub fn zeros(size: usize) -> Self {
        debug_assert!((2..=MAX_SIZE).contains(&size), "unsupported size {size}");
        Self {
            size,
            data: [0.0; MAX_SIZE * MAX_SIZE],
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from rows, e.g. `Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]])`
    pub fn from_rows<const N: usize>(rows: [[f64; N]; N]) -> Self {
        let mut m = Self::zeros(N);
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                m[(row, col)] = *value;
            }
        }
        m
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                out[(col, row)] = self[(row, col)];
            }
        }
        out
    }

    pub fn determinant(&self) -> f64 {
        if self.size == 2 {
            return self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)];
        }
        (0..self.size)
            .map(|col| self[(0, col)] * self.cofactor(0, col))
            .sum()
    }

    /// Copy of this matrix with `row` and `col` removed
    pub fn submatrix(&self, row: usize, col: usize) -> Self {
        let mut out = Self::zeros(self.size - 1);
        let kept_rows = (0..self.size).filter(|&r| r != row);
        for (out_row, r) in kept_rows.enumerate() {
            let kept_cols = (0..self.size).filter(|&c| c != col);
            for (out_col, c) in kept_cols.enumerate() {
                out[(out_row, out_col)] = self[(r, c)];
            }
        }
        out
    }

    pub fn minor(&self, row: usize, col: usize) -> f64 {
        if self.size == 2 {
            // The 1x1 submatrix is the opposite corner
            return self[(1 - row, 1 - col)];
        }
        self.submatrix(row, col).determinant()
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Non-zero, finite determinant
    pub fn is_invertible(&self) -> bool {
        let determinant = self.determinant();
        determinant != 0.0 && determinant.is_finite()
    }

    pub fn inverse(&self) -> Result<Self, MatrixError> {
        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(MatrixError::NotInvertible { determinant });
        }

        let mut out = Self::zeros(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                // Transposed on write
                out[(col, row)] = self.cofactor(row, col) / determinant;
            }
        }
        Ok(out)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        debug_assert!(row < self.size && col < self.size);
        &self.data[row * MAX_SIZE + col]
    }
}
impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        debug_assert!(row < self.size && col < self.size);
        &mut self.data[row * MAX_SIZE + col]
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        assert_eq!(self.size, rhs.size, "matrix size mismatch");
        let mut out = Self::zeros(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                out[(row, col)] = (0..self.size)
                    .map(|k| self[(row, k)] * rhs[(k, col)])
                    .sum();
            }
        }
        out
    }
}

impl Mul<Tuple> for Matrix {
    type Output = Tuple;

    fn mul(self, rhs: Tuple) -> Tuple {
        assert_eq!(self.size, 4, "only 4x4 matrices transform tuples");
        let row = |r: usize| (0..4).map(|k| self[(r, k)] * rhs[k]).sum::<f64>();
        Tuple::new(row(0), row(1), row(2), row(3))
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.size == other.size
            && (0..self.size).all(|row| {
                (0..self.size).all(|col| (self[(row, col)] - other[(row, col)]).abs() < epsilon)
            })
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<&[f64]> = (0..self.size)
            .map(|row| &self.data[row * MAX_SIZE..row * MAX_SIZE + self.size])
            .collect();
        f.debug_struct("Matrix")
            .field("size", &self.size)
            .field("rows", &rows)
            .finish()
    }
}
