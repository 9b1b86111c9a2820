//! Matrix arithmetic: sums, products, scaling, transpose, trace and powers.

use symla_ring::RingElement;

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::Matrix;

impl<R: RingElement> Matrix<R> {
    fn ensure_same_shape(&self, other: &Self, op: &'static str) -> MatrixResult<()> {
        if self.rows() == other.rows() && self.cols() == other.cols() {
            Ok(())
        } else {
            Err(MatrixError::DimensionMismatch {
                op,
                left: (self.rows(), self.cols()),
                right: (other.rows(), other.cols()),
            })
        }
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless both matrices have the same shape.
    pub fn add(&self, other: &Self) -> MatrixResult<Self> {
        self.ensure_same_shape(other, "add")?;
        let entries = self
            .entries()
            .iter()
            .zip(other.entries())
            .map(|(a, b)| a.clone() + b.clone())
            .collect();
        Ok(Self::from_flat(self.rows(), self.cols(), entries))
    }

    /// Element-wise difference.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless both matrices have the same shape.
    pub fn sub(&self, other: &Self) -> MatrixResult<Self> {
        self.ensure_same_shape(other, "sub")?;
        let entries = self
            .entries()
            .iter()
            .zip(other.entries())
            .map(|(a, b)| a.clone() - b.clone())
            .collect();
        Ok(Self::from_flat(self.rows(), self.cols(), entries))
    }

    /// Matrix product `self * other`.
    ///
    /// Every product of entries is expanded as it is accumulated.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the inner dimensions differ.
    pub fn mul(&self, other: &Self) -> MatrixResult<Self> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                op: "mul",
                left: (self.rows(), self.cols()),
                right: (other.rows(), other.cols()),
            });
        }

        let mut result = Self::zeros(self.rows(), other.cols());
        for i in 0..self.rows() {
            for k in 0..self.cols() {
                let a = &self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.cols() {
                    let prod = (a.clone() * other[(k, j)].clone()).expand();
                    result[(i, j)] = result[(i, j)].clone() + prod;
                }
            }
        }
        Ok(result)
    }

    /// Scales all entries by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `NonCommutativeScalar` if the scalar does not commute.
    pub fn mul_scalar(&self, scalar: &R) -> MatrixResult<Self> {
        if !scalar.is_commutative() {
            return Err(MatrixError::NonCommutativeScalar);
        }
        Ok(self.map(|v| v.clone() * scalar.clone()))
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.cols(), self.rows());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                result[(j, i)] = self[(i, j)].clone();
            }
        }
        result
    }

    /// Sum of the diagonal entries.
    ///
    /// The result is brought into lowest terms if it is a proper rational
    /// function and expanded otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NonSquareMatrix` if the matrix is not square.
    pub fn trace(&self) -> MatrixResult<R> {
        let n = self.ensure_square("trace")?;
        let tr = (0..n).fold(R::zero(), |acc, i| acc + self[(i, i)].clone());
        if tr.is_rational_function() && !tr.is_polynomial() {
            Ok(tr.normal())
        } else {
            Ok(tr.expand())
        }
    }

    /// Raises a square matrix to an integer power.
    ///
    /// A negative exponent inverts the matrix first. `A^0` is the identity,
    /// even for singular `A`.
    ///
    /// # Errors
    ///
    /// - `NonSquareMatrix` if the matrix is not square
    /// - `Unsupported` if the exponent is not an exact integer or does not
    ///   fit in an `i64`
    /// - `SingularMatrix` for a negative exponent on a singular matrix
    pub fn pow(&self, exponent: &R) -> MatrixResult<Self> {
        let n = self.ensure_square("pow")?;
        if !exponent.is_integer() {
            return Err(MatrixError::Unsupported(format!(
                "matrix power with non-integer exponent {exponent:?}"
            )));
        }
        let Some(e) = exponent.to_i64() else {
            return Err(MatrixError::Unsupported(format!(
                "matrix power exponent {exponent:?} out of range"
            )));
        };

        let mut result = Self::identity(n);
        if e == 0 {
            return Ok(result);
        }
        let mut base = if e < 0 { self.inverse()? } else { self.clone() };
        let mut exp = e.unsigned_abs();

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base)?;
            }
        }

        Ok(result)
    }
}
