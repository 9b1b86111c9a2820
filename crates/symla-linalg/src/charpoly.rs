//! Characteristic polynomial.

use symla_ring::RingElement;

use crate::determinant::DeterminantAlgorithm;
use crate::error::{MatrixError, MatrixResult};
use crate::matrix::Matrix;

impl<R: RingElement> Matrix<R> {
    /// Computes the characteristic polynomial `det(A - lambda*I)`.
    ///
    /// Note the sign convention: this is `(-1)^n` times the monic
    /// polynomial `det(lambda*I - A)`.
    ///
    /// Matrices of plain numbers use Leverrier's trace recursion, which needs
    /// one matrix product per coefficient. Otherwise the determinant of
    /// `A - lambda*I` is expanded and collected in powers of `lambda`.
    ///
    /// # Errors
    ///
    /// - `NonSquareMatrix` if the matrix is not square
    /// - `InvalidArgument` if `lambda` is not a symbol
    pub fn charpoly(&self, lambda: &R) -> MatrixResult<R> {
        let n = self.ensure_square("charpoly")?;
        if !lambda.is_symbol() {
            return Err(MatrixError::InvalidArgument(format!(
                "charpoly expects a symbol, found {lambda:?}"
            )));
        }

        if self.is_numeric() {
            return self.leverrier(n, lambda);
        }

        let mut shifted = self.clone();
        for i in 0..n {
            shifted[(i, i)] = shifted[(i, i)].clone() - lambda.clone();
        }
        Ok(shifted
            .determinant(DeterminantAlgorithm::Automatic)?
            .collect(lambda))
    }

    fn leverrier(&self, n: usize, lambda: &R) -> MatrixResult<R> {
        let power = |k: usize| lambda.pow(u32::try_from(k).unwrap_or(u32::MAX));

        let mut b = self.clone();
        let mut c = b.trace()?;
        let mut poly = power(n) - c.clone() * power(n - 1);
        for i in 1..n {
            for j in 0..n {
                b[(j, j)] = b[(j, j)].clone() - c.clone();
            }
            b = self.mul(&b)?;
            let divisor = R::from_i64(i64::try_from(i + 1).unwrap_or(i64::MAX));
            c = b.trace()?.div(&divisor);
            poly = poly - c.clone() * power(n - i - 1);
        }

        if n % 2 == 1 {
            Ok((-poly).expand())
        } else {
            Ok(poly.expand())
        }
    }
}
