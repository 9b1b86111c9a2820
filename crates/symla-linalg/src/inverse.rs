//! Matrix inversion.

use symla_ring::RingElement;

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::Matrix;
use crate::solve::SolveAlgorithm;

impl<R: RingElement> Matrix<R> {
    /// Computes the inverse by solving `self * X = I`.
    ///
    /// # Errors
    ///
    /// - `NonSquareMatrix` if the matrix is not square
    /// - `SingularMatrix` if the matrix is not invertible
    pub fn inverse(&self) -> MatrixResult<Self> {
        self.inverse_with(SolveAlgorithm::Automatic)
    }

    /// Computes the inverse with an explicit elimination strategy.
    ///
    /// # Errors
    ///
    /// See [`Matrix::inverse`].
    pub fn inverse_with(&self, algorithm: SolveAlgorithm) -> MatrixResult<Self> {
        let n = self.ensure_square("inverse")?;
        let identity = Self::identity(n);
        let vars = Self::from_flat(n, n, (0..n * n).map(|_| R::fresh_symbol()).collect());

        match self.solve(&vars, &identity, algorithm) {
            Err(MatrixError::InconsistentSystem) => Err(MatrixError::SingularMatrix),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symla_ring::Expr;

    fn n(v: i64) -> Expr {
        Expr::integer(v)
    }

    #[test]
    fn test_two_by_two() {
        let a = Matrix::from_rows(vec![vec![n(1), n(2)], vec![n(3), n(4)]]);
        let expected = Matrix::from_rows(vec![
            vec![n(-2), n(1)],
            vec![Expr::rational(3, 2), Expr::rational(-1, 2)],
        ]);
        for algo in [
            SolveAlgorithm::Automatic,
            SolveAlgorithm::Gauss,
            SolveAlgorithm::DivisionFree,
            SolveAlgorithm::FractionFree,
        ] {
            assert_eq!(a.inverse_with(algo).unwrap(), expected, "{algo:?}");
        }
    }

    #[test]
    fn test_symbolic() {
        let x = Expr::symbol("x");
        // [[x, 1], [0, x]]^-1 = [[1/x, -1/x^2], [0, 1/x]]
        let a = Matrix::from_rows(vec![vec![x.clone(), n(1)], vec![n(0), x.clone()]]);
        let inv = a.inverse().unwrap();
        assert_eq!(inv[(0, 0)], n(1).div(&x));
        assert_eq!(inv[(0, 1)], -n(1).div(&(x.clone() * x.clone())));
        assert!(inv[(1, 0)].is_zero());
        assert_eq!(inv[(1, 1)], n(1).div(&x));
    }

    #[test]
    fn test_singular() {
        let a = Matrix::from_rows(vec![vec![n(1), n(2)], vec![n(2), n(4)]]);
        assert_eq!(a.inverse(), Err(MatrixError::SingularMatrix));

        let x = Expr::symbol("x");
        let b = Matrix::from_rows(vec![vec![x.clone(), x.clone()], vec![n(1), n(1)]]);
        assert_eq!(b.inverse(), Err(MatrixError::SingularMatrix));
    }

    #[test]
    fn test_non_square() {
        let a = Matrix::from_rows(vec![vec![n(1), n(2)]]);
        assert!(matches!(a.inverse(), Err(MatrixError::NonSquareMatrix { .. })));
    }
}
