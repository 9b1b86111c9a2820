//! Determinant with heuristic algorithm selection.

use symla_ring::RingElement;
use tracing::debug;

use crate::error::MatrixResult;
use crate::matrix::Matrix;
use crate::minor::MAX_LAPLACE_DIM;

/// Determinant algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeterminantAlgorithm {
    /// Choose from matrix statistics.
    #[default]
    Automatic,
    /// Gaussian elimination; best for plain numbers.
    Gauss,
    /// Bareiss elimination; best for large sparse symbolic matrices.
    FractionFree,
    /// Division-free elimination; small matrices only.
    DivisionFree,
    /// Memoized minor expansion; best for dense symbolic matrices.
    Laplace,
}

/// Configuration for automatic determinant algorithm selection.
#[derive(Clone, Debug)]
pub struct DeterminantPolicy {
    /// Matrices with at most this many rows always use Laplace expansion.
    pub sparse_min_rows: usize,
    /// A matrix is sparse when `sparse_ratio * nonzero <= rows * cols`.
    pub sparse_ratio: usize,
}

impl Default for DeterminantPolicy {
    fn default() -> Self {
        Self {
            sparse_min_rows: 3,
            sparse_ratio: 5,
        }
    }
}

/// Statistics gathered in one pass over the entries.
#[derive(Clone, Copy, Debug)]
struct EntryStats {
    nonzero: usize,
    numeric: bool,
    needs_normal: bool,
}

impl<R: RingElement> Matrix<R> {
    fn entry_stats(&self) -> EntryStats {
        let mut stats = EntryStats {
            nonzero: 0,
            numeric: true,
            needs_normal: false,
        };
        for entry in self.entries() {
            if !entry.is_number() {
                stats.numeric = false;
            }
            let mut subs = R::Substitution::default();
            let rational = entry.to_rational(&mut subs);
            if !rational.is_zero() {
                stats.nonzero += 1;
            }
            if !rational.is_polynomial() && rational.is_rational_function() {
                stats.needs_normal = true;
            }
        }
        stats
    }

    /// Computes the determinant with the default selection policy.
    ///
    /// # Errors
    ///
    /// - `NonSquareMatrix` if the matrix is not square
    /// - `Unsupported` if Laplace expansion is requested explicitly on a
    ///   matrix larger than [`MAX_LAPLACE_DIM`]
    /// - `InternalConsistencyFault` if fraction-free elimination fails
    pub fn determinant(&self, algorithm: DeterminantAlgorithm) -> MatrixResult<R> {
        self.determinant_with_policy(algorithm, &DeterminantPolicy::default())
    }

    /// Computes the determinant.
    ///
    /// The result is in lowest terms if any entry is a proper rational
    /// function, and expanded otherwise.
    ///
    /// # Errors
    ///
    /// See [`Matrix::determinant`].
    pub fn determinant_with_policy(
        &self,
        algorithm: DeterminantAlgorithm,
        policy: &DeterminantPolicy,
    ) -> MatrixResult<R> {
        let n = self.ensure_square("determinant")?;
        let stats = self.entry_stats();

        let algorithm = match algorithm {
            DeterminantAlgorithm::Automatic => {
                let mut choice = DeterminantAlgorithm::Laplace;
                if n > policy.sparse_min_rows && policy.sparse_ratio * stats.nonzero <= n * n {
                    choice = DeterminantAlgorithm::FractionFree;
                }
                if n > MAX_LAPLACE_DIM {
                    choice = DeterminantAlgorithm::FractionFree;
                }
                if stats.numeric {
                    choice = DeterminantAlgorithm::Gauss;
                }
                choice
            }
            explicit => explicit,
        };
        debug!(
            rows = n,
            nonzero = stats.nonzero,
            numeric = stats.numeric,
            normal = stats.needs_normal,
            ?algorithm,
            "selected determinant algorithm"
        );

        let finish = |det: R| {
            if stats.needs_normal {
                det.normal()
            } else {
                det.expand()
            }
        };

        if n == 1 {
            return Ok(finish(self[(0, 0)].clone()));
        }

        match algorithm {
            DeterminantAlgorithm::Gauss => {
                let mut tmp = self.clone();
                let sign = tmp.gauss_elimination(true);
                let det = (0..n).fold(R::from_i64(sign.into()), |acc, d| acc * tmp[(d, d)].clone());
                if stats.needs_normal {
                    Ok(det.normal())
                } else {
                    Ok(det.normal().expand())
                }
            }
            DeterminantAlgorithm::DivisionFree => {
                let mut tmp = self.clone();
                let sign = tmp.division_free_elimination(true);
                if sign == 0 {
                    return Ok(R::zero());
                }
                let mut det = tmp[(n - 1, n - 1)].clone();
                // every pivot row scaled the rows below it
                for d in 0..n.saturating_sub(2) {
                    for _ in 0..n - d - 2 {
                        det = det.div(&tmp[(d, d)]).normal();
                    }
                }
                Ok(finish(R::from_i64(sign.into()) * det))
            }
            DeterminantAlgorithm::FractionFree => {
                let mut tmp = self.clone();
                let sign = tmp.fraction_free_elimination(true)?;
                Ok(finish(R::from_i64(sign.into()) * tmp[(n - 1, n - 1)].clone()))
            }
            DeterminantAlgorithm::Laplace | DeterminantAlgorithm::Automatic => {
                let (sorted, sign) = self.columns_by_zero_count();
                let det = sorted.determinant_minor()?;
                Ok(finish(R::from_i64(sign) * det))
            }
        }
    }

    /// Reorders columns so that those with the most zeros come last.
    ///
    /// Returns the reordered matrix and the sign of the permutation.
    fn columns_by_zero_count(&self) -> (Self, i64) {
        let (rows, cols) = (self.rows(), self.cols());
        let mut order: Vec<(usize, usize)> = (0..cols)
            .map(|c| ((0..rows).filter(|&r| self[(r, c)].is_zero()).count(), c))
            .collect();
        order.sort_unstable();

        let mut inversions = 0usize;
        for i in 0..cols {
            for j in i + 1..cols {
                if order[i].1 > order[j].1 {
                    inversions += 1;
                }
            }
        }
        let sign = if inversions % 2 == 0 { 1 } else { -1 };

        let mut sorted = Self::zeros(rows, cols);
        for (new_c, &(_, old_c)) in order.iter().enumerate() {
            for r in 0..rows {
                sorted[(r, new_c)] = self[(r, old_c)].clone();
            }
        }
        (sorted, sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use symla_ring::Expr;

    fn n(v: i64) -> Expr {
        Expr::integer(v)
    }

    fn int_matrix(rows: &[&[i64]]) -> Matrix<Expr> {
        Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&v| n(v)).collect()).collect())
    }

    const ALL: [DeterminantAlgorithm; 5] = [
        DeterminantAlgorithm::Automatic,
        DeterminantAlgorithm::Gauss,
        DeterminantAlgorithm::FractionFree,
        DeterminantAlgorithm::DivisionFree,
        DeterminantAlgorithm::Laplace,
    ];

    #[test]
    fn test_two_by_two_all_algorithms() {
        let a = int_matrix(&[&[1, 2], &[3, 4]]);
        for algo in ALL {
            assert_eq!(a.determinant(algo).unwrap(), n(-2), "{algo:?}");
        }
    }

    #[test]
    fn test_numeric_four_by_four_all_algorithms() {
        let a = int_matrix(&[
            &[2, -1, 0, 3],
            &[1, 4, -2, 0],
            &[0, 5, 1, -1],
            &[3, 0, 2, 2],
        ]);
        let expected = a.determinant(DeterminantAlgorithm::Laplace).unwrap();
        for algo in ALL {
            assert_eq!(a.determinant(algo).unwrap(), expected, "{algo:?}");
        }
    }

    #[test]
    fn test_symbolic_all_algorithms() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let a = Matrix::from_rows(vec![
            vec![x.clone(), n(1), n(0), y.clone()],
            vec![n(1), x.clone(), y.clone(), n(0)],
            vec![n(0), y.clone(), x.clone(), n(1)],
            vec![y.clone(), n(0), n(1), x.clone()],
        ]);
        let expected = a.determinant(DeterminantAlgorithm::Laplace).unwrap();
        for algo in ALL {
            assert_eq!(a.determinant(algo).unwrap(), expected, "{algo:?}");
        }
    }

    #[test]
    fn test_diagonal_cube() {
        let t = Expr::symbol("t");
        let a = Matrix::diagonal(&[t.clone(), t.clone(), t.clone()]);
        for algo in ALL {
            assert_eq!(a.determinant(algo).unwrap(), t.pow(3), "{algo:?}");
        }
    }

    #[test]
    fn test_rational_function_entries_are_normalized() {
        let x = Expr::symbol("x");
        let a = Matrix::from_rows(vec![
            vec![n(1).div(&(x.clone() - n(1))), n(1)],
            vec![n(1), x.clone() - n(1)],
        ]);
        // 1 - 1 = 0 once normalized
        for algo in ALL {
            assert!(a.determinant(algo).unwrap().is_zero(), "{algo:?}");
        }
    }

    #[test]
    fn test_one_by_one() {
        let x = Expr::symbol("x");
        let a = Matrix::from_rows(vec![vec![x.clone() * x.clone()]]);
        assert_eq!(a.determinant(DeterminantAlgorithm::Automatic).unwrap(), x.pow(2));
    }

    #[test]
    fn test_non_square() {
        let a = int_matrix(&[&[1, 2, 3]]);
        assert!(matches!(
            a.determinant(DeterminantAlgorithm::Automatic),
            Err(MatrixError::NonSquareMatrix { .. })
        ));
    }

    #[test]
    fn test_column_presort_sign() {
        // column 0 has two zeros, column 1 none: they trade places
        let a = int_matrix(&[&[0, 1], &[0, 2]]);
        let (sorted, sign) = a.columns_by_zero_count();
        assert_eq!(sorted, int_matrix(&[&[1, 0], &[2, 0]]));
        assert_eq!(sign, -1);
    }
}
