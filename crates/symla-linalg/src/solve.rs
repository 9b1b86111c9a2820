//! Linear systems `A X = B` with free parameters.

use symla_ring::RingElement;
use tracing::{debug, trace};

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::Matrix;

/// Elimination strategies for [`Matrix::solve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolveAlgorithm {
    /// Choose from matrix statistics.
    #[default]
    Automatic,
    /// Gaussian elimination.
    Gauss,
    /// Division-free elimination.
    DivisionFree,
    /// Bareiss elimination.
    FractionFree,
}

/// Configuration for automatic solver algorithm selection.
#[derive(Clone, Debug)]
pub struct SolvePolicy {
    /// Systems with fewer equations than this use division-free elimination,
    /// which coincides with Bareiss there but has less bookkeeping.
    pub division_free_max_rows: usize,
}

impl Default for SolvePolicy {
    fn default() -> Self {
        Self {
            division_free_max_rows: 3,
        }
    }
}

impl<R: RingElement> Matrix<R> {
    /// Solves `self * X = rhs` with the default selection policy.
    ///
    /// See [`Matrix::solve_with_policy`].
    ///
    /// # Errors
    ///
    /// See [`Matrix::solve_with_policy`].
    pub fn solve(&self, vars: &Self, rhs: &Self, algorithm: SolveAlgorithm) -> MatrixResult<Self> {
        self.solve_with_policy(vars, rhs, algorithm, &SolvePolicy::default())
    }

    /// Solves `self * X = rhs` for an `n x p` matrix of unknowns.
    ///
    /// `vars` holds the symbols standing for the unknowns. An unknown that
    /// no equation constrains is returned as its own symbol, and the other
    /// unknowns are expressed in terms of it.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` unless `rhs` is `m x p` and `vars` is `n x p`
    ///   for an `m x n` matrix
    /// - `InvalidArgument` if some entry of `vars` is not a symbol
    /// - `InconsistentSystem` if the system has no solution
    /// - `InternalConsistencyFault` if fraction-free elimination fails
    pub fn solve_with_policy(
        &self,
        vars: &Self,
        rhs: &Self,
        algorithm: SolveAlgorithm,
        policy: &SolvePolicy,
    ) -> MatrixResult<Self> {
        let (m, n) = (self.rows(), self.cols());
        let p = rhs.cols();
        if rhs.rows() != m {
            return Err(MatrixError::DimensionMismatch {
                op: "solve",
                left: (m, n),
                right: (rhs.rows(), rhs.cols()),
            });
        }
        if vars.rows() != n || vars.cols() != p {
            return Err(MatrixError::DimensionMismatch {
                op: "solve",
                left: (n, p),
                right: (vars.rows(), vars.cols()),
            });
        }
        if let Some(bad) = vars.entries().iter().find(|v| !v.is_symbol()) {
            return Err(MatrixError::InvalidArgument(format!(
                "solve expects a matrix of symbols, found {bad:?}"
            )));
        }

        let mut aug = Self::zeros(m, n + p);
        for r in 0..m {
            for c in 0..n {
                aug[(r, c)] = self[(r, c)].clone();
            }
            for c in 0..p {
                aug[(r, n + c)] = rhs[(r, c)].clone();
            }
        }

        let algorithm = match algorithm {
            SolveAlgorithm::Automatic => {
                let mut choice = SolveAlgorithm::FractionFree;
                if m < policy.division_free_max_rows {
                    choice = SolveAlgorithm::DivisionFree;
                }
                if aug.is_numeric() {
                    choice = SolveAlgorithm::Gauss;
                }
                choice
            }
            explicit => explicit,
        };
        debug!(rows = m, cols = n, rhs_cols = p, ?algorithm, "solving linear system");

        match algorithm {
            SolveAlgorithm::Gauss => {
                aug.gauss_elimination(false);
            }
            SolveAlgorithm::DivisionFree => {
                aug.division_free_elimination(false);
            }
            SolveAlgorithm::FractionFree | SolveAlgorithm::Automatic => {
                aug.fraction_free_elimination(false)?;
            }
        }

        // back-substitution works on entries in lowest terms
        let aug = aug.map(RingElement::normal);
        let mut sol = Self::zeros(n, p);
        for co in 0..p {
            // leading column of the last row that was solved
            let mut last_lead = n;
            for r in (0..m).rev() {
                let lead = (0..n).find(|&c| !aug[(r, c)].is_zero());
                let Some(lead) = lead else {
                    if !aug[(r, n + co)].is_zero() {
                        debug!(row = r, column = co, "inconsistent linear system");
                        return Err(MatrixError::InconsistentSystem);
                    }
                    continue;
                };
                for c in lead + 1..last_lead {
                    trace!(unknown = c, column = co, "free parameter");
                    sol[(c, co)] = vars[(c, co)].clone();
                }
                let mut e = aug[(r, n + co)].clone();
                for c in lead + 1..n {
                    if aug[(r, c)].is_zero() || sol[(c, co)].is_zero() {
                        continue;
                    }
                    e = (e - aug[(r, c)].clone() * sol[(c, co)].clone()).normal();
                }
                sol[(lead, co)] = e.div(&aug[(r, lead)]).normal();
                last_lead = lead;
            }
            for ro in 0..last_lead {
                sol[(ro, co)] = vars[(ro, co)].clone();
            }
        }
        Ok(sol)
    }
}
