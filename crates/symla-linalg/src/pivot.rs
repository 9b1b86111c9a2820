//! Pivot search for elimination.

use std::cmp::Ordering;

use symla_ring::RingElement;

use crate::matrix::Matrix;

/// How a pivot is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PivotMode {
    /// First entry that is nonzero after expansion.
    Symbolic,
    /// Entry of largest magnitude; entries must be plain numbers.
    Numeric,
}

/// Outcome of a pivot search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pivot {
    /// The pivot is already in the starting row.
    InPlace,
    /// The pivot was found in the given row, which has been swapped into
    /// the starting row.
    Swapped(usize),
    /// Every candidate entry is zero.
    Degenerate,
}

impl Pivot {
    /// Returns true if a row swap occurred.
    #[must_use]
    pub fn is_swap(self) -> bool {
        matches!(self, Self::Swapped(_))
    }
}

impl<R: RingElement> Matrix<R> {
    /// Finds a pivot for column `col` among rows `row0..`, swapping it into
    /// row `row0`.
    ///
    /// The caller flips the determinant sign whenever the result is
    /// `Pivot::Swapped`.
    pub fn pivot(&mut self, row0: usize, col: usize, mode: PivotMode) -> Pivot {
        let found = match mode {
            PivotMode::Symbolic => {
                (row0..self.rows()).find(|&r| !self[(r, col)].expand().is_zero())
            }
            PivotMode::Numeric => {
                let mut best = row0;
                for r in row0 + 1..self.rows() {
                    if self[(r, col)].cmp_magnitude(&self[(best, col)]) == Some(Ordering::Greater) {
                        best = r;
                    }
                }
                (!self[(best, col)].is_zero()).then_some(best)
            }
        };

        match found {
            None => Pivot::Degenerate,
            Some(k) if k == row0 => Pivot::InPlace,
            Some(k) => {
                self.swap_rows(row0, k);
                Pivot::Swapped(k)
            }
        }
    }
}
