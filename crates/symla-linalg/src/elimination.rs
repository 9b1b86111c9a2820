//! Row reduction to echelon form.
//!
//! Three interchangeable strategies share the same control flow: for each
//! column, find a pivot, then eliminate every row below it. They differ in
//! how a row is updated and therefore in how fast the entries grow:
//!
//! - Gauss: `row2 -= (row2[c0] / pivot) * row0`. Division keeps plain
//!   numbers small, but symbolic entries must be normalized at every step.
//! - Division-free: `row2 = pivot * row2 - row2[c0] * row0`. No division
//!   at all, at the price of exponential growth.
//! - Fraction-free (Bareiss): like division-free, but every new entry is
//!   divided exactly by the previous pivot, which keeps growth polynomial.
//!
//! All three return the sign of the row permutation they applied, or 0 if
//! a column without a pivot was met. With `det` set, the caller only wants
//! the diagonal: elimination stops early on a zero column and rows that are
//! no longer needed are cleared to save memory.

use symla_ring::RingElement;
use tracing::error;

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::Matrix;
use crate::pivot::{Pivot, PivotMode};

impl<R: RingElement> Matrix<R> {
    /// Gaussian elimination, in place.
    ///
    /// Columns of plain numbers are pivoted on their entry of largest
    /// magnitude; otherwise the first nonzero entry is taken.
    pub fn gauss_elimination(&mut self, det: bool) -> i32 {
        let (m, n) = (self.rows(), self.cols());
        let mut sign = 1;
        let mut r0 = 0;
        let mut c0 = 0;

        while c0 < n && r0 + 1 < m {
            let mode = if (r0..m).all(|r| self[(r, c0)].is_number()) {
                PivotMode::Numeric
            } else {
                PivotMode::Symbolic
            };
            match self.pivot(r0, c0, mode) {
                Pivot::Degenerate => {
                    sign = 0;
                    if det {
                        return 0;
                    }
                }
                found => {
                    if found.is_swap() {
                        sign = -sign;
                    }
                    for r2 in r0 + 1..m {
                        if !self[(r2, c0)].is_zero() {
                            let piv = self[(r2, c0)].div(&self[(r0, c0)]);
                            for c in c0 + 1..n {
                                let v = self[(r2, c)].clone() - piv.clone() * self[(r0, c)].clone();
                                self[(r2, c)] = if v.is_number() { v } else { v.normal() };
                            }
                        }
                        for c in r0..=c0 {
                            self[(r2, c)] = R::zero();
                        }
                    }
                    if det {
                        for c in r0 + 1..n {
                            self[(r0, c)] = R::zero();
                        }
                    }
                    r0 += 1;
                }
            }
            c0 += 1;
        }

        self.clear_rows_below(r0);
        sign
    }

    /// Division-free elimination, in place.
    pub fn division_free_elimination(&mut self, det: bool) -> i32 {
        let (m, n) = (self.rows(), self.cols());
        let mut sign = 1;
        let mut r0 = 0;
        let mut c0 = 0;

        while c0 < n && r0 + 1 < m {
            match self.pivot(r0, c0, PivotMode::Symbolic) {
                Pivot::Degenerate => {
                    sign = 0;
                    if det {
                        return 0;
                    }
                }
                found => {
                    if found.is_swap() {
                        sign = -sign;
                    }
                    for r2 in r0 + 1..m {
                        for c in c0 + 1..n {
                            let v = self[(r0, c0)].clone() * self[(r2, c)].clone()
                                - self[(r2, c0)].clone() * self[(r0, c)].clone();
                            self[(r2, c)] = v.expand();
                        }
                        for c in r0..=c0 {
                            self[(r2, c)] = R::zero();
                        }
                    }
                    if det {
                        for c in r0 + 1..n {
                            self[(r0, c)] = R::zero();
                        }
                    }
                    r0 += 1;
                }
            }
            c0 += 1;
        }

        self.clear_rows_below(r0);
        sign
    }

    /// Fraction-free (Bareiss) elimination, in place.
    ///
    /// Entries are first split into numerator and denominator, with every
    /// non-polynomial sub-expression replaced by a fresh symbol, and the
    /// two grids are reduced in lock-step. The divisions by the previous
    /// pivot are exact by Sylvester's identity.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistencyFault` if one of those divisions is not
    /// exact, which means the ring element arithmetic is broken.
    pub fn fraction_free_elimination(&mut self, det: bool) -> MatrixResult<i32> {
        let (m, n) = (self.rows(), self.cols());
        if m == 1 {
            return Ok(1);
        }

        let mut subs = R::Substitution::default();
        let mut num = Vec::with_capacity(m * n);
        let mut den = Vec::with_capacity(m * n);
        for entry in self.entries() {
            let rational = entry.normal().to_rational(&mut subs);
            num.push(rational.numer());
            den.push(rational.denom());
        }

        let mut divisor_n = R::one();
        let mut divisor_d = R::one();
        let mut sign = 1;
        let mut r0 = 0;
        let mut c0 = 0;

        while c0 < n && r0 + 1 < m {
            let found =
                (r0..m).find(|&r| !num[r * n + c0].restore(&subs).expand().is_zero());
            match found {
                None => {
                    sign = 0;
                    if det {
                        return Ok(0);
                    }
                }
                Some(k) => {
                    if k > r0 {
                        sign = -sign;
                        for c in c0..n {
                            num.swap(k * n + c, r0 * n + c);
                            den.swap(k * n + c, r0 * n + c);
                        }
                    }
                    for r2 in r0 + 1..m {
                        for c in c0 + 1..n {
                            let (kk, kc) = (r0 * n + c0, r0 * n + c);
                            let (rk, rc) = (r2 * n + c0, r2 * n + c);
                            let dividend_n = (num[kk].clone()
                                * num[rc].clone()
                                * den[rk].clone()
                                * den[kc].clone()
                                - num[rk].clone()
                                    * num[kc].clone()
                                    * den[kk].clone()
                                    * den[rc].clone())
                            .expand();
                            let dividend_d = (den[rk].clone()
                                * den[kc].clone()
                                * den[kk].clone()
                                * den[rc].clone())
                            .expand();
                            num[rc] = exact_quotient(&dividend_n, &divisor_n)?;
                            den[rc] = exact_quotient(&dividend_d, &divisor_d)?;
                        }
                        for c in r0..=c0 {
                            num[r2 * n + c] = R::zero();
                        }
                    }
                    divisor_n = num[r0 * n + c0].expand();
                    divisor_d = den[r0 * n + c0].expand();
                    if det {
                        for c in 0..n {
                            num[r0 * n + c] = R::zero();
                            den[r0 * n + c] = R::one();
                        }
                    }
                    r0 += 1;
                }
            }
            c0 += 1;
        }

        for r in r0 + 1..m {
            for c in 0..n {
                num[r * n + c] = R::zero();
            }
        }

        for ((entry, nu), de) in self.entries_mut().iter_mut().zip(num).zip(den) {
            *entry = if nu.is_zero() {
                R::zero()
            } else {
                nu.restore(&subs).div(&de.restore(&subs))
            };
        }
        Ok(sign)
    }

    /// Replaces rows strictly below `r0` by canonical zeros.
    fn clear_rows_below(&mut self, r0: usize) {
        for r in r0 + 1..self.rows() {
            for c in 0..self.cols() {
                self[(r, c)] = R::zero();
            }
        }
    }
}

fn exact_quotient<R: RingElement>(dividend: &R, divisor: &R) -> MatrixResult<R> {
    dividend.exact_div(divisor).ok_or_else(|| {
        error!(?dividend, ?divisor, "inexact division in fraction-free elimination");
        MatrixError::InternalConsistencyFault(format!(
            "fraction-free elimination: {divisor:?} does not divide {dividend:?}"
        ))
    })
}
