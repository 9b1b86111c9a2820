//! Determinants by memoized Laplace expansion.
//!
//! A naive cofactor expansion recomputes the same sub-determinants over
//! and over: the minor on rows `S` and the rightmost `|S|` columns is needed
//! once for every way of reaching `S`. Instead we sweep the columns from
//! right to left. After processing column `c`, a table maps every row
//! subset of size `n - c` to its minor on columns `c..n`; the table for
//! column `c - 1` is built from it by expanding along that column. Only two
//! tables are alive at a time, so at most `2 * C(n, n/2)` minors are stored.
//!
//! Row subsets are packed into `u64` bitmasks, which bounds the dimension
//! by [`MAX_LAPLACE_DIM`].

use rustc_hash::FxHashMap;
use symla_ring::RingElement;

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::Matrix;

/// Largest dimension supported by Laplace expansion.
pub const MAX_LAPLACE_DIM: usize = u64::BITS as usize;

/// Bitmask with the lowest `k` bits set.
fn low_bits(k: usize) -> u64 {
    if k >= MAX_LAPLACE_DIM {
        u64::MAX
    } else {
        (1u64 << k) - 1
    }
}

/// Next larger integer with the same number of set bits (Gosper's hack).
///
/// Returns `None` once the result would not fit in 64 bits.
fn next_subset(x: u64) -> Option<u64> {
    let lowest = x & x.wrapping_neg();
    let ripple = x.checked_add(lowest)?;
    Some((((ripple ^ x) >> 2) / lowest) | ripple)
}

/// All `k`-element subsets of `0..n`, in increasing order.
fn subsets(n: usize, k: usize) -> impl Iterator<Item = u64> {
    let limit = low_bits(n);
    std::iter::successors(Some(low_bits(k)), move |&x| next_subset(x))
        .take_while(move |&x| x <= limit)
}

impl<R: RingElement> Matrix<R> {
    /// Determinant by Laplace expansion, without column presorting.
    ///
    /// Closed forms are used up to dimension 3. The result is expanded.
    ///
    /// # Errors
    ///
    /// - `NonSquareMatrix` if the matrix is not square
    /// - `Unsupported` if the dimension exceeds [`MAX_LAPLACE_DIM`]
    pub fn determinant_minor(&self) -> MatrixResult<R> {
        let n = self.ensure_square("determinant")?;
        let m = |r: usize, c: usize| self[(r, c)].clone();

        match n {
            1 => return Ok(m(0, 0).expand()),
            2 => return Ok((m(0, 0) * m(1, 1) - m(1, 0) * m(0, 1)).expand()),
            3 => {
                return Ok((m(0, 0) * m(1, 1) * m(2, 2)
                    - m(0, 0) * m(1, 2) * m(2, 1)
                    - m(0, 1) * m(1, 0) * m(2, 2)
                    + m(0, 2) * m(1, 0) * m(2, 1)
                    + m(0, 1) * m(1, 2) * m(2, 0)
                    - m(0, 2) * m(1, 1) * m(2, 0))
                .expand())
            }
            _ if n > MAX_LAPLACE_DIM => {
                return Err(MatrixError::Unsupported(format!(
                    "Laplace expansion of a {n}x{n} matrix (limit is {MAX_LAPLACE_DIM})"
                )))
            }
            _ => {}
        }

        // Minors on the last column: single rows. Zero minors are never stored.
        let mut prev: FxHashMap<u64, R> = FxHashMap::default();
        for r in 0..n {
            let entry = &self[(r, n - 1)];
            if !entry.is_zero() {
                prev.insert(1 << r, entry.clone());
            }
        }

        let mut det = R::zero();
        for c in (0..n - 1).rev() {
            let mut next: FxHashMap<u64, R> = FxHashMap::default();
            for subset in subsets(n, n - c) {
                det = R::zero();
                let mut rest = subset;
                let mut position = 0;
                while rest != 0 {
                    let r = rest.trailing_zeros() as usize;
                    rest &= rest - 1;
                    let entry = &self[(r, c)];
                    if !entry.is_zero() {
                        if let Some(minor) = prev.get(&(subset & !(1 << r))) {
                            let term = entry.clone() * minor.clone();
                            det = if position % 2 == 0 { det + term } else { det - term };
                        }
                    }
                    position += 1;
                }
                det = det.expand();
                if !det.is_zero() {
                    next.insert(subset, det.clone());
                }
            }
            prev = next;
        }

        Ok(det)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symla_ring::Expr;

    fn n(v: i64) -> Expr {
        Expr::integer(v)
    }

    fn int_matrix(rows: &[&[i64]]) -> Matrix<Expr> {
        Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&v| n(v)).collect()).collect())
    }

    #[test]
    fn test_subset_enumeration() {
        let all: Vec<u64> = subsets(4, 2).collect();
        assert_eq!(all, vec![0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]);
        assert_eq!(subsets(5, 5).collect::<Vec<_>>(), vec![0b11111]);
        assert_eq!(subsets(64, 64).count(), 1);
        assert_eq!(subsets(64, 1).count(), 64);
    }

    #[test]
    fn test_closed_forms() {
        assert_eq!(int_matrix(&[&[7]]).determinant_minor().unwrap(), n(7));
        assert_eq!(int_matrix(&[&[1, 2], &[3, 4]]).determinant_minor().unwrap(), n(-2));
        assert_eq!(
            int_matrix(&[&[2, 0, 1], &[1, 3, 2], &[1, 1, 4]]).determinant_minor().unwrap(),
            n(18)
        );
    }

    #[test]
    fn test_four_by_four() {
        let m = int_matrix(&[
            &[1, 0, 2, -1],
            &[3, 0, 0, 5],
            &[2, 1, 4, -3],
            &[1, 0, 5, 0],
        ]);
        assert_eq!(m.determinant_minor().unwrap(), n(30));
    }

    #[test]
    fn test_vandermonde_symbolic() {
        let vars: Vec<Expr> = ["a", "b", "c", "d"].iter().map(|s| Expr::symbol(s)).collect();
        let rows = vars
            .iter()
            .map(|v| (0..4).map(|k| v.pow(k)).collect())
            .collect();
        let m = Matrix::from_rows(rows);
        let mut expected = n(1);
        for j in 0..4 {
            for i in 0..j {
                expected = expected * (vars[j].clone() - vars[i].clone());
            }
        }
        assert_eq!(m.determinant_minor().unwrap(), expected);
    }

    #[test]
    fn test_zero_row() {
        let m = int_matrix(&[&[1, 2, 3, 4], &[0, 0, 0, 0], &[5, 6, 7, 8], &[9, 1, 2, 3]]);
        assert!(m.determinant_minor().unwrap().is_zero());
    }

    #[test]
    fn test_too_large() {
        let m = Matrix::<Expr>::identity(MAX_LAPLACE_DIM + 1);
        assert!(matches!(m.determinant_minor(), Err(MatrixError::Unsupported(_))));
    }
}
