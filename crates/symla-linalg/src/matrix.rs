//! Dense matrix store over symbolic ring elements.
//!
//! Entries are kept in row-major order. Every matrix has at least one row
//! and one column, and the backing vector always holds exactly
//! `rows * cols` entries.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use symla_ring::RingElement;

use crate::error::{MatrixError, MatrixResult};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<R> {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Matrix entries in row-major order.
    entries: Vec<R>,
}

impl<R: RingElement> Matrix<R> {
    /// Creates a new matrix filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be at least 1x1");
        Self {
            rows,
            cols,
            entries: vec![R::zero(); rows * cols],
        }
    }

    /// Creates a matrix from entries in row-major order.
    ///
    /// A short sequence is padded with zeros, a long one is truncated.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn from_flat(rows: usize, cols: usize, mut entries: Vec<R>) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be at least 1x1");
        entries.resize(rows * cols, R::zero());
        Self {
            rows,
            cols,
            entries,
        }
    }

    /// Creates a matrix from a list of rows.
    ///
    /// Ragged rows are padded with zeros to the length of the longest row.
    ///
    /// # Panics
    ///
    /// Panics if there are no rows or every row is empty.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        assert!(
            num_rows > 0 && num_cols > 0,
            "matrix dimensions must be at least 1x1"
        );
        let mut entries = Vec::with_capacity(num_rows * num_cols);
        for mut row in rows {
            row.resize(num_cols, R::zero());
            entries.extend(row);
        }
        Self {
            rows: num_rows,
            cols: num_cols,
            entries,
        }
    }

    /// Creates an identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Creates a square matrix with the given diagonal.
    ///
    /// # Panics
    ///
    /// Panics if `diag` is empty.
    #[must_use]
    pub fn diagonal(diag: &[R]) -> Self {
        let mut m = Self::zeros(diag.len(), diag.len());
        for (i, d) in diag.iter().enumerate() {
            m[(i, i)] = d.clone();
        }
        m
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The entries in row-major order.
    #[must_use]
    pub fn entries(&self) -> &[R] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [R] {
        &mut self.entries
    }

    /// Consumes the matrix, returning its entries in row-major order.
    #[must_use]
    pub fn into_entries(self) -> Vec<R> {
        self.entries
    }

    /// Returns a reference to the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> MatrixResult<&R> {
        self.check_index(row, col)?;
        Ok(&self.entries[row * self.cols + col])
    }

    /// Replaces the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the position lies outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: R) -> MatrixResult<()> {
        self.check_index(row, col)?;
        self.entries[row * self.cols + col] = value;
        Ok(())
    }

    fn check_index(&self, row: usize, col: usize) -> MatrixResult<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.cols;
        &self.entries[start..start + self.cols]
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.cols;
        let j_start = j * self.cols;
        for k in 0..self.cols {
            self.entries.swap(i_start + k, j_start + k);
        }
    }

    /// Applies `f` to every entry.
    #[must_use]
    pub fn map(&self, f: impl FnMut(&R) -> R) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            entries: self.entries.iter().map(f).collect(),
        }
    }

    /// Total order on matrices: by row count, then column count, then
    /// entries in row-major order.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.rows
            .cmp(&other.rows)
            .then(self.cols.cmp(&other.cols))
            .then_with(|| {
                self.entries
                    .iter()
                    .zip(&other.entries)
                    .map(|(a, b)| a.compare(b))
                    .find(|ord| ord.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Returns the side length, or `NonSquareMatrix` naming `op`.
    pub(crate) fn ensure_square(&self, op: &'static str) -> MatrixResult<usize> {
        if self.is_square() {
            Ok(self.rows)
        } else {
            Err(MatrixError::NonSquareMatrix {
                op,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns true if every entry is a plain number.
    pub(crate) fn is_numeric(&self) -> bool {
        self.entries.iter().all(RingElement::is_number)
    }
}

impl<R> Index<(usize, usize)> for Matrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "index out of range");
        &self.entries[row * self.cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for Matrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.rows && col < self.cols, "index out of range");
        &mut self.entries[row * self.cols + col]
    }
}

impl<R: fmt::Display> fmt::Display for Matrix<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.entries.chunks(self.cols).enumerate() {
            if r > 0 {
                write!(f, ",")?;
            }
            write!(f, "[")?;
            for (c, entry) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{entry}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(feature = "serde")]
impl<R: serde::Serialize> serde::Serialize for Matrix<R> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Matrix", 3)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("cols", &self.cols)?;
        state.serialize_field("entries", &self.entries)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<R> {
    rows: usize,
    cols: usize,
    entries: Vec<R>,
}

#[cfg(feature = "serde")]
impl<'de, R: serde::Deserialize<'de>> serde::Deserialize<'de> for Matrix<R> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = RawMatrix::<R>::deserialize(deserializer)?;
        if raw.rows == 0 || raw.cols == 0 {
            return Err(D::Error::custom("matrix dimensions must be at least 1x1"));
        }
        let Some(len) = raw.rows.checked_mul(raw.cols) else {
            return Err(D::Error::custom(format!(
                "matrix dimensions {}x{} overflow",
                raw.rows, raw.cols
            )));
        };
        if raw.entries.len() != len {
            return Err(D::Error::custom(format!(
                "expected {} entries for a {}x{} matrix, got {}",
                len,
                raw.rows,
                raw.cols,
                raw.entries.len()
            )));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            entries: raw.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symla_ring::Expr;

    fn int_matrix(rows: &[&[i64]]) -> Matrix<Expr> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Expr::integer(v)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_from_flat_pads_and_truncates() {
        let short = Matrix::from_flat(2, 2, vec![Expr::integer(1), Expr::integer(2)]);
        assert_eq!(short, int_matrix(&[&[1, 2], &[0, 0]]));

        let long = Matrix::from_flat(1, 2, (1..=5).map(Expr::integer).collect());
        assert_eq!(long, int_matrix(&[&[1, 2]]));
    }

    #[test]
    fn test_from_rows_ragged() {
        let m = Matrix::from_rows(vec![vec![Expr::integer(1)], vec![Expr::integer(2), Expr::integer(3)]]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 2);
        assert!(m[(0, 1)].is_zero());
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn test_zero_dimension_panics() {
        let _ = Matrix::<Expr>::zeros(0, 3);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = Matrix::<Expr>::zeros(2, 3);
        m.set(1, 2, Expr::symbol("a")).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), &Expr::symbol("a"));
        assert_eq!(
            m.get(2, 0),
            Err(MatrixError::IndexOutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(m.set(0, 3, Expr::integer(1)).is_err());
    }

    #[test]
    fn test_swap_rows() {
        let mut m = int_matrix(&[&[1, 2], &[3, 4], &[5, 6]]);
        m.swap_rows(0, 2);
        assert_eq!(m, int_matrix(&[&[5, 6], &[3, 4], &[1, 2]]));
    }

    #[test]
    fn test_identity_and_diagonal() {
        let t = Expr::symbol("t");
        let d = Matrix::diagonal(&[t.clone(), t.clone()]);
        assert_eq!(d[(1, 1)], t);
        assert!(d[(0, 1)].is_zero());
        assert_eq!(Matrix::<Expr>::identity(2), int_matrix(&[&[1, 0], &[0, 1]]));
    }

    #[test]
    fn test_compare() {
        let a = int_matrix(&[&[1, 2]]);
        let b = int_matrix(&[&[1, 3]]);
        let tall = int_matrix(&[&[0], &[0]]);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
        assert_eq!(a.compare(&tall), Ordering::Less);
    }

    #[test]
    fn test_display() {
        let m = int_matrix(&[&[1, 2], &[3, 4]]);
        assert_eq!(m.to_string(), "[[1,2],[3,4]]");
    }

    #[test]
    fn test_map() {
        let m = int_matrix(&[&[1, -2]]);
        assert_eq!(m.map(|e| -e.clone()), int_matrix(&[&[-1, 2]]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip_and_validation() {
        let x = Expr::symbol("x");
        let m = Matrix::from_rows(vec![vec![x.clone(), Expr::rational(1, 2)]]);
        let json = serde_json::to_string(&m).unwrap();
        let back: Matrix<Expr> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let bad = r#"{"rows":2,"cols":2,"entries":[]}"#;
        assert!(serde_json::from_str::<Matrix<Expr>>(bad).is_err());

        let huge = r#"{"rows":4294967296,"cols":4294967296,"entries":[]}"#;
        let err = serde_json::from_str::<Matrix<Expr>>(huge).unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }
}
