//! # Symla
//!
//! Exact linear algebra over symbolic entries.
//!
//! Matrices may hold integers, rationals, polynomials or rational functions
//! in any number of symbols, and every result is exact: no floating point
//! is involved anywhere.
//!
//! ## Features
//!
//! - **Determinants**: memoized Laplace expansion, Gaussian, division-free
//!   and Bareiss elimination, selected automatically from matrix statistics
//! - **Linear Systems**: under-determined systems yield free parameters,
//!   inconsistent ones an error
//! - **Derived Operations**: inverse, characteristic polynomial, integer
//!   powers
//!
//! ## Quick Start
//!
//! ```rust
//! use symla::prelude::*;
//!
//! let t = Expr::symbol("t");
//! let a = Matrix::diagonal(&[t.clone(), t.clone(), t.clone()]);
//! let det = a.determinant(DeterminantAlgorithm::Automatic).unwrap();
//! assert_eq!(det, t.pow(3));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use symla_linalg as linalg;
pub use symla_ring as ring;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use symla_linalg::{
        DeterminantAlgorithm, DeterminantPolicy, Matrix, MatrixError, MatrixResult,
        SolveAlgorithm, SolvePolicy,
    };
    pub use symla_ring::{Expr, Number, RingElement};
}
