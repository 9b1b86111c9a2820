//! # symla-linalg
//!
//! Exact linear algebra over symbolic ring elements.
//!
//! This crate provides:
//! - A dense row-major matrix store over any [`RingElement`]
//! - Arithmetic: sums, products, scaling, transpose, trace, integer powers
//! - Three elimination strategies: Gauss, division-free and fraction-free
//!   (Bareiss)
//! - Determinants by memoized Laplace expansion or elimination
//! - Linear system solving with free parameters and inconsistency detection
//! - Inverse and characteristic polynomial
//!
//! ## Algorithm Selection
//!
//! Intermediate expression swell is the main enemy of exact elimination.
//! Unless told otherwise, determinants are computed by:
//! - Gaussian elimination if every entry is a plain number
//! - Bareiss elimination for large sparse matrices
//! - Laplace expansion otherwise
//!
//! and linear systems by Gaussian elimination (plain numbers), division-free
//! elimination (fewer than three equations) or Bareiss elimination. The
//! thresholds live in [`DeterminantPolicy`] and [`SolvePolicy`].
//!
//! Every operation works on its own copy of the matrix; only the explicit
//! `*_elimination` and `pivot` methods modify a matrix in place.
//!
//! [`RingElement`]: symla_ring::RingElement

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod determinant;
pub mod error;
pub mod matrix;
pub mod minor;
pub mod pivot;
pub mod solve;

mod charpoly;
mod elimination;
mod inverse;
mod ops;

pub use determinant::{DeterminantAlgorithm, DeterminantPolicy};
pub use error::{MatrixError, MatrixResult};
pub use matrix::Matrix;
pub use minor::MAX_LAPLACE_DIM;
pub use pivot::{Pivot, PivotMode};
pub use solve::{SolveAlgorithm, SolvePolicy};

#[cfg(test)]
mod proptests;
