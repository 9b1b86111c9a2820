//! # symla-ring
//!
//! Ring elements for exact linear algebra.
//!
//! This crate provides:
//! - The `RingElement` capability trait the matrix algorithms are written against
//! - Exact rationals (`Number`) backed by `dashu`
//! - Sparse multivariate polynomials over Q with multivariate GCD (`Poly`)
//! - Rational functions in symbols and opaque function kernels (`Expr`)
//!
//! ## Canonical Forms
//!
//! `Expr` arithmetic is lazy: sums and products of fractions are combined
//! without cancelling common factors. Two canonicalizations are available:
//! - `expand`: polynomial canonical form of numerator and denominator
//! - `normal`: lowest terms, denominator with leading coefficient one

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod expr;
pub mod monomial;
pub mod number;
pub mod poly;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use expr::{Expr, Substitution};
pub use monomial::{Atom, Monomial};
pub use number::Number;
pub use poly::Poly;
pub use traits::RingElement;
