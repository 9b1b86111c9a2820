//! The ring element capability.
//!
//! Matrix algorithms never look inside their entries. Everything they need
//! to know about an entry (arithmetic, zero testing, canonical forms and the
//! cheap "what kind of value is this" queries used by the heuristics) is
//! expressed through `RingElement`.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// An element of a commutative ring that may be embedded in its fraction
/// field.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative with identity `one()`
/// - Multiplication distributes over addition
/// - `is_zero` is exact once the value has been brought into a canonical
///   form with `expand` or `normal`
pub trait RingElement:
    Clone + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// Bookkeeping for `to_rational`: which sub-expressions were replaced by
    /// which fresh symbols.
    type Substitution: Default + Debug;

    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Embeds a machine integer.
    fn from_i64(n: i64) -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Formal quotient in the fraction field.
    ///
    /// # Panics
    ///
    /// May panic if `other` is zero.
    fn div(&self, other: &Self) -> Self;

    /// Exact quotient in the polynomial ring.
    ///
    /// Returns `None` if `other` does not divide `self`.
    fn exact_div(&self, other: &Self) -> Option<Self>;

    /// Polynomial canonical form (numerator and denominator multiplied out).
    #[must_use]
    fn expand(&self) -> Self;

    /// Rational canonical form: lowest terms.
    #[must_use]
    fn normal(&self) -> Self;

    /// Collects in powers of `var`.
    #[must_use]
    fn collect(&self, _var: &Self) -> Self {
        self.expand()
    }

    /// Returns true for plain numbers (no symbols at all).
    fn is_number(&self) -> bool;

    /// Returns true for a bare symbol.
    fn is_symbol(&self) -> bool;

    /// Returns true for exact integers.
    fn is_integer(&self) -> bool;

    /// Returns true for negative plain numbers.
    fn is_negative(&self) -> bool;

    /// Returns true if this is a polynomial with rational coefficients.
    fn is_polynomial(&self) -> bool;

    /// Returns true if this is a quotient of polynomials.
    fn is_rational_function(&self) -> bool;

    /// Returns true unless multiplication by this value is noncommutative.
    fn is_commutative(&self) -> bool {
        true
    }

    /// The integer value, if this is an exact integer that fits in an `i64`.
    fn to_i64(&self) -> Option<i64>;

    /// Compares absolute values.
    ///
    /// Returns `None` unless both operands are plain numbers.
    fn cmp_magnitude(&self, other: &Self) -> Option<Ordering>;

    /// A total canonical order on elements.
    fn compare(&self, other: &Self) -> Ordering;

    /// Replaces every non-polynomial sub-expression by a fresh symbol,
    /// recording the replacement in `subs`, so that the result is a
    /// rational function in symbols only.
    #[must_use]
    fn to_rational(&self, subs: &mut Self::Substitution) -> Self;

    /// The numerator of the rational form.
    #[must_use]
    fn numer(&self) -> Self;

    /// The denominator of the rational form.
    #[must_use]
    fn denom(&self) -> Self;

    /// Undoes the replacements recorded by `to_rational`.
    #[must_use]
    fn restore(&self, subs: &Self::Substitution) -> Self;

    /// A new symbol distinct from every other symbol.
    fn fresh_symbol() -> Self;

    /// Computes self^n for non-negative n.
    #[must_use]
    fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            exp >>= 1;
            if exp > 0 {
                base = base.clone() * base;
            }
        }

        result
    }
}
