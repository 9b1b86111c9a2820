//! Sparse multivariate polynomials over Q.
//!
//! Terms are kept in a `BTreeMap` keyed by monomial, so the representation
//! is canonical: two polynomials are equal iff their term maps are equal.
//! The leading term is the largest monomial in the lexicographic order.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::monomial::{Atom, Monomial};
use crate::number::Number;

/// A sparse multivariate polynomial with rational coefficients.
///
/// # Invariants
///
/// - No stored coefficient is zero
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<(Monomial, Number)>", into = "Vec<(Monomial, Number)>")
)]
pub struct Poly {
    terms: BTreeMap<Monomial, Number>,
}

impl Poly {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(Number::one())
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: Number) -> Self {
        Self::term(Monomial::one(), c)
    }

    /// A single indeterminate.
    #[must_use]
    pub fn atom(atom: Atom) -> Self {
        Self::term(Monomial::power(atom, 1), Number::one())
    }

    /// A single term `c * m`.
    #[must_use]
    pub fn term(m: Monomial, c: Number) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(m, c);
        }
        Self { terms }
    }

    /// Builds a polynomial from terms, combining like terms.
    #[must_use]
    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, Number)>) -> Self {
        let mut poly = Self::zero();
        for (m, c) in terms {
            poly.add_term(m, c);
        }
        poly
    }

    fn add_term(&mut self, m: Monomial, c: Number) {
        if c.is_zero() {
            return;
        }
        match self.terms.entry(m) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(c);
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                let sum = &*slot.get() + &c;
                if sum.is_zero() {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if this is the constant polynomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over terms in increasing monomial order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &Number)> {
        self.terms.iter()
    }

    /// The constant value, if this polynomial has no indeterminates.
    #[must_use]
    pub fn as_constant(&self) -> Option<Number> {
        match self.terms.len() {
            0 => Some(Number::zero()),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.is_one())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    /// The single indeterminate, if this polynomial is exactly `atom`.
    #[must_use]
    pub fn as_atom(&self) -> Option<&Atom> {
        if self.terms.len() != 1 {
            return None;
        }
        let (m, c) = self.terms.iter().next()?;
        match m.factors() {
            [(atom, 1)] if c.is_one() => Some(atom),
            _ => None,
        }
    }

    /// Returns the leading term (monomial, coefficient).
    #[must_use]
    pub fn leading_term(&self) -> Option<(&Monomial, &Number)> {
        self.terms.iter().next_back()
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Number> {
        self.leading_term().map(|(_, c)| c)
    }

    /// The most significant indeterminate occurring in this polynomial.
    #[must_use]
    pub fn max_atom(&self) -> Option<&Atom> {
        self.terms.keys().filter_map(Monomial::max_atom).max()
    }

    /// All indeterminates occurring in this polynomial.
    #[must_use]
    pub fn atoms(&self) -> Vec<Atom> {
        let mut atoms: Vec<Atom> = self
            .terms
            .keys()
            .flat_map(|m| m.factors().iter().map(|(a, _)| a.clone()))
            .collect();
        atoms.sort();
        atoms.dedup();
        atoms
    }

    /// Degree in `atom`.
    #[must_use]
    pub fn degree(&self, atom: &Atom) -> u32 {
        self.terms.keys().map(|m| m.degree(atom)).max().unwrap_or(0)
    }

    /// Coefficient of `atom^d`, as a polynomial in the other indeterminates.
    #[must_use]
    pub fn coeff(&self, atom: &Atom, d: u32) -> Self {
        Self::from_terms(self.terms.iter().filter_map(|(m, c)| {
            let (e, rest) = m.split(atom);
            (e == d).then(|| (rest, c.clone()))
        }))
    }

    /// Coefficients with respect to `atom`, keyed by exponent.
    #[must_use]
    pub fn coefficients(&self, atom: &Atom) -> BTreeMap<u32, Self> {
        let mut out: BTreeMap<u32, Self> = BTreeMap::new();
        for (m, c) in &self.terms {
            let (e, rest) = m.split(atom);
            out.entry(e).or_default().add_term(rest, c.clone());
        }
        out
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &Number) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|(m, x)| (m.clone(), x * c)).collect(),
        }
    }

    /// Multiplies by a single term.
    #[must_use]
    pub fn mul_term(&self, m: &Monomial, c: &Number) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|(m2, c2)| (m2.mul(m), c2 * c)).collect(),
        }
    }

    /// Divides so that the leading coefficient becomes 1.
    #[must_use]
    pub fn monic(&self) -> Self {
        match self.leading_coeff() {
            Some(lc) if !lc.is_one() => self.scale(&lc.recip()),
            _ => self.clone(),
        }
    }

    /// Exact division.
    ///
    /// Returns `Some(q)` with `self = q * divisor`, or `None` if the
    /// division leaves a remainder.
    #[must_use]
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (dm, dc) = divisor.leading_term()?;
        let dc_inv = dc.recip();
        let mut quotient = Self::zero();
        let mut rem = self.clone();
        while let Some((rm, rc)) = rem.leading_term() {
            // In any term order lt(q*d) = lt(q)*lt(d), so a non-divisible
            // leading term means a nonzero remainder.
            let m = rm.div(dm)?;
            let c = rc * &dc_inv;
            rem = &rem - &divisor.mul_term(&m, &c);
            quotient.add_term(m, c);
        }
        Some(quotient)
    }

    /// Pseudo-remainder of `self` by `divisor` with respect to `atom`.
    #[must_use]
    pub fn pseudo_rem(&self, divisor: &Self, atom: &Atom) -> Self {
        let dd = divisor.degree(atom);
        let lc = divisor.coeff(atom, dd);
        let mut rem = self.clone();
        while !rem.is_zero() {
            let dr = rem.degree(atom);
            if dr < dd {
                break;
            }
            let lr = rem.coeff(atom, dr);
            let shift = Monomial::power(atom.clone(), dr - dd);
            let sub = (divisor * &lr).mul_term(&shift, &Number::one());
            rem = &(&rem * &lc) - &sub;
        }
        rem
    }

    /// Content with respect to `atom`: the GCD of the coefficients.
    #[must_use]
    pub fn content(&self, atom: &Atom) -> Self {
        let mut acc = Self::zero();
        for c in self.coefficients(atom).values() {
            acc = acc.gcd(c);
            if acc.is_one() {
                break;
            }
        }
        acc
    }

    /// Splits into (content, primitive part) with respect to `atom`.
    #[must_use]
    pub fn primitive_part(&self, atom: &Atom) -> (Self, Self) {
        let content = self.content(atom);
        if content.is_zero() {
            return (content, Self::zero());
        }
        let pp = self
            .div_exact(&content)
            .expect("content divides every coefficient");
        (content, pp)
    }

    /// Greatest common divisor, normalized to be monic.
    ///
    /// Recursive primitive PRS: the content and primitive parts with respect
    /// to the most significant indeterminate are handled separately.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.monic();
        }
        if other.is_zero() {
            return self.monic();
        }
        if self.as_constant().is_some() || other.as_constant().is_some() {
            return Self::one();
        }
        // one operand divides the other
        if self.len() <= other.len() && other.div_exact(self).is_some() {
            return self.monic();
        }
        if other.len() <= self.len() && self.div_exact(other).is_some() {
            return other.monic();
        }
        let Some(v) = self.max_atom().max(other.max_atom()).cloned() else {
            return Self::one();
        };

        if self.degree(&v) == 0 {
            return self.gcd(&other.content(&v));
        }
        if other.degree(&v) == 0 {
            return other.gcd(&self.content(&v));
        }

        let (ca, mut f) = self.primitive_part(&v);
        let (cb, mut g) = other.primitive_part(&v);
        let content = ca.gcd(&cb);

        if f.degree(&v) < g.degree(&v) {
            std::mem::swap(&mut f, &mut g);
        }
        loop {
            let r = f.pseudo_rem(&g, &v);
            if r.is_zero() {
                break;
            }
            if r.degree(&v) == 0 {
                g = Self::one();
                break;
            }
            f = g;
            g = r.primitive_part(&v).1;
        }

        let g = if g.degree(&v) == 0 {
            Self::one()
        } else {
            g.primitive_part(&v).1
        };
        (&content * &g).monic()
    }

    /// Renames indeterminates.
    #[must_use]
    pub fn rename(&self, f: &impl Fn(&Atom) -> Option<Atom>) -> Self {
        Self::from_terms(self.terms.iter().map(|(m, c)| (m.rename(f), c.clone())))
    }
}

impl From<Vec<(Monomial, Number)>> for Poly {
    fn from(terms: Vec<(Monomial, Number)>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Poly> for Vec<(Monomial, Number)> {
    fn from(poly: Poly) -> Self {
        poly.terms.into_iter().collect()
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, other: Self) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.add_term(m.clone(), c.clone());
        }
        out
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, other: Self) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.add_term(m.clone(), -c);
        }
        out
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, other: Self) -> Poly {
        let mut out = Poly::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                out.add_term(m1.mul(m2), c1 * c2);
            }
        }
        out
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly {
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.terms.iter().rev().enumerate() {
            let negative = c.is_negative();
            let abs = c.abs();
            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, "-")?,
                (_, false) => write!(f, "+")?,
            }
            if m.is_one() {
                write!(f, "{abs}")?;
            } else if abs.is_one() {
                write!(f, "{m}")?;
            } else {
                write!(f, "{abs}*{m}")?;
            }
        }
        Ok(())
    }
}
