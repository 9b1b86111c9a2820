//! Rational function expressions.
//!
//! An `Expr` is a quotient of two polynomials in symbols and opaque
//! function kernels. Arithmetic does not cancel common factors; `normal`
//! brings an expression into lowest terms.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use num_traits::One;

use crate::monomial::Atom;
use crate::number::Number;
use crate::poly::Poly;
use crate::traits::RingElement;

/// A rational function P/Q over Q.
///
/// # Invariants
///
/// - `den` is never zero
/// - `den` is never a constant other than 1 (constants are folded into `num`)
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawExpr", into = "RawExpr")
)]
pub struct Expr {
    num: Poly,
    den: Poly,
}

/// Kernel-to-symbol replacements made by `to_rational`.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    forward: BTreeMap<Atom, Atom>,
}

impl Substitution {
    /// Number of replaced kernels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if nothing was replaced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn replacement_for(&mut self, kernel: &Atom) -> Atom {
        self.forward
            .entry(kernel.clone())
            .or_insert_with(Atom::fresh)
            .clone()
    }
}

impl Expr {
    fn from_parts(num: Poly, den: Poly) -> Self {
        assert!(!den.is_zero(), "denominator cannot be zero");
        if num.is_zero() {
            return Self::from_poly(Poly::zero());
        }
        match den.as_constant() {
            Some(c) if c.is_one() => Self { num, den },
            Some(c) => Self {
                num: num.scale(&c.recip()),
                den: Poly::one(),
            },
            None => Self { num, den },
        }
    }

    /// Creates an expression from a polynomial.
    #[must_use]
    pub fn from_poly(num: Poly) -> Self {
        Self { num, den: Poly::one() }
    }

    /// Creates a named symbol.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::from_poly(Poly::atom(Atom::symbol(name)))
    }

    /// Creates an integer.
    #[must_use]
    pub fn integer(n: i64) -> Self {
        Self::from_poly(Poly::constant(Number::from_integer(n)))
    }

    /// Creates the rational number `num/den`.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn rational(num: i64, den: i64) -> Self {
        Self::from_poly(Poly::constant(Number::new(num, den)))
    }

    /// Creates an opaque function application such as `sin(x)`.
    ///
    /// The arguments are normalized so that equal arguments produce the same
    /// kernel.
    #[must_use]
    pub fn function(name: &str, args: &[Expr]) -> Self {
        let rendered: Vec<String> = args.iter().map(|a| a.normal().to_string()).collect();
        let kernel = format!("{name}({})", rendered.join(","));
        Self::from_poly(Poly::atom(Atom::Kernel(Arc::from(kernel.as_str()))))
    }

    /// The numerator polynomial.
    #[must_use]
    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    /// The denominator polynomial.
    #[must_use]
    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    /// The value as a plain number, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        if self.den.as_constant().is_some() {
            self.num.as_constant()
        } else {
            None
        }
    }

    fn rename(&self, f: &impl Fn(&Atom) -> Option<Atom>) -> Self {
        Self::from_parts(self.num.rename(f), self.den.rename(f))
    }

    fn kernels(&self) -> impl Iterator<Item = Atom> {
        let mut atoms = self.num.atoms();
        atoms.extend(self.den.atoms());
        atoms.into_iter().filter(|a| !a.is_symbol())
    }
}

impl RingElement for Expr {
    type Substitution = Substitution;

    fn zero() -> Self {
        Self::from_poly(Poly::zero())
    }

    fn one() -> Self {
        Self::from_poly(Poly::one())
    }

    fn from_i64(n: i64) -> Self {
        Self::integer(n)
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn div(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "division by zero");
        Self::from_parts(&self.num * &other.den, &self.den * &other.num)
    }

    fn exact_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let dividend = &self.num * &other.den;
        let divisor = &self.den * &other.num;
        dividend.div_exact(&divisor).map(Self::from_poly)
    }

    fn expand(&self) -> Self {
        self.clone()
    }

    fn normal(&self) -> Self {
        if self.num.is_zero() {
            return Self::zero();
        }
        let g = self.num.gcd(&self.den);
        let (num, den) = if g.as_constant().is_some() {
            (self.num.clone(), self.den.clone())
        } else {
            (
                self.num.div_exact(&g).expect("gcd divides the numerator"),
                self.den.div_exact(&g).expect("gcd divides the denominator"),
            )
        };
        let lc = den.leading_coeff().cloned().unwrap_or_else(Number::one);
        let scale = lc.recip();
        Self::from_parts(num.scale(&scale), den.scale(&scale))
    }

    fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    fn is_symbol(&self) -> bool {
        self.den.as_constant().is_some() && self.num.as_atom().is_some_and(Atom::is_symbol)
    }

    fn is_integer(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_integer())
    }

    fn is_negative(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_negative())
    }

    fn is_polynomial(&self) -> bool {
        self.den.as_constant().is_some()
    }

    fn is_rational_function(&self) -> bool {
        true
    }

    fn to_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.to_i64())
    }

    fn cmp_magnitude(&self, other: &Self) -> Option<Ordering> {
        Some(self.as_number()?.cmp_abs(&other.as_number()?))
    }

    fn compare(&self, other: &Self) -> Ordering {
        let a = self.normal();
        let b = other.normal();
        a.num.cmp(&b.num).then_with(|| a.den.cmp(&b.den))
    }

    fn to_rational(&self, subs: &mut Substitution) -> Self {
        for kernel in self.kernels() {
            subs.replacement_for(&kernel);
        }
        if subs.is_empty() {
            return self.clone();
        }
        let forward = &subs.forward;
        self.rename(&|atom: &Atom| forward.get(atom).cloned())
    }

    fn numer(&self) -> Self {
        Self::from_poly(self.num.clone())
    }

    fn denom(&self) -> Self {
        Self::from_poly(self.den.clone())
    }

    fn restore(&self, subs: &Substitution) -> Self {
        if subs.is_empty() {
            return self.clone();
        }
        let backward: BTreeMap<&Atom, &Atom> = subs.forward.iter().map(|(k, v)| (v, k)).collect();
        self.rename(&|atom: &Atom| backward.get(atom).map(|a| (*a).clone()))
    }

    fn fresh_symbol() -> Self {
        Self::from_poly(Poly::atom(Atom::fresh()))
    }
}

impl PartialEq for Expr {
    /// Exact equality of rational functions: `a/b == c/d` iff `a*d == c*b`.
    fn eq(&self, other: &Self) -> bool {
        if self.den == other.den {
            return self.num == other.num;
        }
        &self.num * &other.den == &other.num * &self.den
    }
}

impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Add for &Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Expr {
        if self.den == rhs.den {
            return Expr::from_parts(&self.num + &rhs.num, self.den.clone());
        }
        Expr::from_parts(
            &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            &self.den * &rhs.den,
        )
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Sub for &Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Expr {
        self + &(-rhs)
    }
}

impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul for &Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Expr {
        if self.num.is_zero() || rhs.num.is_zero() {
            return Expr::zero();
        }
        Expr::from_parts(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<Number> for Expr {
    fn from(n: Number) -> Self {
        Self::from_poly(Poly::constant(n))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.as_constant().is_some() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({})/({})", self.num, self.den)
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawExpr {
    num: Poly,
    den: Poly,
}

#[cfg(feature = "serde")]
impl TryFrom<RawExpr> for Expr {
    type Error = &'static str;

    fn try_from(raw: RawExpr) -> Result<Self, Self::Error> {
        if raw.den.is_zero() {
            return Err("denominator cannot be zero");
        }
        Ok(Self::from_parts(raw.num, raw.den))
    }
}

#[cfg(feature = "serde")]
impl From<Expr> for RawExpr {
    fn from(e: Expr) -> Self {
        Self { num: e.num, den: e.den }
    }
}
