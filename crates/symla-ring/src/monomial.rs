//! Atoms and monomials.
//!
//! A monomial is a product of atoms raised to positive powers. Atoms are
//! either symbols or opaque function kernels such as `sin(x)`; to the
//! polynomial arithmetic both are just indeterminates.

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use smallvec::SmallVec;

static FRESH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An indeterminate.
///
/// The derived order is the variable order of the lexicographic term order:
/// later variants and larger names are more significant.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Atom {
    /// A user-named symbol.
    Symbol(Arc<str>),
    /// A generated symbol, unique for the lifetime of the process.
    ///
    /// Ids are only meaningful inside the process that allocated them, so
    /// this variant is neither serialized nor deserialized.
    #[cfg_attr(feature = "serde", serde(skip))]
    Fresh(u64),
    /// An opaque function application, identified by its canonical rendering.
    Kernel(Arc<str>),
}

impl Atom {
    /// Creates a named symbol.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::Symbol(Arc::from(name))
    }

    /// Creates a symbol distinct from every other atom.
    #[must_use]
    pub fn fresh() -> Self {
        Self::Fresh(FRESH_COUNTER.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Returns true for named and generated symbols.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        !matches!(self, Self::Kernel(_))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(name) | Self::Kernel(name) => write!(f, "{name}"),
            Self::Fresh(id) => write!(f, "symbol{id}"),
        }
    }
}

/// A monomial: atoms with positive exponents, sorted by atom.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monomial(SmallVec<[(Atom, u32); 4]>);

impl Monomial {
    /// The monomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self(SmallVec::new())
    }

    /// The monomial `atom^exp`.
    #[must_use]
    pub fn power(atom: Atom, exp: u32) -> Self {
        if exp == 0 {
            return Self::one();
        }
        let mut factors = SmallVec::new();
        factors.push((atom, exp));
        Self(factors)
    }

    /// Returns true for the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// The factors in increasing atom order.
    #[must_use]
    pub fn factors(&self) -> &[(Atom, u32)] {
        &self.0
    }

    /// The most significant atom.
    #[must_use]
    pub fn max_atom(&self) -> Option<&Atom> {
        self.0.last().map(|(a, _)| a)
    }

    /// Exponent of `atom` (0 if absent).
    #[must_use]
    pub fn degree(&self, atom: &Atom) -> u32 {
        self.0
            .binary_search_by(|(a, _)| a.cmp(atom))
            .map_or(0, |i| self.0[i].1)
    }

    /// Splits off the power of `atom`, returning (exponent, remaining monomial).
    #[must_use]
    pub fn split(&self, atom: &Atom) -> (u32, Self) {
        match self.0.binary_search_by(|(a, _)| a.cmp(atom)) {
            Ok(i) => {
                let mut rest = self.0.clone();
                let (_, e) = rest.remove(i);
                (e, Self(rest))
            }
            Err(_) => (0, self.clone()),
        }
    }

    /// Multiplies two monomials (adds exponents).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut out = SmallVec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].0.cmp(&other.0[j].0) {
                Ordering::Less => {
                    out.push(self.0[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(other.0[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    out.push((self.0[i].0.clone(), self.0[i].1 + other.0[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend(self.0[i..].iter().cloned());
        out.extend(other.0[j..].iter().cloned());
        Self(out)
    }

    /// Divides by another monomial if possible.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        let mut out = SmallVec::with_capacity(self.0.len());
        let mut j = 0;
        for (atom, e) in &self.0 {
            if j < other.0.len() && other.0[j].0 < *atom {
                // `other` has an atom that `self` lacks
                return None;
            }
            if j < other.0.len() && other.0[j].0 == *atom {
                let d = other.0[j].1;
                j += 1;
                match e.cmp(&d) {
                    Ordering::Less => return None,
                    Ordering::Equal => continue,
                    Ordering::Greater => out.push((atom.clone(), e - d)),
                }
            } else {
                out.push((atom.clone(), *e));
            }
        }
        if j < other.0.len() {
            return None;
        }
        Some(Self(out))
    }

    /// Renames atoms; the result is re-sorted and like atoms merged.
    #[must_use]
    pub fn rename(&self, f: &impl Fn(&Atom) -> Option<Atom>) -> Self {
        self.0.iter().fold(Self::one(), |acc, (atom, e)| {
            let atom = f(atom).unwrap_or_else(|| atom.clone());
            acc.mul(&Self::power(atom, *e))
        })
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    /// Lexicographic term order: compare exponents of the most significant
    /// atom first.
    fn cmp(&self, other: &Self) -> Ordering {
        let mut a = self.0.iter().rev();
        let mut b = other.0.iter().rev();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((va, ea)), Some((vb, eb))) => match va.cmp(vb).then(ea.cmp(eb)) {
                    Ordering::Equal => {}
                    ord => return ord,
                },
            }
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .rev()
            .map(|(atom, e)| {
                if *e == 1 {
                    atom.to_string()
                } else {
                    format!("{atom}^{e}")
                }
            })
            .collect();
        write!(f, "{}", parts.join("*"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Atom {
        Atom::symbol("x")
    }

    fn y() -> Atom {
        Atom::symbol("y")
    }

    #[test]
    fn test_lex_order() {
        // y is the more significant variable
        let y1 = Monomial::power(y(), 1);
        let x5 = Monomial::power(x(), 5);
        assert!(y1 > x5);

        let xy = Monomial::power(x(), 1).mul(&y1);
        assert!(xy > y1);
        assert!(Monomial::one() < x5);
    }

    #[test]
    fn test_mul_div() {
        let a = Monomial::power(x(), 2).mul(&Monomial::power(y(), 1));
        let b = Monomial::power(x(), 1);
        let q = a.div(&b).unwrap();
        assert_eq!(q, Monomial::power(x(), 1).mul(&Monomial::power(y(), 1)));
        assert_eq!(b.div(&a), None);
        assert_eq!(a.degree(&x()), 2);
        assert_eq!(a.split(&y()), (1, Monomial::power(x(), 2)));
    }

    #[test]
    fn test_fresh_atoms_are_distinct() {
        assert_ne!(Atom::fresh(), Atom::fresh());
        assert!(Atom::fresh().is_symbol());
        assert!(!Atom::Kernel(Arc::from("sin(x)")).is_symbol());
    }

    #[test]
    fn test_display() {
        let m = Monomial::power(x(), 2).mul(&Monomial::power(y(), 1));
        assert_eq!(m.to_string(), "y*x^2");
    }
}
