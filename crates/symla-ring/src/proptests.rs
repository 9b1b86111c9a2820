//! Property-based tests for rational function arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Expr, RingElement};

    // Strategy for small polynomials in x and y of degree at most 2 in each
    fn small_poly() -> impl Strategy<Value = Expr> {
        proptest::collection::vec(-5i64..5i64, 9).prop_map(|coeffs| {
            let x = Expr::symbol("x");
            let y = Expr::symbol("y");
            let mut acc = Expr::zero();
            for (k, c) in coeffs.into_iter().enumerate() {
                let i = u32::try_from(k % 3).unwrap();
                let j = u32::try_from(k / 3).unwrap();
                acc = acc + Expr::integer(c) * x.pow(i) * y.pow(j);
            }
            acc
        })
    }

    fn nonzero_poly() -> impl Strategy<Value = Expr> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn mul_distributes(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.clone() * (b.clone() + c.clone());
            let right = a.clone() * b + a * c;
            prop_assert_eq!(left, right);
        }

        #[test]
        fn exact_div_inverts_mul(a in small_poly(), b in nonzero_poly()) {
            let prod = a.clone() * b.clone();
            prop_assert_eq!(prod.exact_div(&b), Some(a));
        }

        #[test]
        fn normal_preserves_value(a in small_poly(), b in nonzero_poly(), c in nonzero_poly()) {
            // (a*c)/(b*c) normalizes to a value equal to a/b
            let e = (a.clone() * c.clone()).div(&(b.clone() * c));
            let nrm = e.normal();
            prop_assert_eq!(nrm.clone(), a.div(&b));
            let renormalized = nrm.normal();
            prop_assert_eq!(renormalized.numerator(), nrm.numerator());
        }

        #[test]
        fn division_round_trips(a in small_poly(), b in nonzero_poly()) {
            prop_assert_eq!(a.div(&b) * b, a);
        }
    }
}
