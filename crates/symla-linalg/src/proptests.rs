//! Property-based tests for matrix algorithms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use symla_ring::{Expr, RingElement};

    use crate::determinant::DeterminantAlgorithm;
    use crate::matrix::Matrix;
    use crate::solve::SolveAlgorithm;

    const ALGORITHMS: [DeterminantAlgorithm; 4] = [
        DeterminantAlgorithm::Gauss,
        DeterminantAlgorithm::FractionFree,
        DeterminantAlgorithm::DivisionFree,
        DeterminantAlgorithm::Laplace,
    ];

    // Strategy for small integer entries
    fn small_int() -> impl Strategy<Value = Expr> + Clone {
        (-5i64..=5i64).prop_map(Expr::integer)
    }

    // Strategy for entries drawn from integers and a few polynomials in x, y
    fn symbolic_entry() -> impl Strategy<Value = Expr> + Clone {
        prop_oneof![
            3 => small_int(),
            1 => Just(Expr::symbol("x")),
            1 => Just(Expr::symbol("y")),
            1 => (-3i64..=3i64).prop_map(|c| Expr::symbol("x") + Expr::integer(c)),
        ]
    }

    fn square_matrix<S>(entry: S, max_dim: usize) -> impl Strategy<Value = Matrix<Expr>>
    where
        S: Strategy<Value = Expr> + Clone,
    {
        (1..=max_dim).prop_flat_map(move |n| {
            proptest::collection::vec(entry.clone(), n * n)
                .prop_map(move |entries| Matrix::from_flat(n, n, entries))
        })
    }

    fn rect_matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix<Expr>> {
        proptest::collection::vec(symbolic_entry(), rows * cols)
            .prop_map(move |entries| Matrix::from_flat(rows, cols, entries))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn transpose_is_involution(m in square_matrix(symbolic_entry(), 4)) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn numeric_determinants_agree(m in square_matrix(small_int(), 5)) {
            let expected = m.determinant(DeterminantAlgorithm::Laplace).unwrap();
            for algo in ALGORITHMS {
                prop_assert_eq!(m.determinant(algo).unwrap(), expected.clone());
            }
        }

        #[test]
        fn symbolic_determinants_agree(m in square_matrix(symbolic_entry(), 4)) {
            let expected = m.determinant(DeterminantAlgorithm::Laplace).unwrap();
            for algo in ALGORITHMS {
                prop_assert_eq!(m.determinant(algo).unwrap(), expected.clone());
            }
        }

        #[test]
        fn determinant_is_homogeneous(m in square_matrix(symbolic_entry(), 4), k in small_int()) {
            let n = u32::try_from(m.rows()).unwrap();
            let det = m.determinant(DeterminantAlgorithm::Automatic).unwrap();
            let scaled = m.mul_scalar(&k).unwrap();
            let det_scaled = scaled.determinant(DeterminantAlgorithm::Automatic).unwrap();
            prop_assert_eq!(det_scaled, k.pow(n) * det);
        }

        #[test]
        fn mul_is_associative(
            a in rect_matrix(2, 3),
            b in rect_matrix(3, 2),
            c in rect_matrix(2, 3),
        ) {
            let left = a.mul(&b).unwrap().mul(&c).unwrap();
            let right = a.mul(&b.mul(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn inverse_is_two_sided(m in square_matrix(small_int(), 4)) {
            let det = m.determinant(DeterminantAlgorithm::Automatic).unwrap();
            prop_assume!(!det.is_zero());
            let inv = m.inverse().unwrap();
            let id = Matrix::identity(m.rows());
            prop_assert_eq!(m.mul(&inv).unwrap(), id.clone());
            prop_assert_eq!(inv.mul(&m).unwrap(), id);
        }

        #[test]
        fn unique_solution_satisfies_system(
            m in square_matrix(symbolic_entry(), 3),
            rhs_entries in proptest::collection::vec(symbolic_entry(), 3),
        ) {
            let det = m.determinant(DeterminantAlgorithm::Automatic).unwrap();
            prop_assume!(!det.is_zero());
            let n = m.rows();
            let vars = Matrix::from_flat(
                n,
                1,
                (0..n).map(|i| Expr::symbol(&format!("u{i}"))).collect(),
            );
            let rhs = Matrix::from_flat(n, 1, rhs_entries);
            for algo in [SolveAlgorithm::Gauss, SolveAlgorithm::DivisionFree, SolveAlgorithm::FractionFree] {
                let sol = m.solve(&vars, &rhs, algo).unwrap();
                prop_assert_eq!(m.mul(&sol).unwrap().map(RingElement::normal), rhs.clone());
            }
        }
    }
}
