//! Benchmarks for linear system solving, inversion and characteristic polynomials.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use symla::prelude::*;

/// Generates a matrix with one symbol on the diagonal and integers elsewhere.
fn shifted_matrix(n: usize) -> Matrix<Expr> {
    let x = Expr::symbol("x");
    let mut m = Matrix::zeros(n, n);
    for r in 0..n {
        for c in 0..n {
            m[(r, c)] = if r == c {
                x.clone() + Expr::integer(r as i64)
            } else {
                Expr::integer(((r * 3 + c * 5) % 7) as i64 - 3)
            };
        }
    }
    m
}

fn unknowns(n: usize) -> Matrix<Expr> {
    let entries = (0..n).map(|i| Expr::symbol(&format!("u{i}"))).collect();
    Matrix::from_flat(n, 1, entries)
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_symbolic");
    group.sample_size(20);

    for size in [2, 3, 4, 5] {
        let m = shifted_matrix(size);
        let vars = unknowns(size);
        let rhs = Matrix::from_flat(size, 1, vec![Expr::integer(1); size]);
        for algo in [
            SolveAlgorithm::Gauss,
            SolveAlgorithm::DivisionFree,
            SolveAlgorithm::FractionFree,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{algo:?}"), size),
                &size,
                |b, _| b.iter(|| black_box(m.solve(&vars, &rhs, algo))),
            );
        }
    }

    group.finish();
}

/// A 4x4 system mixing rational functions of `x` with the kernel `sin(x)`.
fn rational_kernel_system() -> (Matrix<Expr>, Matrix<Expr>) {
    let x = Expr::symbol("x");
    let s = Expr::function("sin", &[x.clone()]);
    let n = Expr::integer;
    let r = n(1).div(&(x.clone() - n(1)));
    let a = Matrix::from_rows(vec![
        vec![x.clone(), x.clone() + n(1), r.clone(), r.clone()],
        vec![n(-2), r, x.clone(), n(0)],
        vec![x.clone(), s.clone(), x.clone(), s.clone()],
        vec![n(-1), n(-1), s, x.clone() + n(1)],
    ]);
    let rhs = Matrix::from_rows(vec![
        vec![n(1), x.clone()],
        vec![n(0), n(2)],
        vec![x.clone(), n(0)],
        vec![n(3), n(-1)],
    ]);
    (a, rhs)
}

fn bench_solve_rational_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_rational_kernels");
    group.sample_size(10);
    let (a, rhs) = rational_kernel_system();
    let vars = Matrix::from_flat(
        4,
        2,
        (0..8).map(|i| Expr::symbol(&format!("u{i}"))).collect(),
    );

    for algo in [
        SolveAlgorithm::Gauss,
        SolveAlgorithm::DivisionFree,
        SolveAlgorithm::FractionFree,
    ] {
        group.bench_function(format!("{algo:?}"), |b| {
            b.iter(|| black_box(a.solve(&vars, &rhs, algo)))
        });
    }

    group.finish();
}

fn bench_inverse_and_charpoly(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_operations");
    group.sample_size(20);
    let lambda = Expr::symbol("lambda");

    for size in [2, 3, 4] {
        let m = shifted_matrix(size);
        group.bench_with_input(BenchmarkId::new("inverse", size), &size, |b, _| {
            b.iter(|| black_box(m.inverse()))
        });
        group.bench_with_input(BenchmarkId::new("charpoly", size), &size, |b, _| {
            b.iter(|| black_box(m.charpoly(&lambda)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_rational_kernels,
    bench_inverse_and_charpoly
);

criterion_main!(benches);
