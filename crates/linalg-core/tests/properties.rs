//! Property-based tests using proptest.
//!
//! These tests check the algebraic laws the two operations must satisfy
//! on both backends.

use linalg_core::marshal::{extract, shape, Shape};
use linalg_core::{BackendKind, Engine, LinalgConfig, Value};
use proptest::prelude::*;

fn engine(kind: BackendKind) -> Engine {
    let mut cfg = LinalgConfig::new();
    cfg.backend = kind;
    Engine::new(cfg)
}

fn backend_strategy() -> impl Strategy<Value = BackendKind> {
    prop_oneof![Just(BackendKind::Native), Just(BackendKind::Nalgebra)]
}

// Row-major data for a rows x cols matrix
fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-100.0f64..100.0, rows * cols)
}

fn to_value(rows: usize, cols: usize, data: &[f64]) -> Value {
    Value::Vector(
        (0..rows)
            .map(|i| Value::Vector((0..cols).map(|j| Value::Float(data[i * cols + j])).collect()))
            .collect(),
    )
}

fn identity(n: usize) -> Value {
    Value::Vector(
        (0..n)
            .map(|i| Value::Vector((0..n).map(|j| Value::Integer((i == j) as i64)).collect()))
            .collect(),
    )
}

fn flatten(value: &Value) -> Vec<f64> {
    match value {
        Value::Vector(items) => items.iter().flat_map(flatten).collect(),
        scalar => vec![extract(scalar).expect("numeric element")],
    }
}

fn naive_product(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            c[i * n + j] = (0..k).map(|p| a[i * k + p] * b[p * n + j]).sum();
        }
    }
    c
}

fn dims() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..6, 1usize..6, 1usize..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn identity_is_left_neutral(
        kind in backend_strategy(),
        (n, a) in (1usize..6).prop_flat_map(|n| (Just(n), matrix_strategy(n, n)))
    ) {
        let m = to_value(n, n, &a);
        let product = engine(kind).multiply(&identity(n), &m).expect("multiply failed");
        prop_assert_eq!(product, m);
    }

    #[test]
    fn product_matches_definition(
        kind in backend_strategy(),
        ((m, k, n), a, b) in dims().prop_flat_map(|(m, k, n)| {
            (Just((m, k, n)), matrix_strategy(m, k), matrix_strategy(k, n))
        })
    ) {
        let c = engine(kind)
            .multiply(&to_value(m, k, &a), &to_value(k, n, &b))
            .expect("multiply failed");
        prop_assert_eq!(shape(&c).expect("shape"), Shape::new(m, n));

        let expected = naive_product(&a, &b, m, k, n);
        for (got, want) in flatten(&c).iter().zip(&expected) {
            prop_assert!((got - want).abs() <= 1e-9 * (1.0 + want.abs()));
        }
    }

    #[test]
    fn solve_residual_is_small(
        kind in backend_strategy(),
        (n, mut a, b) in (1usize..6).prop_flat_map(|n| {
            (Just(n), matrix_strategy(n, n), proptest::collection::vec(-100.0f64..100.0, n))
        })
    ) {
        // diagonal dominance keeps the system well conditioned
        for i in 0..n {
            a[i * n + i] += if a[i * n + i] >= 0.0 { 1000.0 } else { -1000.0 };
        }

        let b_value = Value::Vector(b.iter().copied().map(Value::Float).collect());
        let x = engine(kind).solve(&to_value(n, n, &a), &b_value).expect("solve failed");
        let xs = flatten(&x);
        prop_assert_eq!(xs.len(), n);

        let ax = naive_product(&a, &xs, n, n, 1);
        for (lhs, rhs) in ax.iter().zip(&b) {
            prop_assert!((lhs - rhs).abs() < 1e-8, "{} vs {}", lhs, rhs);
        }
    }

    #[test]
    fn integer_extraction_is_exact(i in -(1i64 << 53)..=(1i64 << 53)) {
        prop_assert_eq!(extract(&Value::Integer(i)).expect("integer"), i as f64);
        prop_assert_eq!(extract(&Value::Integer(i)).expect("integer") as i64, i);
    }

    #[test]
    fn flat_vector_shape_has_zero_cols(len in 1usize..32) {
        let vector = Value::Vector(vec![Value::Integer(1); len]);
        prop_assert_eq!(shape(&vector).expect("shape"), Shape::new(len, 0));
    }
}
