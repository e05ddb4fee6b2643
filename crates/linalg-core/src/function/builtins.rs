//! Built-in entry points exposed to the host

use super::spec::FunctionSpec;
use super::table::FunctionTable;
use crate::engine::Engine;
use crate::error::{LinalgError, LinalgResult};
use crate::value::Value;

/// Feature name provided once the built-ins are bound
pub const FEATURE: &str = "gsl-linalg";

pub const LU_SOLVE: FunctionSpec = FunctionSpec {
    name: "gsl-linalg-LU-solve",
    doc: "(gsl-linalg-LU-solve A b).\n\
          Solve A x = b for x.\n\
          Returns a vector containing the solution x.",
    min_args: 2,
    max_args: 2,
    handler: lu_solve,
};

pub const BLAS_DGEMM: FunctionSpec = FunctionSpec {
    name: "gsl-blas-dgemm",
    doc: "(gsl-blas-dgemm M0 M1)\n\
          Matrix multiply M0 and M1.\n\
          Both matrices must be 2D vectors.\n\
          Returns a vector.",
    min_args: 2,
    max_args: 2,
    handler: blas_dgemm,
};

/// Every built-in, in binding order
pub const BUILTINS: [FunctionSpec; 2] = [LU_SOLVE, BLAS_DGEMM];

// The table checks arity first; handlers are also public, so recheck here.
fn two_args<'a>(name: &str, args: &'a [Value]) -> LinalgResult<(&'a Value, &'a Value)> {
    let [a, b] = args else {
        return Err(LinalgError::ArityMismatch {
            name: name.to_string(),
            min: 2,
            max: 2,
            got: args.len(),
        });
    };
    Ok((a, b))
}

fn lu_solve(engine: &Engine, args: &[Value]) -> LinalgResult<Value> {
    let (a, b) = two_args(LU_SOLVE.name, args)?;
    engine.solve(a, b)
}

fn blas_dgemm(engine: &Engine, args: &[Value]) -> LinalgResult<Value> {
    let (m0, m1) = two_args(BLAS_DGEMM.name, args)?;
    engine.multiply(m0, m1)
}

/// Table with every built-in bound
pub fn builtin_table() -> FunctionTable {
    let mut table = FunctionTable::new();
    for spec in BUILTINS {
        table.register(spec);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docstrings_use_host_line_breaks() {
        assert_eq!(
            LU_SOLVE.doc,
            "(gsl-linalg-LU-solve A b).\nSolve A x = b for x.\nReturns a vector containing the solution x."
        );
        assert!(BLAS_DGEMM.doc.starts_with("(gsl-blas-dgemm M0 M1)\nMatrix multiply"));
    }

    #[test]
    fn builtins_dispatch_through_table() {
        let engine = Engine::default();
        let table = builtin_table();
        assert_eq!(table.names(), vec!["gsl-blas-dgemm", "gsl-linalg-LU-solve"]);

        let x = table
            .call(
                &engine,
                "gsl-linalg-LU-solve",
                &[Value::from(vec![vec![2i64, 0], vec![0, 2]]), Value::from(vec![4i64, 6])],
            )
            .unwrap();
        assert_eq!(x, Value::from(vec![2.0, 3.0]));
    }

    #[test]
    fn builtins_take_exactly_two_arguments() {
        let engine = Engine::default();
        let table = builtin_table();
        let err = table
            .call(&engine, "gsl-blas-dgemm", &[Value::from(vec![vec![1i64]])])
            .unwrap_err();
        assert_eq!(
            err,
            LinalgError::ArityMismatch {
                name: "gsl-blas-dgemm".into(),
                min: 2,
                max: 2,
                got: 1
            }
        );
    }

    #[test]
    fn handlers_called_directly_reject_short_slices() {
        let engine = Engine::default();
        let one = [Value::from(vec![vec![1i64]])];

        let err = (LU_SOLVE.handler)(&engine, &one).unwrap_err();
        assert_eq!(
            err,
            LinalgError::ArityMismatch {
                name: "gsl-linalg-LU-solve".into(),
                min: 2,
                max: 2,
                got: 1
            }
        );

        let err = (BLAS_DGEMM.handler)(&engine, &[]).unwrap_err();
        assert!(matches!(err, LinalgError::ArityMismatch { got: 0, .. }));
    }
}
