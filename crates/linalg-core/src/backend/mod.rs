//! Numeric backends
//!
//! The engine only marshals; the dense product and the LU solve happen
//! behind [`NumericBackend`], so the concrete numeric library can be swapped
//! without touching the marshaling code.

pub mod nalgebra_backend;
pub mod native;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{LinalgError, LinalgResult};
use crate::marshal::DenseBuffer;

pub use nalgebra_backend::NalgebraBackend;
pub use native::{LuDecomposition, NativeBackend};

/// Dense linear algebra primitives consumed by the engine.
pub trait NumericBackend: fmt::Debug + Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// `C = 1.0 * A * B + 0.0 * C`; a plain product, never accumulating.
    fn gemm(&self, a: &DenseBuffer, b: &DenseBuffer) -> LinalgResult<DenseBuffer>;

    /// Decompose `a` (consumed) as `P * A = L * U` and solve `A * x = b`.
    /// `b` is an `n x 1` column; the result has the same shape.
    fn lu_solve(&self, a: DenseBuffer, b: &DenseBuffer) -> LinalgResult<DenseBuffer>;
}

/// Selectable backend implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Pure Rust partial-pivoting LU, kept to cross-check the library
    Native,
    /// Delegate to the `nalgebra` crate (default)
    Nalgebra,
}

impl BackendKind {
    pub fn build(self, singular_tolerance: f64) -> Box<dyn NumericBackend> {
        match self {
            BackendKind::Native => Box::new(NativeBackend::new(singular_tolerance)),
            BackendKind::Nalgebra => Box::new(NalgebraBackend::new(singular_tolerance)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Native => "native",
            BackendKind::Nalgebra => "nalgebra",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(BackendKind::Native),
            "nalgebra" => Ok(BackendKind::Nalgebra),
            other => Err(format!("unknown backend '{}' (expected native or nalgebra)", other)),
        }
    }
}

/// Inner dimensions of a product must agree.
pub(crate) fn check_gemm_dims(a: &DenseBuffer, b: &DenseBuffer) -> LinalgResult<()> {
    if a.cols() != b.rows() {
        return Err(LinalgError::DimensionMismatch {
            op: "multiply",
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

/// Pivot magnitude at or below which `a` is treated as singular:
/// `n * tolerance * max|a_ij|`, taken before elimination. An all-zero
/// matrix gets a threshold of zero, so only exact zeros fail there.
pub(crate) fn singular_threshold(a: &DenseBuffer, tolerance: f64) -> f64 {
    let scale = a.as_slice().iter().fold(0.0f64, |m, x| m.max(x.abs()));
    a.rows() as f64 * tolerance * scale
}

/// Shared pivot test for both backends.
pub(crate) fn is_singular_pivot(pivot: f64, threshold: f64) -> bool {
    pivot.is_nan() || pivot.abs() <= threshold
}

/// `a` must be square and `b` a column of matching length.
pub(crate) fn check_solve_dims(a: &DenseBuffer, b: &DenseBuffer) -> LinalgResult<usize> {
    let n = a.rows();
    if a.cols() != n || b.rows() != n || b.cols() != 1 {
        return Err(LinalgError::DimensionMismatch {
            op: "solve",
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(n)
}
