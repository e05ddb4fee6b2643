//! Backend delegating to the `nalgebra` crate

use nalgebra::{DMatrix, DVector};
use tracing::warn;

use super::{
    check_gemm_dims, check_solve_dims, is_singular_pivot, singular_threshold, NumericBackend,
};
use crate::error::{LinalgError, LinalgResult};
use crate::marshal::DenseBuffer;

#[derive(Debug, Clone)]
pub struct NalgebraBackend {
    singular_tolerance: f64,
}

impl NalgebraBackend {
    pub fn new(singular_tolerance: f64) -> Self {
        NalgebraBackend { singular_tolerance }
    }
}

impl Default for NalgebraBackend {
    fn default() -> Self {
        NalgebraBackend::new(f64::EPSILON)
    }
}

fn to_dmatrix(buf: &DenseBuffer) -> DMatrix<f64> {
    // nalgebra stores column-major; from_row_slice transposes for us
    DMatrix::from_row_slice(buf.rows(), buf.cols(), buf.as_slice())
}

fn from_dmatrix(m: &DMatrix<f64>) -> DenseBuffer {
    let (rows, cols) = m.shape();
    let mut out = DenseBuffer::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            out.set(i, j, m[(i, j)]);
        }
    }
    out
}

impl NumericBackend for NalgebraBackend {
    fn name(&self) -> &'static str {
        "nalgebra"
    }

    fn gemm(&self, a: &DenseBuffer, b: &DenseBuffer) -> LinalgResult<DenseBuffer> {
        check_gemm_dims(a, b)?;
        let c = to_dmatrix(a) * to_dmatrix(b);
        Ok(from_dmatrix(&c))
    }

    fn lu_solve(&self, a: DenseBuffer, b: &DenseBuffer) -> LinalgResult<DenseBuffer> {
        let n = check_solve_dims(&a, b)?;
        let threshold = singular_threshold(&a, self.singular_tolerance);
        let lu = to_dmatrix(&a).lu();

        let u = lu.u();
        for k in 0..n {
            let pivot = u[(k, k)];
            if is_singular_pivot(pivot, threshold) {
                warn!(column = k, pivot, "singular pivot during LU decomposition");
                return Err(LinalgError::SingularMatrix {
                    column: k,
                    pivot: pivot.abs(),
                });
            }
        }

        let rhs = DVector::from_column_slice(b.as_slice());
        let x = lu
            .solve(&rhs)
            .ok_or_else(|| LinalgError::Backend("nalgebra LU solve failed".to_string()))?;
        Ok(DenseBuffer::column(x.iter().copied().collect()))
    }
}
