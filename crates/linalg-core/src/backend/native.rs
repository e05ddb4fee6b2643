//! Pure Rust backend: triple-loop product and Doolittle LU with partial pivoting

use tracing::warn;

use super::{
    check_gemm_dims, check_solve_dims, is_singular_pivot, singular_threshold, NumericBackend,
};
use crate::error::{LinalgError, LinalgResult};
use crate::marshal::DenseBuffer;

/// Packed LU factors of a square matrix.
///
/// `lu` holds U on and above the diagonal and the multipliers of L (unit
/// diagonal implied) below it. Row `i` of `P * A` is row `permutation[i]`
/// of `A`; `parity` is the permutation's sign.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    pub lu: DenseBuffer,
    pub permutation: Vec<usize>,
    pub parity: i8,
}

impl LuDecomposition {
    /// Solve `A * x = b` from the factors (`b` is an `n x 1` column).
    pub fn solve(&self, b: &DenseBuffer) -> LinalgResult<DenseBuffer> {
        let n = check_solve_dims(&self.lu, b)?;
        let lu = &self.lu;

        // Forward substitution: L y = P b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += lu.get(i, j) * y[j];
            }
            y[i] = b.get(self.permutation[i], 0) - sum;
        }

        // Backward substitution: U x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += lu.get(i, j) * x[j];
            }
            x[i] = (y[i] - sum) / lu.get(i, i);
        }

        Ok(DenseBuffer::column(x))
    }
}

/// Dependency-free backend used to cross-check the library backend
#[derive(Debug, Clone)]
pub struct NativeBackend {
    singular_tolerance: f64,
}

impl NativeBackend {
    pub fn new(singular_tolerance: f64) -> Self {
        NativeBackend { singular_tolerance }
    }

    /// Factor `a` in place. Fails on the first pivot at or below
    /// `n * tolerance * max|a_ij|`.
    pub fn lu_decompose(&self, mut a: DenseBuffer) -> LinalgResult<LuDecomposition> {
        let n = a.rows();
        if a.cols() != n {
            return Err(LinalgError::DimensionMismatch {
                op: "lu_decompose",
                lhs: a.shape(),
                rhs: (n, n),
            });
        }

        let threshold = singular_threshold(&a, self.singular_tolerance);
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut parity: i8 = 1;

        for col in 0..n {
            // Pivot: largest magnitude in this column at or below the diagonal
            let mut pivot_row = col;
            let mut max_val = a.get(col, col).abs();
            for row in (col + 1)..n {
                let val = a.get(row, col).abs();
                if val > max_val {
                    max_val = val;
                    pivot_row = row;
                }
            }

            if pivot_row != col {
                let data = a.as_mut_slice();
                for j in 0..n {
                    data.swap(col * n + j, pivot_row * n + j);
                }
                permutation.swap(col, pivot_row);
                parity = -parity;
            }

            let pivot = a.get(col, col);
            if is_singular_pivot(pivot, threshold) {
                warn!(column = col, pivot, "singular pivot during LU decomposition");
                return Err(LinalgError::SingularMatrix {
                    column: col,
                    pivot: pivot.abs(),
                });
            }

            for row in (col + 1)..n {
                let multiplier = a.get(row, col) / pivot;
                a.set(row, col, multiplier);
                for j in (col + 1)..n {
                    let updated = a.get(row, j) - multiplier * a.get(col, j);
                    a.set(row, j, updated);
                }
            }
        }

        Ok(LuDecomposition {
            lu: a,
            permutation,
            parity,
        })
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        NativeBackend::new(f64::EPSILON)
    }
}

impl NumericBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn gemm(&self, a: &DenseBuffer, b: &DenseBuffer) -> LinalgResult<DenseBuffer> {
        check_gemm_dims(a, b)?;
        let (m, k) = a.shape();
        let n = b.cols();

        let mut c = DenseBuffer::zeros(m, n);
        for i in 0..m {
            for p in 0..k {
                let aip = a.get(i, p);
                for j in 0..n {
                    let acc = c.get(i, j) + aip * b.get(p, j);
                    c.set(i, j, acc);
                }
            }
        }
        Ok(c)
    }

    fn lu_solve(&self, a: DenseBuffer, b: &DenseBuffer) -> LinalgResult<DenseBuffer> {
        check_solve_dims(&a, b)?;
        self.lu_decompose(a)?.solve(b)
    }
}
