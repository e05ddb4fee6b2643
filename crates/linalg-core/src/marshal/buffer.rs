//! Dense row-major buffers and the marshalers that fill them

use tracing::trace;

use super::scalar::extract;
use super::shape::{elements, Shape};
use crate::error::{LinalgError, LinalgResult};
use crate::value::Value;

/// Owned row-major `f64` storage with explicit dimensions.
/// Vectors use `cols == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBuffer {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseBuffer {
    /// Zero-filled buffer
    pub fn zeros(rows: usize, cols: usize) -> Self {
        DenseBuffer {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap existing row-major data; the length must be `rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> LinalgResult<Self> {
        if data.len() != rows * cols {
            return Err(LinalgError::shape(format!(
                "{} values cannot fill a {}x{} buffer",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(DenseBuffer { rows, cols, data })
    }

    /// Column vector
    pub fn column(data: Vec<f64>) -> Self {
        DenseBuffer {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, x: f64) {
        self.data[i * self.cols + j] = x;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Walk a two-dimensional value row by row into a `shape.rows x shape.cols`
/// buffer. Element (i, j) lands at `i * cols + j`.
pub fn matrix_to_buffer(value: &Value, shape: Shape) -> LinalgResult<DenseBuffer> {
    let rows = elements(value)?;
    if rows.len() != shape.rows {
        return Err(LinalgError::shape(format!(
            "declared {} rows, value has {}",
            shape.rows,
            rows.len()
        )));
    }

    let mut buf = DenseBuffer::zeros(shape.rows, shape.cols);
    for (i, row) in rows.iter().enumerate() {
        let cells = elements(row).map_err(|_| {
            LinalgError::shape(format!("row {} is a {}, not a vector", i, row.type_name()))
        })?;
        if cells.len() < shape.cols {
            return Err(LinalgError::shape(format!(
                "row {} has {} elements, expected {}",
                i,
                cells.len(),
                shape.cols
            )));
        }
        for (j, cell) in cells.iter().take(shape.cols).enumerate() {
            buf.set(i, j, extract(cell)?);
        }
    }

    trace!(rows = shape.rows, cols = shape.cols, "marshaled matrix");
    Ok(buf)
}

/// Walk a one-dimensional value of length `n` into an `n x 1` buffer.
pub fn vector_to_buffer(value: &Value, n: usize) -> LinalgResult<DenseBuffer> {
    let items = elements(value)?;
    if items.len() != n {
        return Err(LinalgError::shape(format!(
            "declared length {}, vector has {}",
            n,
            items.len()
        )));
    }

    let data = items.iter().map(extract).collect::<LinalgResult<Vec<f64>>>()?;

    trace!(len = n, "marshaled vector");
    Ok(DenseBuffer::column(data))
}
