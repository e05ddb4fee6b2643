//! Operation Engine
//!
//! Composes the marshaling pipeline (decode, buffer, backend call, encode)
//! for the two operations. Each call is single-shot and stateless: buffers
//! are created on entry and dropped before the encoded value is returned.

use tracing::debug;

use crate::backend::NumericBackend;
use crate::config::LinalgConfig;
use crate::error::{LinalgError, LinalgResult};
use crate::marshal::{
    encode, matrix_to_buffer, validated_shape, vector_to_buffer, Layout, Shape,
};
use crate::value::Value;

/// Marshaling front-end over a numeric backend
#[derive(Debug)]
pub struct Engine {
    config: LinalgConfig,
    backend: Box<dyn NumericBackend>,
}

impl Engine {
    /// Create an engine using the backend selected in `config`
    pub fn new(config: LinalgConfig) -> Self {
        let backend = config.backend.build(config.singular_tolerance);
        debug!(backend = backend.name(), "engine created");
        Engine { config, backend }
    }

    /// Create an engine around an explicit backend
    pub fn with_backend(config: LinalgConfig, backend: Box<dyn NumericBackend>) -> Self {
        Engine { config, backend }
    }

    pub fn config(&self) -> &LinalgConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Matrix product `M0 * M1`, returned as a nested vector.
    pub fn multiply(&self, m0: &Value, m1: &Value) -> LinalgResult<Value> {
        let s0 = self.matrix_shape(m0, "first")?;
        let s1 = self.matrix_shape(m1, "second")?;
        debug!(lhs = %s0, rhs = %s1, backend = self.backend.name(), "multiply");

        if s0.cols != s1.rows {
            return Err(LinalgError::DimensionMismatch {
                op: "multiply",
                lhs: s0.as_pair(),
                rhs: s1.as_pair(),
            });
        }

        let a = matrix_to_buffer(m0, s0)?;
        let b = matrix_to_buffer(m1, s1)?;
        let c = self.backend.gemm(&a, &b)?;

        Ok(encode(&c, Layout::Matrix))
    }

    /// Solve `A * x = b`, returning `x` as a flat vector.
    pub fn solve(&self, a: &Value, b: &Value) -> LinalgResult<Value> {
        let sb = validated_shape(b)?;
        if sb.is_matrix() || sb.is_empty() {
            return Err(LinalgError::shape(format!(
                "right-hand side must be a non-empty one-dimensional vector, got {}",
                sb
            )));
        }
        let n = sb.rows;
        self.check_limit(n)?;

        let sa = validated_shape(a)?;
        debug!(a = %sa, n, backend = self.backend.name(), "solve");
        if !sa.is_square() || sa.rows != n {
            return Err(LinalgError::DimensionMismatch {
                op: "solve",
                lhs: sa.as_pair(),
                rhs: (n, 1),
            });
        }

        let a_buf = matrix_to_buffer(a, sa)?;
        let b_buf = vector_to_buffer(b, n)?;
        let x = self.backend.lu_solve(a_buf, &b_buf)?;

        Ok(encode(&x, Layout::Vector))
    }

    /// Validated, non-empty two-dimensional shape within the configured limit.
    fn matrix_shape(&self, value: &Value, which: &str) -> LinalgResult<Shape> {
        let shape = validated_shape(value)?;
        if !shape.is_matrix() {
            return Err(LinalgError::shape(format!(
                "{} argument must be a non-empty two-dimensional vector, got {}",
                which, shape
            )));
        }
        self.check_limit(shape.rows)?;
        self.check_limit(shape.cols)?;
        Ok(shape)
    }

    fn check_limit(&self, dim: usize) -> LinalgResult<()> {
        if dim > self.config.max_dimension {
            return Err(LinalgError::LimitExceeded {
                dim,
                max: self.config.max_dimension,
            });
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(LinalgConfig::default())
    }
}
