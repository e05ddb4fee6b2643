//! Linalg Binding - Core Library
//!
//! Public API surface for marshaling host vector values into dense buffers,
//! running matrix multiply / LU solve on a numeric backend, and binding the
//! two operations as host-callable functions.

pub mod error;
pub mod config;
pub mod value;
pub mod marshal;
pub mod backend;
pub mod engine;
pub mod function;

// Re-export commonly used types
pub use error::{LinalgError, LinalgResult};
pub use config::{ConfigError, LinalgConfig};
pub use value::Value;
pub use marshal::{DenseBuffer, Layout, Shape};
pub use backend::{BackendKind, NumericBackend};
pub use engine::Engine;
pub use function::{FunctionSpec, FunctionTable};
