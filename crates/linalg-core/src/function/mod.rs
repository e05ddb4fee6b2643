//! Host-callable functions
//!
//! [`FunctionSpec`] describes one entry point, [`FunctionTable`] binds and
//! dispatches them, [`builtins`] holds the two linear-algebra entries.

pub mod builtins;
pub mod spec;
pub mod table;

pub use builtins::{builtin_table, BLAS_DGEMM, BUILTINS, FEATURE, LU_SOLVE};
pub use spec::{FunctionSpec, Handler};
pub use table::FunctionTable;
