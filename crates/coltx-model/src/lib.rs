//! Configuration model shared by the coltx crates.
//!
//! - **policy**: how missing input columns and existing output columns are handled
//! - **columns**: target column selection with exclusions
//! - **args**: ordered argument mappings used for equality and rendering
//! - **error**: construction-time configuration errors

pub mod args;
pub mod columns;
pub mod error;
pub mod policy;

pub use args::{ArgValue, Args};
pub use columns::{ColumnSelection, ColumnSpec};
pub use error::{ConfigError, Result};
pub use policy::Policy;
