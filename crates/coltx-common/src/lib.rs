//! Shared utilities for coltx crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars DataFrame helpers and log-message formatting.

pub mod format;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use format::{columns_verb, format_columns, str_col_diff, str_row_diff, str_shape_diff};
pub use polars::{
    column_names, frame_to_matrix, matrix_to_columns, propagate_nulls, schema_entries,
};
