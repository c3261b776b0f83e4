//! Copying columns.

use coltx_model::{ColumnSpec, ConfigError};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

fn select(frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
    Ok(frame.select(ctx.columns.iter().map(String::as_str))?)
}

/// Copies several columns to `prefix + column + suffix`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyColumns;

impl CopyColumns {
    pub fn transformer(spec: ColumnSpec, prefix: &str, suffix: &str) -> Transformer {
        Transformer::new(Shape::n_to_n(spec, prefix, suffix), CopyColumns)
    }
}

impl Kernel for CopyColumns {
    fn name(&self) -> &str {
        "CopyColumns"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        select(frame, ctx)
    }
}

/// Copies one column to a new name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyColumn;

impl CopyColumn {
    pub fn transformer(
        in_col: &str,
        out_col: &str,
    ) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(Shape::one_to_one(in_col, out_col)?, CopyColumn))
    }
}

impl Kernel for CopyColumn {
    fn name(&self) -> &str {
        "CopyColumn"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        select(frame, ctx)
    }
}
