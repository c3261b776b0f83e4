use coltx_model::ColumnSpec;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Keeps only the resolved columns, in resolution order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSelector;

impl ColumnSelector {
    pub fn transformer(spec: ColumnSpec) -> Transformer {
        Transformer::new(Shape::n_to_none(spec), ColumnSelector)
    }
}

impl Kernel for ColumnSelector {
    fn name(&self) -> &str {
        "ColumnSelection"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!("Selecting {} columns ...", ctx.columns.len());
        Ok(frame.select(ctx.columns.iter().map(String::as_str))?)
    }
}
