//! Element-wise comparisons against a constant.

use coltx_model::{Args, ColumnSpec};
use polars::prelude::{ChunkCompareIneq, Column, DataFrame, DataType, IntoSeries, PolarsResult};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Flags the values that are greater than or equal to `target`.
///
/// Inputs are compared as `Float64`, so a column that cannot be cast fails
/// the call. Every output is a boolean column and nulls stay null.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreaterEqual {
    target: f64,
}

impl GreaterEqual {
    pub fn transformer(spec: ColumnSpec, target: f64, prefix: &str, suffix: &str) -> Transformer {
        Transformer::new(Shape::n_to_n(spec, prefix, suffix), Self { target })
    }
}

impl Kernel for GreaterEqual {
    fn name(&self) -> &str {
        "GreaterEqual"
    }

    fn params(&self) -> Args {
        Args::new().with("target", self.target)
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!(
            "Comparing {} columns with target={} ...",
            ctx.columns.len(),
            self.target
        );
        let columns = ctx
            .columns
            .iter()
            .map(|name| {
                let column = frame.column(name)?;
                let mask = column
                    .as_materialized_series()
                    .strict_cast(&DataType::Float64)?
                    .gt_eq(self.target)?
                    .with_name(column.name().clone());
                Ok(Column::from(mask.into_series()))
            })
            .collect::<PolarsResult<Vec<Column>>>()?;
        Ok(DataFrame::new(columns)?)
    }
}
