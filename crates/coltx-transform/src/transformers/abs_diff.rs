use coltx_model::ConfigError;
use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{Result, TransformError};
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Computes `|in1 - in2|` as a `Float64` column. Null if either side is null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsDiffColumn;

impl AbsDiffColumn {
    pub fn transformer(
        in1_col: &str,
        in2_col: &str,
        out_col: &str,
    ) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(
            Shape::two_to_one(in1_col, in2_col, out_col)?,
            AbsDiffColumn,
        ))
    }
}

impl Kernel for AbsDiffColumn {
    fn name(&self) -> &str {
        "AbsDiffColumn"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        let [first, second] = ctx.columns else {
            return Err(TransformError::UnexpectedOutput {
                transformer: self.name().to_string(),
                reason: format!("expected 2 input columns, found {}", ctx.columns.len()),
            });
        };
        let left = frame.column(first)?.cast(&DataType::Float64)?;
        let right = frame.column(second)?.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = left
            .f64()?
            .into_iter()
            .zip(right.f64()?)
            .map(|(a, b)| Some((a? - b?).abs()))
            .collect();
        Ok(DataFrame::new(vec![Column::new(first.as_str().into(), values)])?)
    }
}
