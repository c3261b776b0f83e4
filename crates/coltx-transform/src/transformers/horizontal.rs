//! Row-wise reductions over several columns.

use coltx_model::{ColumnSpec, ConfigError};
use polars::prelude::{Column, DataFrame, DataType, PolarsResult};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Reduces the non-null values of each row; rows without any value are null.
fn reduce_rows(
    frame: &DataFrame,
    columns: &[String],
    reduce: impl Fn(&[f64]) -> f64,
) -> PolarsResult<Vec<Option<f64>>> {
    let values = columns
        .iter()
        .map(|name| {
            let casted = frame.column(name)?.cast(&DataType::Float64)?;
            Ok(casted.f64()?.into_iter().collect::<Vec<Option<f64>>>())
        })
        .collect::<PolarsResult<Vec<_>>>()?;
    let mut row = Vec::with_capacity(columns.len());
    let out = (0..frame.height())
        .map(|i| {
            row.clear();
            row.extend(values.iter().filter_map(|column| column[i]));
            if row.is_empty() {
                None
            } else {
                Some(reduce(&row))
            }
        })
        .collect();
    Ok(out)
}

/// Sums the input columns row by row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumHorizontal;

impl SumHorizontal {
    pub fn transformer(
        spec: ColumnSpec,
        out_col: &str,
    ) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(Shape::n_to_one(spec, out_col)?, SumHorizontal))
    }
}

impl Kernel for SumHorizontal {
    fn name(&self) -> &str {
        "SumHorizontal"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!("Computing the sum of {} columns ...", ctx.columns.len());
        let values = reduce_rows(frame, ctx.columns, |row| row.iter().sum())?;
        Ok(DataFrame::new(vec![Column::new("sum".into(), values)])?)
    }
}

/// Averages the input columns row by row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanHorizontal;

impl MeanHorizontal {
    pub fn transformer(
        spec: ColumnSpec,
        out_col: &str,
    ) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(Shape::n_to_one(spec, out_col)?, MeanHorizontal))
    }
}

impl Kernel for MeanHorizontal {
    fn name(&self) -> &str {
        "MeanHorizontal"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!("Computing the mean of {} columns ...", ctx.columns.len());
        let values = reduce_rows(frame, ctx.columns, |row| {
            row.iter().sum::<f64>() / row.len() as f64
        })?;
        Ok(DataFrame::new(vec![Column::new("mean".into(), values)])?)
    }
}
