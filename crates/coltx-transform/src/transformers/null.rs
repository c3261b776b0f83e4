//! Dropping rows and columns with null values.

use coltx_model::{Args, ColumnSpec, ConfigError};
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Drops the rows where every input column is null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropNullRow;

impl DropNullRow {
    pub fn transformer(spec: ColumnSpec) -> Transformer {
        Transformer::new(Shape::n_to_none(spec), DropNullRow)
    }
}

impl Kernel for DropNullRow {
    fn name(&self) -> &str {
        "DropNullRow"
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        if ctx.columns.is_empty() {
            return Ok(frame.clone());
        }
        info!(
            "Dropping rows that have only null values in {} columns ...",
            ctx.columns.len()
        );
        let mut all_null = vec![true; frame.height()];
        for name in ctx.columns {
            let mask = frame.column(name)?.is_null();
            for (flag, is_null) in all_null.iter_mut().zip(&mask) {
                *flag &= is_null.unwrap_or(false);
            }
        }
        let keep: Vec<bool> = all_null.into_iter().map(|flag| !flag).collect();
        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        Ok(frame.filter(&mask)?)
    }
}

/// Drops the input columns whose share of null values is at least
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropNullColumn {
    threshold: f64,
}

impl DropNullColumn {
    /// `threshold` must lie in `[0, 1]`; `1.0` drops only all-null columns.
    pub fn transformer(
        spec: ColumnSpec,
        threshold: f64,
    ) -> std::result::Result<Transformer, ConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidArgument {
                kind: "DropNullColumn".to_string(),
                argument: "threshold".to_string(),
                reason: format!("expected a value in [0, 1], found {threshold:?}"),
            });
        }
        Ok(Transformer::new(
            Shape::n_to_none(spec),
            DropNullColumn { threshold },
        ))
    }
}

impl Kernel for DropNullColumn {
    fn name(&self) -> &str {
        "DropNullColumn"
    }

    fn params(&self) -> Args {
        Args::new().with("threshold", self.threshold)
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        let height = frame.height();
        if height == 0 {
            return Ok(frame.clone());
        }
        let mut dropped = Vec::new();
        for name in ctx.columns {
            let share = frame.column(name)?.null_count() as f64 / height as f64;
            if share >= self.threshold {
                dropped.push(name.as_str());
            }
        }
        info!("Dropping {} columns with null values: {dropped:?}", dropped.len());
        Ok(frame.drop_many(dropped))
    }
}
