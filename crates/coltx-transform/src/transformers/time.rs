//! Parsing string columns into times of day.

use coltx_model::{Args, ColumnSpec};
use polars::prelude::{Column, DataFrame, DataType, IntoSeries, PolarsResult, StringMethods};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Converts string columns to `Time` columns.
///
/// `format` is a strftime pattern such as `"%H:%M:%S"`; without it Polars
/// infers the pattern from the data. Values that do not match become null.
/// Non-string columns are returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringToTime {
    format: Option<String>,
    inplace: bool,
}

impl StringToTime {
    pub fn transformer(
        spec: ColumnSpec,
        format: Option<String>,
        prefix: &str,
        suffix: &str,
    ) -> Transformer {
        Transformer::new(
            Shape::n_to_n(spec, prefix, suffix),
            Self {
                format,
                inplace: false,
            },
        )
    }

    pub fn inplace(spec: ColumnSpec, format: Option<String>) -> Transformer {
        Transformer::new(
            Shape::n_to_n_inplace(spec),
            Self {
                format,
                inplace: true,
            },
        )
    }
}

impl Kernel for StringToTime {
    fn name(&self) -> &str {
        if self.inplace {
            "InplaceStringToTime"
        } else {
            "StringToTime"
        }
    }

    fn params(&self) -> Args {
        Args::new().with("format", self.format.clone())
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!(
            "Converting {} string columns to time columns ...",
            ctx.columns.len()
        );
        let columns = ctx
            .columns
            .iter()
            .map(|name| {
                let column = frame.column(name)?;
                if column.dtype() != &DataType::String {
                    return Ok(column.clone());
                }
                let parsed = column.str()?.as_time(self.format.as_deref(), false)?;
                Ok(Column::from(
                    parsed.into_series().with_name(column.name().clone()),
                ))
            })
            .collect::<PolarsResult<Vec<Column>>>()?;
        Ok(DataFrame::new(columns)?)
    }
}
