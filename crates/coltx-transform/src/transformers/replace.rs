//! Value replacement through a mapping.

use std::collections::HashMap;

use coltx_model::{Args, ConfigError};
use polars::prelude::{Column, DataFrame, DataType};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Replaces the values of a column through an `old -> new` mapping.
///
/// Values are compared as strings and the output is a string column.
/// Values absent from the mapping become `default` when it is set and are
/// kept otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    mapping: Vec<(String, String)>,
    default: Option<String>,
}

impl Replace {
    pub fn transformer(
        in_col: &str,
        out_col: &str,
        mapping: Vec<(String, String)>,
        default: Option<String>,
    ) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(
            Shape::one_to_one(in_col, out_col)?,
            Self { mapping, default },
        ))
    }
}

impl Kernel for Replace {
    fn name(&self) -> &str {
        "Replace"
    }

    fn params(&self) -> Args {
        let mapping: Args = self
            .mapping
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
            .collect();
        Args::new()
            .with("mapping", mapping)
            .with("default", self.default.clone())
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        let lookup: HashMap<&str, &str> = self
            .mapping
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
            .collect();
        let mut columns = Vec::with_capacity(ctx.columns.len());
        for name in ctx.columns {
            info!("Replacing values from column '{name}' ...");
            let casted = frame.column(name)?.cast(&DataType::String)?;
            let values: Vec<Option<&str>> = casted
                .str()?
                .into_iter()
                .map(|value| {
                    value.map(|v| match lookup.get(v) {
                        Some(new) => *new,
                        None => self.default.as_deref().unwrap_or(v),
                    })
                })
                .collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }
}
