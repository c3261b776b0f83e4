//! String column transformers.

use coltx_model::{Args, ColumnSpec};
use polars::prelude::{Column, DataFrame, DataType, PolarsResult};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Strips leading and trailing characters from string columns.
///
/// Without `characters`, whitespace is stripped. Non-string columns are
/// returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripChars {
    characters: Option<String>,
    inplace: bool,
}

impl StripChars {
    pub fn transformer(
        spec: ColumnSpec,
        characters: Option<String>,
        prefix: &str,
        suffix: &str,
    ) -> Transformer {
        Transformer::new(
            Shape::n_to_n(spec, prefix, suffix),
            Self {
                characters,
                inplace: false,
            },
        )
    }

    pub fn inplace(spec: ColumnSpec, characters: Option<String>) -> Transformer {
        Transformer::new(
            Shape::n_to_n_inplace(spec),
            Self {
                characters,
                inplace: true,
            },
        )
    }

    fn strip<'a>(&self, value: &'a str) -> &'a str {
        match self.characters.as_deref() {
            Some(chars) => value.trim_matches(|c: char| chars.contains(c)),
            None => value.trim(),
        }
    }
}

impl Kernel for StripChars {
    fn name(&self) -> &str {
        if self.inplace {
            "InplaceStripChars"
        } else {
            "StripChars"
        }
    }

    fn params(&self) -> Args {
        Args::new().with("characters", self.characters.clone())
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!("Stripping characters of {} columns ...", ctx.columns.len());
        let columns = ctx
            .columns
            .iter()
            .map(|name| {
                let column = frame.column(name)?;
                if column.dtype() != &DataType::String {
                    return Ok(column.clone());
                }
                let values: Vec<Option<&str>> = column
                    .str()?
                    .into_iter()
                    .map(|value| value.map(|v| self.strip(v)))
                    .collect();
                Ok(Column::new(column.name().clone(), values))
            })
            .collect::<PolarsResult<Vec<Column>>>()?;
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_or_given_characters() {
        let default = StripChars {
            characters: None,
            inplace: false,
        };
        assert_eq!(default.strip("  a b "), "a b");
        let custom = StripChars {
            characters: Some("-_".to_string()),
            inplace: true,
        };
        assert_eq!(custom.strip("-_a-b_"), "a-b");
        assert_eq!(custom.name(), "InplaceStripChars");
    }
}
