//! Casting columns to another data type.

use coltx_model::{ArgValue, Args, ColumnSpec, ConfigError};
use polars::prelude::{Column, DataFrame, DataType};
use tracing::info;

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Parses a data type name, returning the canonical name with the type.
///
/// ```
/// use coltx_transform::transformers::parse_dtype;
/// use polars::prelude::DataType;
///
/// assert_eq!(parse_dtype("f64").unwrap(), ("float64", DataType::Float64));
/// assert!(parse_dtype("decimal").is_err());
/// ```
pub fn parse_dtype(name: &str) -> std::result::Result<(&'static str, DataType), ConfigError> {
    let parsed = match name.to_ascii_lowercase().as_str() {
        "bool" | "boolean" => ("boolean", DataType::Boolean),
        "i32" | "int32" => ("int32", DataType::Int32),
        "i64" | "int64" => ("int64", DataType::Int64),
        "u32" | "uint32" => ("uint32", DataType::UInt32),
        "u64" | "uint64" => ("uint64", DataType::UInt64),
        "f32" | "float32" => ("float32", DataType::Float32),
        "f64" | "float64" => ("float64", DataType::Float64),
        "str" | "string" | "utf8" => ("string", DataType::String),
        _ => return Err(ConfigError::UnknownDataType(name.to_string())),
    };
    Ok(parsed)
}

/// Casts each input column to a fixed data type.
///
/// Accepts the extra argument `strict` (default `true`): when false, values
/// that cannot be converted become null instead of failing the call.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    dtype_name: &'static str,
    dtype: DataType,
    inplace: bool,
}

impl Cast {
    fn kernel(dtype: &str, inplace: bool) -> std::result::Result<Self, ConfigError> {
        let (dtype_name, dtype) = parse_dtype(dtype)?;
        Ok(Self {
            dtype_name,
            dtype,
            inplace,
        })
    }

    /// Writes the cast columns to `prefix + column + suffix`.
    pub fn transformer(
        spec: ColumnSpec,
        dtype: &str,
        prefix: &str,
        suffix: &str,
    ) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(
            Shape::n_to_n(spec, prefix, suffix),
            Self::kernel(dtype, false)?,
        ))
    }

    /// Replaces the input columns by their cast values.
    pub fn inplace(spec: ColumnSpec, dtype: &str) -> std::result::Result<Transformer, ConfigError> {
        Ok(Transformer::new(
            Shape::n_to_n_inplace(spec),
            Self::kernel(dtype, true)?,
        ))
    }
}

impl Kernel for Cast {
    fn name(&self) -> &str {
        if self.inplace { "InplaceCast" } else { "Cast" }
    }

    fn params(&self) -> Args {
        Args::new().with("dtype", self.dtype_name)
    }

    fn validate_args(&self, args: &Args) -> std::result::Result<(), ConfigError> {
        for (key, value) in args.iter() {
            match (key, value) {
                ("strict", ArgValue::Bool(_)) => {}
                ("strict", other) => {
                    return Err(ConfigError::InvalidArgument {
                        kind: self.name().to_string(),
                        argument: key.to_string(),
                        reason: format!("expected a boolean, found {}", other.to_repr()),
                    });
                }
                _ => {
                    return Err(ConfigError::UnknownArgument {
                        kind: self.name().to_string(),
                        argument: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        let strict = ctx
            .args
            .get("strict")
            .and_then(ArgValue::as_bool)
            .unwrap_or(true);
        info!(
            "Casting {} columns to {} (strict={strict}) ...",
            ctx.columns.len(),
            self.dtype_name
        );
        let columns = ctx
            .columns
            .iter()
            .map(|name| {
                let column = frame.column(name)?;
                if strict {
                    column.strict_cast(&self.dtype)
                } else {
                    column.cast(&self.dtype)
                }
            })
            .collect::<polars::prelude::PolarsResult<Vec<Column>>>()?;
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dtype_names_are_canonical() {
        assert_eq!(parse_dtype("Int64").unwrap().0, "int64");
        assert_eq!(parse_dtype("utf8").unwrap().1, DataType::String);
        assert_eq!(
            parse_dtype("date").unwrap_err(),
            ConfigError::UnknownDataType("date".to_string())
        );
    }

    #[test]
    fn strict_must_be_a_bool() {
        let kernel = Cast::kernel("float64", false).unwrap();
        assert!(kernel.validate_args(&Args::new().with("strict", false)).is_ok());
        assert!(kernel.validate_args(&Args::new().with("strict", "no")).is_err());
        assert!(matches!(
            kernel.validate_args(&Args::new().with("wrap", true)),
            Err(ConfigError::UnknownArgument { .. })
        ));
    }
}
