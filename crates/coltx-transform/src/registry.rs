//! Transformer kinds buildable from configuration.

use coltx_model::{ArgValue, Args, ColumnSelection, ColumnSpec, ConfigError, Policy};

use crate::config::TransformerConfig;
use crate::estimators::{MaxAbsScaler, MinMaxScaler, RobustScaler, StandardScaler};
use crate::sequential::Sequential;
use crate::transformer::{BaseTransformer, Transformer};
use crate::transformers::{
    AbsDiffColumn, Cast, ColumnSelector, CopyColumn, CopyColumns, DropNullColumn, DropNullRow,
    GreaterEqual, MeanHorizontal, Replace, Scaler, StringToTime, StripChars, SumHorizontal,
};

type Result<T> = std::result::Result<T, ConfigError>;

/// Describes a configurable transformer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub name: &'static str,
    pub shape: &'static str,
    pub summary: &'static str,
}

const KINDS: &[KindInfo] = &[
    KindInfo {
        name: "AbsDiffColumn",
        shape: "TwoToOne",
        summary: "absolute difference of two columns",
    },
    KindInfo {
        name: "Cast",
        shape: "NToN",
        summary: "cast columns to a data type",
    },
    KindInfo {
        name: "ColumnSelection",
        shape: "NToNone",
        summary: "keep only the selected columns",
    },
    KindInfo {
        name: "CopyColumn",
        shape: "OneToOne",
        summary: "copy a column",
    },
    KindInfo {
        name: "CopyColumns",
        shape: "NToN",
        summary: "copy columns",
    },
    KindInfo {
        name: "DropNullColumn",
        shape: "NToNone",
        summary: "drop columns with too many null values",
    },
    KindInfo {
        name: "DropNullRow",
        shape: "NToNone",
        summary: "drop rows with only null values",
    },
    KindInfo {
        name: "GreaterEqual",
        shape: "NToN",
        summary: "flag values greater than or equal to a target",
    },
    KindInfo {
        name: "InplaceCast",
        shape: "NToN",
        summary: "cast columns in place",
    },
    KindInfo {
        name: "InplaceMaxAbsScaler",
        shape: "NToN",
        summary: "scale columns by their maximum absolute value in place",
    },
    KindInfo {
        name: "InplaceMinMaxScaler",
        shape: "NToN",
        summary: "scale columns to a range in place",
    },
    KindInfo {
        name: "InplaceRobustScaler",
        shape: "NToN",
        summary: "scale columns with median and quantile range in place",
    },
    KindInfo {
        name: "InplaceStandardScaler",
        shape: "NToN",
        summary: "standardize columns in place",
    },
    KindInfo {
        name: "InplaceStringToTime",
        shape: "NToN",
        summary: "parse string columns into times in place",
    },
    KindInfo {
        name: "InplaceStripChars",
        shape: "NToN",
        summary: "strip characters from string columns in place",
    },
    KindInfo {
        name: "MaxAbsScaler",
        shape: "NToN",
        summary: "scale columns by their maximum absolute value",
    },
    KindInfo {
        name: "MeanHorizontal",
        shape: "NToOne",
        summary: "row-wise mean of columns",
    },
    KindInfo {
        name: "MinMaxScaler",
        shape: "NToN",
        summary: "scale columns to a range",
    },
    KindInfo {
        name: "Replace",
        shape: "OneToOne",
        summary: "replace values through a mapping",
    },
    KindInfo {
        name: "RobustScaler",
        shape: "NToN",
        summary: "scale columns with median and quantile range",
    },
    KindInfo {
        name: "Sequential",
        shape: "-",
        summary: "apply transformers in order",
    },
    KindInfo {
        name: "StandardScaler",
        shape: "NToN",
        summary: "standardize columns",
    },
    KindInfo {
        name: "StringToTime",
        shape: "NToN",
        summary: "parse string columns into times",
    },
    KindInfo {
        name: "StripChars",
        shape: "NToN",
        summary: "strip characters from string columns",
    },
    KindInfo {
        name: "SumHorizontal",
        shape: "NToOne",
        summary: "row-wise sum of columns",
    },
];

/// Returns every kind buildable from configuration, sorted by name.
pub fn kinds() -> &'static [KindInfo] {
    KINDS
}

/// Consumes the arguments of one entry, reporting errors against its kind.
struct ArgReader {
    kind: String,
    args: Args,
}

impl ArgReader {
    fn new(config: &TransformerConfig) -> Self {
        Self {
            kind: config.kind.clone(),
            args: config.args.clone(),
        }
    }

    fn invalid(&self, argument: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidArgument {
            kind: self.kind.clone(),
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    /// Removes a value; null counts as absent.
    fn take(&mut self, key: &str) -> Option<ArgValue> {
        self.args.remove(key).filter(|value| !value.is_null())
    }

    fn optional_str(&mut self, key: &str) -> Result<Option<String>> {
        match self.take(key) {
            None => Ok(None),
            Some(ArgValue::Str(value)) => Ok(Some(value)),
            Some(other) => Err(self.invalid(
                key,
                format!("expected a string, found {}", other.to_repr()),
            )),
        }
    }

    fn required_str(&mut self, key: &str) -> Result<String> {
        self.optional_str(key)?
            .ok_or_else(|| self.invalid(key, "missing required argument"))
    }

    fn str_or(&mut self, key: &str, default: &str) -> Result<String> {
        Ok(self
            .optional_str(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    fn bool_or(&mut self, key: &str, default: bool) -> Result<bool> {
        match self.take(key) {
            None => Ok(default),
            Some(ArgValue::Bool(value)) => Ok(value),
            Some(other) => Err(self.invalid(
                key,
                format!("expected a boolean, found {}", other.to_repr()),
            )),
        }
    }

    fn optional_f64(&mut self, key: &str) -> Result<Option<f64>> {
        match self.take(key) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                self.invalid(key, format!("expected a number, found {}", value.to_repr()))
            }),
        }
    }

    fn required_f64(&mut self, key: &str) -> Result<f64> {
        self.optional_f64(key)?
            .ok_or_else(|| self.invalid(key, "missing required argument"))
    }

    fn f64_or(&mut self, key: &str, default: f64) -> Result<f64> {
        Ok(self.optional_f64(key)?.unwrap_or(default))
    }

    fn pair_or(&mut self, key: &str, default: (f64, f64)) -> Result<(f64, f64)> {
        let Some(value) = self.take(key) else {
            return Ok(default);
        };
        match value.as_list() {
            Some([low, high]) => match (low.as_f64(), high.as_f64()) {
                (Some(low), Some(high)) => Ok((low, high)),
                _ => Err(self.invalid(key, "expected two numbers")),
            },
            _ => Err(self.invalid(
                key,
                format!("expected a pair of numbers, found {}", value.to_repr()),
            )),
        }
    }

    fn string_list(&mut self, key: &str) -> Result<Option<Vec<String>>> {
        let Some(value) = self.take(key) else {
            return Ok(None);
        };
        let items = value
            .as_list()
            .map(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .unwrap_or_default();
        items.map(Some).ok_or_else(|| {
            self.invalid(
                key,
                format!("expected a list of strings, found {}", value.to_repr()),
            )
        })
    }

    fn string_map(&mut self, key: &str) -> Result<Vec<(String, String)>> {
        let Some(value) = self.take(key) else {
            return Ok(Vec::new());
        };
        let Some(map) = value.as_map() else {
            return Err(self.invalid(
                key,
                format!("expected a mapping, found {}", value.to_repr()),
            ));
        };
        map.iter()
            .map(|(old, new)| match new {
                ArgValue::Null | ArgValue::List(_) | ArgValue::Map(_) => Err(self.invalid(
                    key,
                    format!("unsupported replacement for '{old}': {}", new.to_repr()),
                )),
                scalar => Ok((old.to_string(), scalar.to_string())),
            })
            .collect()
    }

    fn spec(&mut self) -> Result<ColumnSpec> {
        let columns = match self.string_list("columns")? {
            Some(columns) => ColumnSelection::Explicit(columns),
            None => ColumnSelection::All,
        };
        let exclude_columns = self.string_list("exclude_columns")?.unwrap_or_default();
        Ok(ColumnSpec {
            columns,
            exclude_columns,
        })
    }

    fn apply_policies(&mut self, mut transformer: Transformer) -> Result<Transformer> {
        if let Some(value) = self.optional_str("missing_policy")? {
            transformer = transformer.with_missing_policy(Policy::parse_missing(&value)?);
        }
        if transformer.shape().exist_policy().is_some()
            && let Some(value) = self.optional_str("exist_policy")?
        {
            transformer = transformer.with_exist_policy(Policy::parse_exist(&value)?);
        }
        Ok(transformer)
    }

    /// Fails on the first argument nobody consumed.
    fn finish(self) -> Result<()> {
        match self.args.keys().next() {
            Some(argument) => Err(ConfigError::UnknownArgument {
                kind: self.kind,
                argument: argument.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn n_to_n_naming(reader: &mut ArgReader) -> Result<(String, String)> {
    Ok((reader.str_or("prefix", "")?, reader.str_or("suffix", "")?))
}

fn scaler(
    reader: &mut ArgReader,
    estimator: impl crate::estimators::Estimator + 'static,
    inplace: bool,
) -> Result<Transformer> {
    let spec = reader.spec()?;
    let propagate_nulls = reader.bool_or("propagate_nulls", true)?;
    if inplace {
        return Ok(Scaler::inplace(spec, estimator, propagate_nulls));
    }
    let (prefix, suffix) = n_to_n_naming(reader)?;
    Ok(Scaler::transformer(
        spec,
        estimator,
        &prefix,
        &suffix,
        propagate_nulls,
    ))
}

fn build_sequential(mut reader: ArgReader) -> Result<Box<dyn BaseTransformer>> {
    let children = match reader.take("transformers") {
        None => Vec::new(),
        Some(ArgValue::List(items)) => items,
        Some(other) => {
            return Err(reader.invalid(
                "transformers",
                format!("expected a list, found {}", other.to_repr()),
            ));
        }
    };
    reader.finish()?;
    let mut sequential = Sequential::default();
    for child in children {
        let ArgValue::Map(mut args) = child else {
            return Err(ConfigError::InvalidArgument {
                kind: "Sequential".to_string(),
                argument: "transformers".to_string(),
                reason: format!("expected a transformer entry, found {}", child.to_repr()),
            });
        };
        let kind = match args.remove("type") {
            Some(ArgValue::Str(kind)) => kind,
            _ => {
                return Err(ConfigError::InvalidArgument {
                    kind: "Sequential".to_string(),
                    argument: "transformers".to_string(),
                    reason: "every entry needs a string 'type'".to_string(),
                });
            }
        };
        sequential.push(build(&TransformerConfig::new(kind, args))?);
    }
    Ok(Box::new(sequential))
}

/// Builds a transformer from its configuration entry.
pub fn build(config: &TransformerConfig) -> Result<Box<dyn BaseTransformer>> {
    let mut reader = ArgReader::new(config);
    let transformer = match config.kind.as_str() {
        "Sequential" => return build_sequential(reader),
        "AbsDiffColumn" => {
            let in1_col = reader.required_str("in1_col")?;
            let in2_col = reader.required_str("in2_col")?;
            let out_col = reader.required_str("out_col")?;
            AbsDiffColumn::transformer(&in1_col, &in2_col, &out_col)?
        }
        "Cast" | "InplaceCast" => {
            let spec = reader.spec()?;
            let dtype = reader.required_str("dtype")?;
            if config.kind == "Cast" {
                let (prefix, suffix) = n_to_n_naming(&mut reader)?;
                Cast::transformer(spec, &dtype, &prefix, &suffix)?
            } else {
                Cast::inplace(spec, &dtype)?
            }
        }
        "ColumnSelection" => ColumnSelector::transformer(reader.spec()?),
        "CopyColumn" => {
            let in_col = reader.required_str("in_col")?;
            let out_col = reader.required_str("out_col")?;
            CopyColumn::transformer(&in_col, &out_col)?
        }
        "CopyColumns" => {
            let spec = reader.spec()?;
            let (prefix, suffix) = n_to_n_naming(&mut reader)?;
            CopyColumns::transformer(spec, &prefix, &suffix)
        }
        "DropNullColumn" => {
            let spec = reader.spec()?;
            let threshold = reader.f64_or("threshold", 1.0)?;
            DropNullColumn::transformer(spec, threshold)?
        }
        "DropNullRow" => DropNullRow::transformer(reader.spec()?),
        "GreaterEqual" => {
            let spec = reader.spec()?;
            let target = reader.required_f64("target")?;
            let (prefix, suffix) = n_to_n_naming(&mut reader)?;
            GreaterEqual::transformer(spec, target, &prefix, &suffix)
        }
        "MeanHorizontal" | "SumHorizontal" => {
            let spec = reader.spec()?;
            let out_col = reader.required_str("out_col")?;
            if config.kind == "SumHorizontal" {
                SumHorizontal::transformer(spec, &out_col)?
            } else {
                MeanHorizontal::transformer(spec, &out_col)?
            }
        }
        "Replace" => {
            let in_col = reader.required_str("in_col")?;
            let out_col = reader.required_str("out_col")?;
            let mapping = reader.string_map("mapping")?;
            let default = reader.optional_str("default")?;
            Replace::transformer(&in_col, &out_col, mapping, default)?
        }
        "StripChars" | "InplaceStripChars" => {
            let spec = reader.spec()?;
            let characters = reader.optional_str("characters")?;
            if config.kind == "StripChars" {
                let (prefix, suffix) = n_to_n_naming(&mut reader)?;
                StripChars::transformer(spec, characters, &prefix, &suffix)
            } else {
                StripChars::inplace(spec, characters)
            }
        }
        "StringToTime" | "InplaceStringToTime" => {
            let spec = reader.spec()?;
            let format = reader.optional_str("format")?;
            if config.kind == "StringToTime" {
                let (prefix, suffix) = n_to_n_naming(&mut reader)?;
                StringToTime::transformer(spec, format, &prefix, &suffix)
            } else {
                StringToTime::inplace(spec, format)
            }
        }
        "StandardScaler" | "InplaceStandardScaler" => {
            let with_mean = reader.bool_or("with_mean", true)?;
            let with_std = reader.bool_or("with_std", true)?;
            let inplace = config.kind.starts_with("Inplace");
            scaler(&mut reader, StandardScaler::new(with_mean, with_std), inplace)?
        }
        "MinMaxScaler" | "InplaceMinMaxScaler" => {
            let range = reader.pair_or("feature_range", (0.0, 1.0))?;
            let inplace = config.kind.starts_with("Inplace");
            scaler(&mut reader, MinMaxScaler::new(range)?, inplace)?
        }
        "MaxAbsScaler" | "InplaceMaxAbsScaler" => {
            let inplace = config.kind.starts_with("Inplace");
            scaler(&mut reader, MaxAbsScaler::new(), inplace)?
        }
        "RobustScaler" | "InplaceRobustScaler" => {
            let with_centering = reader.bool_or("with_centering", true)?;
            let with_scaling = reader.bool_or("with_scaling", true)?;
            let range = reader.pair_or("quantile_range", (25.0, 75.0))?;
            let inplace = config.kind.starts_with("Inplace");
            let estimator = RobustScaler::new(with_centering, with_scaling, range)?;
            scaler(&mut reader, estimator, inplace)?
        }
        other => return Err(ConfigError::UnknownTransformer(other.to_string())),
    };
    let transformer = reader.apply_policies(transformer)?;
    if matches!(config.kind.as_str(), "Cast" | "InplaceCast") {
        let extra = std::mem::take(&mut reader.args);
        if extra.is_empty() {
            return Ok(Box::new(transformer));
        }
        return Ok(Box::new(transformer.with_extra_args(extra)?));
    }
    reader.finish()?;
    Ok(Box::new(transformer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> TransformerConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn kinds_are_sorted() {
        let names: Vec<_> = kinds().iter().map(|kind| kind.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_listed_kind_is_buildable() {
        for kind in kinds() {
            let json = match kind.name {
                "AbsDiffColumn" => {
                    r#"{"type": "AbsDiffColumn", "in1_col": "a", "in2_col": "b", "out_col": "c"}"#
                        .to_string()
                }
                "CopyColumn" | "Replace" => {
                    format!(r#"{{"type": "{}", "in_col": "a", "out_col": "b"}}"#, kind.name)
                }
                "Cast" | "InplaceCast" => {
                    format!(r#"{{"type": "{}", "dtype": "float64"}}"#, kind.name)
                }
                "MeanHorizontal" | "SumHorizontal" => {
                    format!(r#"{{"type": "{}", "out_col": "out"}}"#, kind.name)
                }
                "GreaterEqual" => r#"{"type": "GreaterEqual", "target": 0}"#.to_string(),
                name => format!(r#"{{"type": "{name}"}}"#),
            };
            let built = config(&json).build().unwrap();
            assert_eq!(built.kind(), kind.name);
        }
    }

    #[test]
    fn unknown_kind() {
        let err = config(r#"{"type": "Explode"}"#).build().unwrap_err();
        assert_eq!(err, ConfigError::UnknownTransformer("Explode".to_string()));
    }

    #[test]
    fn unknown_argument() {
        let err = config(r#"{"type": "DropNullRow", "colums": ["a"]}"#)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownArgument {
                kind: "DropNullRow".to_string(),
                argument: "colums".to_string()
            }
        );
    }

    #[test]
    fn inplace_rejects_exist_policy() {
        let err = config(r#"{"type": "InplaceCast", "dtype": "int64", "exist_policy": "warn"}"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownArgument { .. }));
    }

    #[test]
    fn invalid_policy_fails_at_build() {
        let err = config(r#"{"type": "CopyColumns", "missing_policy": "maybe"}"#)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "incorrect missing_policy: 'maybe'. The valid values are: 'ignore', 'raise', 'warn'"
        );
    }

    #[test]
    fn cast_forwards_strict() {
        let built = config(r#"{"type": "Cast", "columns": ["a"], "dtype": "int64", "suffix": "_i", "strict": false}"#)
            .build()
            .unwrap();
        assert_eq!(built.get_args().get("strict"), Some(&ArgValue::Bool(false)));
    }

    #[test]
    fn get_args_round_trip_through_config() {
        let built = config(
            r#"{"type": "MinMaxScaler", "columns": ["a"], "feature_range": [-1.0, 1.0], "suffix": "_s"}"#,
        )
        .build()
        .unwrap();
        let rebuilt = TransformerConfig::new(built.kind(), built.get_args())
            .build()
            .unwrap();
        assert!(built.equal(rebuilt.as_ref(), false));
    }

    #[test]
    fn greater_equal_needs_a_numeric_target() {
        let err = config(r#"{"type": "GreaterEqual"}"#).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidArgument { ref argument, .. } if argument == "target"
        ));
        let err = config(r#"{"type": "GreaterEqual", "target": "high"}"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument { .. }));

        let built = config(r#"{"type": "GreaterEqual", "target": 3, "suffix": "_ge"}"#)
            .build()
            .unwrap();
        let direct = GreaterEqual::transformer(ColumnSpec::all(), 3.0, "", "_ge");
        assert!(built.equal(&direct, false));
    }

    #[test]
    fn string_to_time_reads_format() {
        let built = config(r#"{"type": "InplaceStringToTime", "format": "%H:%M"}"#)
            .build()
            .unwrap();
        let direct = StringToTime::inplace(ColumnSpec::all(), Some("%H:%M".to_string()));
        assert!(built.equal(&direct, false));
        assert!(config(r#"{"type": "InplaceStringToTime", "suffix": "_t"}"#)
            .build()
            .is_err());
    }

    #[test]
    fn nested_sequential() {
        let built = config(
            r#"{"type": "Sequential", "transformers": [
                {"type": "CopyColumn", "in_col": "a", "out_col": "b"},
                {"type": "Sequential", "transformers": []}
            ]}"#,
        )
        .build()
        .unwrap();
        assert_eq!(built.kind(), "Sequential");
        let args = built.get_args();
        assert_eq!(args.get("transformers").and_then(ArgValue::as_list).map(<[_]>::len), Some(2));
    }
}
