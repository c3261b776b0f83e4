//! Transformer shapes.
//!
//! A [`Shape`] fixes how many columns a transformer reads, how its outputs
//! are named, and which policies apply. It runs the column checks that happen
//! before a kernel is called and merges the kernel output back into the
//! frame afterwards.

use coltx_model::{Args, ColumnSpec, ConfigError, Policy};
use polars::prelude::DataFrame;

use crate::error::{Result, TransformError};
use crate::observer::TransformObserver;
use crate::policy::{check_existing_columns, check_missing_columns};
use crate::resolver::find_columns;

/// Where the outputs of an n-to-n transformer go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NToNOutput {
    /// Each input `c` is written to `prefix + c + suffix`.
    Derived {
        prefix: String,
        suffix: String,
        exist_policy: Policy,
    },
    /// Each input is replaced by its transformed values.
    InPlace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    OneToOne {
        in_col: String,
        out_col: String,
        exist_policy: Policy,
        missing_policy: Policy,
    },
    TwoToOne {
        in1_col: String,
        in2_col: String,
        out_col: String,
        exist_policy: Policy,
        missing_policy: Policy,
    },
    NToNone {
        spec: ColumnSpec,
        missing_policy: Policy,
    },
    NToOne {
        spec: ColumnSpec,
        out_col: String,
        exist_policy: Policy,
        missing_policy: Policy,
    },
    NToN {
        spec: ColumnSpec,
        output: NToNOutput,
        missing_policy: Policy,
    },
}

/// Result of the input-resolution phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A required input column is missing; the frame is left unchanged.
    Skip { column: String },
    /// Validated input columns.
    Inputs(Vec<String>),
}

fn non_empty(
    value: impl Into<String>,
    argument: &'static str,
) -> std::result::Result<String, ConfigError> {
    let value = value.into();
    if value.is_empty() {
        return Err(ConfigError::EmptyColumnName { argument });
    }
    Ok(value)
}

fn unexpected(kind: &str, reason: String) -> TransformError {
    TransformError::UnexpectedOutput {
        transformer: kind.to_string(),
        reason,
    }
}

fn dedup(columns: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        if !out.contains(&column) {
            out.push(column);
        }
    }
    out
}

impl Shape {
    pub fn one_to_one(
        in_col: impl Into<String>,
        out_col: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Shape::OneToOne {
            in_col: non_empty(in_col, "in_col")?,
            out_col: non_empty(out_col, "out_col")?,
            exist_policy: Policy::default(),
            missing_policy: Policy::default(),
        })
    }

    pub fn two_to_one(
        in1_col: impl Into<String>,
        in2_col: impl Into<String>,
        out_col: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Shape::TwoToOne {
            in1_col: non_empty(in1_col, "in1_col")?,
            in2_col: non_empty(in2_col, "in2_col")?,
            out_col: non_empty(out_col, "out_col")?,
            exist_policy: Policy::default(),
            missing_policy: Policy::default(),
        })
    }

    pub fn n_to_none(spec: ColumnSpec) -> Self {
        Shape::NToNone {
            spec,
            missing_policy: Policy::default(),
        }
    }

    pub fn n_to_one(
        spec: ColumnSpec,
        out_col: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Shape::NToOne {
            spec,
            out_col: non_empty(out_col, "out_col")?,
            exist_policy: Policy::default(),
            missing_policy: Policy::default(),
        })
    }

    pub fn n_to_n(spec: ColumnSpec, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Shape::NToN {
            spec,
            output: NToNOutput::Derived {
                prefix: prefix.into(),
                suffix: suffix.into(),
                exist_policy: Policy::default(),
            },
            missing_policy: Policy::default(),
        }
    }

    pub fn n_to_n_inplace(spec: ColumnSpec) -> Self {
        Shape::NToN {
            spec,
            output: NToNOutput::InPlace,
            missing_policy: Policy::default(),
        }
    }

    #[must_use]
    pub fn with_missing_policy(mut self, policy: Policy) -> Self {
        match &mut self {
            Shape::OneToOne { missing_policy, .. }
            | Shape::TwoToOne { missing_policy, .. }
            | Shape::NToNone { missing_policy, .. }
            | Shape::NToOne { missing_policy, .. }
            | Shape::NToN { missing_policy, .. } => *missing_policy = policy,
        }
        self
    }

    /// Sets the existing-column policy. Shapes that never add columns
    /// ignore it.
    #[must_use]
    pub fn with_exist_policy(mut self, policy: Policy) -> Self {
        match &mut self {
            Shape::OneToOne { exist_policy, .. }
            | Shape::TwoToOne { exist_policy, .. }
            | Shape::NToOne { exist_policy, .. }
            | Shape::NToN {
                output: NToNOutput::Derived { exist_policy, .. },
                ..
            } => *exist_policy = policy,
            Shape::NToNone { .. }
            | Shape::NToN {
                output: NToNOutput::InPlace,
                ..
            } => {}
        }
        self
    }

    pub fn missing_policy(&self) -> Policy {
        match self {
            Shape::OneToOne { missing_policy, .. }
            | Shape::TwoToOne { missing_policy, .. }
            | Shape::NToNone { missing_policy, .. }
            | Shape::NToOne { missing_policy, .. }
            | Shape::NToN { missing_policy, .. } => *missing_policy,
        }
    }

    /// Returns the existing-column policy of shapes that add columns.
    pub fn exist_policy(&self) -> Option<Policy> {
        match self {
            Shape::OneToOne { exist_policy, .. }
            | Shape::TwoToOne { exist_policy, .. }
            | Shape::NToOne { exist_policy, .. }
            | Shape::NToN {
                output: NToNOutput::Derived { exist_policy, .. },
                ..
            } => Some(*exist_policy),
            Shape::NToNone { .. }
            | Shape::NToN {
                output: NToNOutput::InPlace,
                ..
            } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::OneToOne { .. } => "OneToOne",
            Shape::TwoToOne { .. } => "TwoToOne",
            Shape::NToNone { .. } => "NToNone",
            Shape::NToOne { .. } => "NToOne",
            Shape::NToN { .. } => "NToN",
        }
    }

    /// Shape arguments followed by the policies.
    pub fn args(&self) -> Args {
        let mut args = Args::new();
        match self {
            Shape::OneToOne { in_col, out_col, .. } => {
                args.insert("in_col", in_col);
                args.insert("out_col", out_col);
            }
            Shape::TwoToOne {
                in1_col,
                in2_col,
                out_col,
                ..
            } => {
                args.insert("in1_col", in1_col);
                args.insert("in2_col", in2_col);
                args.insert("out_col", out_col);
            }
            Shape::NToNone { spec, .. } => insert_spec(&mut args, spec),
            Shape::NToOne { spec, out_col, .. } => {
                insert_spec(&mut args, spec);
                args.insert("out_col", out_col);
            }
            Shape::NToN { spec, output, .. } => {
                insert_spec(&mut args, spec);
                if let NToNOutput::Derived { prefix, suffix, .. } = output {
                    args.insert("prefix", prefix);
                    args.insert("suffix", suffix);
                }
            }
        }
        if let Some(policy) = self.exist_policy() {
            args.insert("exist_policy", policy);
        }
        args.insert("missing_policy", self.missing_policy());
        args
    }

    /// Resolves the input columns against `names` and applies the
    /// missing-column policy.
    ///
    /// Fixed-input shapes check their inputs in order and stop at the first
    /// missing one; the caller then leaves the frame unchanged.
    pub fn resolve_inputs(
        &self,
        names: &[String],
        observer: &dyn TransformObserver,
    ) -> Result<Resolution> {
        let fixed: Vec<&String> = match self {
            Shape::OneToOne { in_col, .. } => vec![in_col],
            Shape::TwoToOne {
                in1_col, in2_col, ..
            } => vec![in1_col, in2_col],
            Shape::NToNone { spec, .. } | Shape::NToOne { spec, .. } | Shape::NToN { spec, .. } => {
                let targets = find_columns(spec, names);
                let missing = check_missing_columns(names, &targets, self.missing_policy(), observer)?;
                let inputs: Vec<String> = targets
                    .into_iter()
                    .filter(|column| !missing.contains(column))
                    .collect();
                return Ok(Resolution::Inputs(match self {
                    Shape::NToN { .. } => dedup(inputs),
                    _ => inputs,
                }));
            }
        };
        for column in &fixed {
            let missing = check_missing_columns(
                names,
                std::slice::from_ref(*column),
                self.missing_policy(),
                observer,
            )?;
            if !missing.is_empty() {
                return Ok(Resolution::Skip {
                    column: (*column).clone(),
                });
            }
        }
        Ok(Resolution::Inputs(fixed.into_iter().cloned().collect()))
    }

    /// Returns the output column names for the given inputs.
    pub fn resolve_outputs(&self, inputs: &[String]) -> Vec<String> {
        match self {
            Shape::OneToOne { out_col, .. }
            | Shape::TwoToOne { out_col, .. }
            | Shape::NToOne { out_col, .. } => vec![out_col.clone()],
            Shape::NToNone { .. } => Vec::new(),
            Shape::NToN {
                output: NToNOutput::Derived { prefix, suffix, .. },
                ..
            } => inputs
                .iter()
                .map(|column| format!("{prefix}{column}{suffix}"))
                .collect(),
            Shape::NToN {
                output: NToNOutput::InPlace,
                ..
            } => inputs.to_vec(),
        }
    }

    /// Applies the existing-column policy to `outputs`.
    pub fn check_outputs(
        &self,
        names: &[String],
        outputs: &[String],
        observer: &dyn TransformObserver,
    ) -> Result<()> {
        if let Some(policy) = self.exist_policy() {
            check_existing_columns(names, outputs, policy, observer)?;
        }
        Ok(())
    }

    /// Merges a kernel output into `frame`.
    pub fn merge(
        &self,
        kind: &str,
        frame: &DataFrame,
        produced: DataFrame,
        inputs: &[String],
        outputs: &[String],
    ) -> Result<DataFrame> {
        if let Shape::NToNone { .. } = self {
            return Ok(produced);
        }
        if produced.height() != frame.height() {
            return Err(unexpected(
                kind,
                format!(
                    "expected {} rows, found {}",
                    frame.height(),
                    produced.height()
                ),
            ));
        }
        let mut out = frame.clone();
        match self {
            Shape::NToN { .. } => {
                if produced.width() != inputs.len() {
                    return Err(unexpected(
                        kind,
                        format!(
                            "expected {} columns, found {}",
                            inputs.len(),
                            produced.width()
                        ),
                    ));
                }
                for (input, output) in inputs.iter().zip(outputs) {
                    let column = produced
                        .column(input)
                        .map_err(|_| unexpected(kind, format!("column '{input}' is missing")))?;
                    out.with_column(column.clone().with_name(output.as_str().into()))?;
                }
            }
            _ => {
                let (Some(column), 1, Some(output)) =
                    (produced.get_columns().first(), produced.width(), outputs.first())
                else {
                    return Err(unexpected(
                        kind,
                        format!("expected 1 column, found {}", produced.width()),
                    ));
                };
                out.with_column(column.clone().with_name(output.as_str().into()))?;
            }
        }
        Ok(out)
    }
}

fn insert_spec(args: &mut Args, spec: &ColumnSpec) {
    args.insert("columns", &spec.columns);
    args.insert("exclude_columns", spec.exclude_columns.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_column_names_are_rejected() {
        assert_eq!(
            Shape::one_to_one("", "b").unwrap_err(),
            ConfigError::EmptyColumnName { argument: "in_col" }
        );
        assert!(Shape::n_to_one(ColumnSpec::all(), "").is_err());
    }

    #[test]
    fn args_order() {
        let shape = Shape::n_to_n(ColumnSpec::explicit(["a"]), "p_", "_s")
            .with_exist_policy(Policy::Warn);
        let keys: Vec<_> = shape.args().keys().map(str::to_string).collect();
        assert_eq!(
            keys,
            names(&[
                "columns",
                "exclude_columns",
                "prefix",
                "suffix",
                "exist_policy",
                "missing_policy"
            ])
        );
    }

    #[test]
    fn inplace_has_no_exist_policy() {
        let shape = Shape::n_to_n_inplace(ColumnSpec::all()).with_exist_policy(Policy::Warn);
        assert_eq!(shape.exist_policy(), None);
        assert!(!shape.args().contains_key("prefix"));
        assert!(!shape.args().contains_key("exist_policy"));
    }

    #[test]
    fn two_to_one_short_circuits() {
        let observer = RecordingObserver::new();
        let shape = Shape::two_to_one("x", "y", "z")
            .unwrap()
            .with_missing_policy(Policy::Warn);
        let resolution = shape
            .resolve_inputs(&names(&["a"]), observer.as_ref())
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Skip {
                column: "x".to_string()
            }
        );
        assert_eq!(observer.warnings().len(), 1);
        assert_eq!(observer.warnings()[0].columns(), names(&["x"]).as_slice());
    }

    #[test]
    fn n_to_n_outputs() {
        let shape = Shape::n_to_n(ColumnSpec::all(), "pre_", "_post");
        assert_eq!(
            shape.resolve_outputs(&names(&["a", "b"])),
            names(&["pre_a_post", "pre_b_post"])
        );
    }

    #[test]
    fn n_to_n_dedups_inputs() {
        let observer = RecordingObserver::new();
        let shape = Shape::n_to_n(ColumnSpec::explicit(["a", "b", "a"]), "", "_out");
        let resolution = shape
            .resolve_inputs(&names(&["a", "b"]), observer.as_ref())
            .unwrap();
        assert_eq!(resolution, Resolution::Inputs(names(&["a", "b"])));
    }
}
