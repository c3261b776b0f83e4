use coltx_common::{columns_verb, format_columns};
use coltx_model::ConfigError;
use polars::prelude::PolarsError;
use thiserror::Error;

use crate::estimators::EstimatorError;

fn exist_phrase(count: usize) -> &'static str {
    if count == 1 {
        "column already exists"
    } else {
        "columns already exist"
    }
}

fn missing_message(columns: &[String]) -> String {
    format!(
        "{} {} missing in the DataFrame: {}",
        columns.len(),
        columns_verb(columns.len()),
        format_columns(columns)
    )
}

fn existing_message(columns: &[String]) -> String {
    format!(
        "{} {} in the DataFrame: {}",
        columns.len(),
        exist_phrase(columns.len()),
        format_columns(columns)
    )
}

/// Errors raised while fitting or applying a transformer.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input columns absent under `Policy::Raise`. Names are sorted.
    #[error("{}", missing_message(.columns))]
    MissingColumns { columns: Vec<String> },

    /// Output columns already present under `Policy::Raise`. Names are sorted.
    #[error("{}", existing_message(.columns))]
    ExistingColumns { columns: Vec<String> },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    /// A kernel returned a frame that does not match its shape.
    #[error("{transformer} returned an unexpected output: {reason}")]
    UnexpectedOutput { transformer: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Recoverable column-set anomalies reported under `Policy::Warn`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformWarning {
    #[error(
        "{} {} missing in the DataFrame and will be ignored: {}",
        .columns.len(),
        columns_verb(.columns.len()),
        format_columns(.columns)
    )]
    MissingColumns { columns: Vec<String> },

    #[error(
        "{} {} in the DataFrame and will be overwritten: {}",
        .columns.len(),
        exist_phrase(.columns.len()),
        format_columns(.columns)
    )]
    ExistingColumns { columns: Vec<String> },
}

impl TransformWarning {
    /// Returns the column names carried by the warning.
    pub fn columns(&self) -> &[String] {
        match self {
            TransformWarning::MissingColumns { columns }
            | TransformWarning::ExistingColumns { columns } => columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn missing_error_singular() {
        let err = TransformError::MissingColumns {
            columns: names(&["a"]),
        };
        assert_eq!(err.to_string(), r#"1 column is missing in the DataFrame: ["a"]"#);
    }

    #[test]
    fn missing_error_plural() {
        let err = TransformError::MissingColumns {
            columns: names(&["a", "b"]),
        };
        assert_eq!(
            err.to_string(),
            r#"2 columns are missing in the DataFrame: ["a", "b"]"#
        );
    }

    #[test]
    fn existing_error_messages() {
        let err = TransformError::ExistingColumns {
            columns: names(&["x"]),
        };
        assert_eq!(
            err.to_string(),
            r#"1 column already exists in the DataFrame: ["x"]"#
        );
        let warning = TransformWarning::ExistingColumns {
            columns: names(&["x", "y"]),
        };
        assert_eq!(
            warning.to_string(),
            r#"2 columns already exist in the DataFrame and will be overwritten: ["x", "y"]"#
        );
        assert_eq!(warning.columns().len(), 2);
    }

    #[test]
    fn missing_warning_message() {
        let warning = TransformWarning::MissingColumns {
            columns: names(&["c"]),
        };
        assert_eq!(
            warning.to_string(),
            r#"1 column is missing in the DataFrame and will be ignored: ["c"]"#
        );
    }
}
