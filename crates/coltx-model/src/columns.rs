//! Column selection data.

use serde::{Deserialize, Serialize};

/// Which columns a transformer targets.
///
/// `All` is resolved lazily against the schema of each frame, so the same
/// transformer can target different columns on different frames.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Option<Vec<String>>")]
pub enum ColumnSelection {
    /// Every column of the frame.
    #[default]
    All,
    /// An explicit, ordered list. Duplicates are kept as given.
    Explicit(Vec<String>),
}

impl ColumnSelection {
    /// Build an explicit selection from any list of names.
    pub fn explicit<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSelection::Explicit(columns.into_iter().map(Into::into).collect())
    }
}

impl From<Option<Vec<String>>> for ColumnSelection {
    fn from(value: Option<Vec<String>>) -> Self {
        match value {
            Some(columns) => ColumnSelection::Explicit(columns),
            None => ColumnSelection::All,
        }
    }
}

impl From<ColumnSelection> for Option<Vec<String>> {
    fn from(value: ColumnSelection) -> Self {
        match value {
            ColumnSelection::All => None,
            ColumnSelection::Explicit(columns) => Some(columns),
        }
    }
}

/// Target columns plus the names to exclude from them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(default)]
    pub columns: ColumnSelection,
    #[serde(default)]
    pub exclude_columns: Vec<String>,
}

impl ColumnSpec {
    /// Target every column of the frame.
    pub fn all() -> Self {
        Self::default()
    }

    /// Target an explicit list of columns.
    pub fn explicit<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: ColumnSelection::explicit(columns),
            exclude_columns: Vec::new(),
        }
    }

    /// Set the excluded columns.
    #[must_use]
    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_columns = exclude.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true when `name` is listed in the exclusions.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude_columns.iter().any(|col| col == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_deserializes_to_all() {
        let spec: ColumnSpec = serde_json::from_str(r#"{"columns": null}"#).unwrap();
        assert_eq!(spec.columns, ColumnSelection::All);
        assert!(spec.exclude_columns.is_empty());
    }

    #[test]
    fn list_deserializes_to_explicit() {
        let spec: ColumnSpec =
            serde_json::from_str(r#"{"columns": ["a", "b"], "exclude_columns": ["b"]}"#).unwrap();
        assert_eq!(spec.columns, ColumnSelection::explicit(["a", "b"]));
        assert!(spec.is_excluded("b"));
        assert!(!spec.is_excluded("a"));
    }
}
