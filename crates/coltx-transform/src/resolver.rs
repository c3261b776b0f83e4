//! Column resolution.
//!
//! These functions compute the working column set of a transformer from its
//! [`ColumnSpec`] and the column names of a frame. They are pure and never
//! look at the data.

use std::collections::HashSet;

use coltx_model::{ColumnSelection, ColumnSpec};

/// Returns the targeted columns with every excluded name removed.
///
/// For [`ColumnSelection::All`] the targets are `names`. Order is preserved,
/// duplicates in an explicit list are kept, and an excluded name is removed
/// wherever it appears.
pub fn find_columns(spec: &ColumnSpec, names: &[String]) -> Vec<String> {
    let excluded: HashSet<&str> = spec.exclude_columns.iter().map(String::as_str).collect();
    let targets = match &spec.columns {
        ColumnSelection::All => names,
        ColumnSelection::Explicit(columns) => columns.as_slice(),
    };
    targets
        .iter()
        .filter(|name| !excluded.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Returns the resolved columns that are present in `names`.
pub fn find_common_columns(spec: &ColumnSpec, names: &[String]) -> Vec<String> {
    let present: HashSet<&str> = names.iter().map(String::as_str).collect();
    find_columns(spec, names)
        .into_iter()
        .filter(|name| present.contains(name.as_str()))
        .collect()
}

/// Returns the resolved columns that are absent from `names`.
pub fn find_missing_columns(spec: &ColumnSpec, names: &[String]) -> Vec<String> {
    missing_from(&find_columns(spec, names), names)
}

/// Returns the elements of `targets` absent from `names`, in order.
pub(crate) fn missing_from(targets: &[String], names: &[String]) -> Vec<String> {
    let present: HashSet<&str> = names.iter().map(String::as_str).collect();
    targets
        .iter()
        .filter(|name| !present.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Returns the elements of `targets` present in `names`, in order.
pub(crate) fn present_in(targets: &[String], names: &[String]) -> Vec<String> {
    let present: HashSet<&str> = names.iter().map(String::as_str).collect();
    targets
        .iter()
        .filter(|name| present.contains(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn all_resolves_to_schema() {
        let schema = names(&["col1", "col2", "col3", "col4"]);
        assert_eq!(find_columns(&ColumnSpec::all(), &schema), schema);
        assert!(find_missing_columns(&ColumnSpec::all(), &schema).is_empty());
    }

    #[test]
    fn explicit_keeps_order_and_duplicates() {
        let spec = ColumnSpec::explicit(["b", "a", "b"]);
        let schema = names(&["a", "b"]);
        assert_eq!(find_columns(&spec, &schema), names(&["b", "a", "b"]));
    }

    #[test]
    fn exclusion_wins() {
        let spec = ColumnSpec::explicit(["a", "b", "a", "c"]).with_exclude(["a", "zzz"]);
        let schema = names(&["a", "b", "c"]);
        assert_eq!(find_columns(&spec, &schema), names(&["b", "c"]));
    }

    #[test]
    fn common_and_missing() {
        let spec = ColumnSpec::explicit(["col2", "col5", "col3"]);
        let schema = names(&["col1", "col2", "col3", "col4"]);
        assert_eq!(find_common_columns(&spec, &schema), names(&["col2", "col3"]));
        assert_eq!(find_missing_columns(&spec, &schema), names(&["col5"]));
    }
}
