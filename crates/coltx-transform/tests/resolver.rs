//! Property tests for column resolution.

use std::collections::HashSet;

use coltx_model::ColumnSpec;
use coltx_transform::{find_columns, find_common_columns, find_missing_columns};
use proptest::prelude::*;

fn column_name() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn frame_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set(column_name(), 0..8).prop_map(|set| {
        let mut names: Vec<String> = set.into_iter().collect();
        names.sort();
        names
    })
}

fn spec() -> impl Strategy<Value = ColumnSpec> {
    (
        proptest::option::of(proptest::collection::vec(column_name(), 0..8)),
        proptest::collection::vec(column_name(), 0..4),
    )
        .prop_map(|(columns, exclude)| {
            let spec = match columns {
                Some(columns) => ColumnSpec::explicit(columns),
                None => ColumnSpec::all(),
            };
            spec.with_exclude(exclude)
        })
}

proptest! {
    #[test]
    fn common_and_missing_partition_the_resolved_columns(spec in spec(), names in frame_names()) {
        let resolved = find_columns(&spec, &names);
        let common = find_common_columns(&spec, &names);
        let missing = find_missing_columns(&spec, &names);

        prop_assert_eq!(common.len() + missing.len(), resolved.len());
        let present: HashSet<&String> = names.iter().collect();
        prop_assert!(common.iter().all(|name| present.contains(name)));
        prop_assert!(missing.iter().all(|name| !present.contains(name)));
    }

    #[test]
    fn exclusion_always_wins(spec in spec(), names in frame_names()) {
        let resolved = find_columns(&spec, &names);
        prop_assert!(resolved.iter().all(|name| !spec.is_excluded(name)));
    }

    #[test]
    fn all_selection_never_reports_missing(exclude in proptest::collection::vec(column_name(), 0..4), names in frame_names()) {
        let spec = ColumnSpec::all().with_exclude(exclude);
        prop_assert!(find_missing_columns(&spec, &names).is_empty());
        prop_assert_eq!(find_common_columns(&spec, &names), find_columns(&spec, &names));
    }

    #[test]
    fn resolution_keeps_explicit_order(columns in proptest::collection::vec(column_name(), 0..8), names in frame_names()) {
        let spec = ColumnSpec::explicit(columns.clone());
        prop_assert_eq!(find_columns(&spec, &names), columns);
    }
}

#[test]
fn duplicates_are_kept_and_excluded_everywhere() {
    let spec = ColumnSpec::explicit(["a", "b", "a", "c"]).with_exclude(["c"]);
    let names: Vec<String> = vec!["a".to_string(), "b".to_string()];
    assert_eq!(find_columns(&spec, &names), vec!["a", "b", "a"]);
    assert!(find_missing_columns(&spec, &names).is_empty());
}
