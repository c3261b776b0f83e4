//! Tests for missing and existing column handling across shapes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use coltx_common::column_names;
use coltx_model::{ColumnSpec, Policy};
use coltx_transform::transformers::{AbsDiffColumn, Cast, CopyColumn, CopyColumns};
use coltx_transform::{
    BaseTransformer, FnKernel, KernelContext, RecordingObserver, Shape, TransformError,
    TransformEvent, TransformWarning, Transformer,
};
use polars::prelude::{DataFrame, df};

fn frame() -> DataFrame {
    df!(
        "a" => [1i64, 2, 3],
        "b" => [4i64, 5, 6],
        "c" => [7i64, 8, 9],
    )
    .unwrap()
}

fn copy_kernel(flag: Arc<AtomicBool>) -> FnKernel {
    FnKernel::new(
        "Tracked",
        move |frame: &DataFrame, ctx: &KernelContext<'_>| {
            flag.store(true, Ordering::SeqCst);
            Ok(frame.select(ctx.columns.iter().map(String::as_str))?)
        },
    )
}

// ============================================================================
// Missing input columns
// ============================================================================

#[test]
fn one_to_one_missing_raise_names_the_column() {
    let t = CopyColumn::transformer("x", "y").unwrap();
    let err = t.transform(&frame()).unwrap_err();
    match &err {
        TransformError::MissingColumns { columns } => assert_eq!(columns, &["x"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        r#"1 column is missing in the DataFrame: ["x"]"#
    );
}

#[test]
fn one_to_one_missing_warn_skips_with_one_warning() {
    let observer = RecordingObserver::new();
    let t = CopyColumn::transformer("x", "y")
        .unwrap()
        .with_missing_policy(Policy::Warn)
        .with_observer(observer.clone());
    let input = frame();

    let out = t.transform(&input).unwrap();

    assert!(out.equals_missing(&input));
    assert_eq!(
        observer.warnings(),
        vec![TransformWarning::MissingColumns {
            columns: vec!["x".to_string()]
        }]
    );
    assert_eq!(
        observer.events().last(),
        Some(&TransformEvent::Skipped {
            transformer: "CopyColumn".to_string(),
            method: "transform",
            column: "x".to_string(),
        })
    );
}

#[test]
fn one_to_one_missing_ignore_is_silent() {
    let observer = RecordingObserver::new();
    let t = CopyColumn::transformer("x", "y")
        .unwrap()
        .with_missing_policy(Policy::Ignore)
        .with_observer(observer.clone());

    let out = t.transform(&frame()).unwrap();

    assert_eq!(out.width(), 3);
    assert!(observer.warnings().is_empty());
}

#[test]
fn two_to_one_skips_on_first_missing_input() {
    let observer = RecordingObserver::new();
    let t = AbsDiffColumn::transformer("a", "z", "d")
        .unwrap()
        .with_missing_policy(Policy::Ignore)
        .with_observer(observer.clone());

    let out = t.transform(&frame()).unwrap();

    assert_eq!(column_names(&out), vec!["a", "b", "c"]);
    assert_eq!(
        observer.events(),
        vec![TransformEvent::Skipped {
            transformer: "AbsDiffColumn".to_string(),
            method: "transform",
            column: "z".to_string(),
        }]
    );
}

#[test]
fn n_to_n_missing_warn_sorts_names_and_keeps_the_rest() {
    let observer = RecordingObserver::new();
    let t = CopyColumns::transformer(ColumnSpec::explicit(["a", "z", "y"]), "", "_out")
        .with_missing_policy(Policy::Warn)
        .with_observer(observer.clone());

    let out = t.transform(&frame()).unwrap();

    assert_eq!(column_names(&out), vec!["a", "b", "c", "a_out"]);
    let warnings = observer.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        r#"2 columns are missing in the DataFrame and will be ignored: ["y", "z"]"#
    );
}

#[test]
fn n_to_n_missing_raise_lists_every_missing_column() {
    let t = CopyColumns::transformer(ColumnSpec::explicit(["z", "a", "y"]), "", "_out");
    let err = t.transform(&frame()).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"2 columns are missing in the DataFrame: ["y", "z"]"#
    );
}

#[test]
fn n_to_n_without_inputs_leaves_the_frame_unchanged() {
    let flag = Arc::new(AtomicBool::new(false));
    let t = Transformer::new(
        Shape::n_to_n(ColumnSpec::explicit(["z"]), "", "_out"),
        copy_kernel(flag.clone()),
    )
    .with_missing_policy(Policy::Ignore);
    let input = frame();

    let out = t.transform(&input).unwrap();

    assert!(out.equals_missing(&input));
    assert!(!flag.load(Ordering::SeqCst));
}

// ============================================================================
// Existing output columns
// ============================================================================

#[test]
fn n_to_n_writes_suffixed_outputs() {
    let t = CopyColumns::transformer(ColumnSpec::explicit(["a", "b"]), "", "_out");

    let out = t.transform(&frame()).unwrap();

    assert_eq!(column_names(&out), vec!["a", "b", "c", "a_out", "b_out"]);
    let values: Vec<Option<i64>> = out.column("b_out").unwrap().i64().unwrap().into_iter().collect();
    assert_eq!(values, vec![Some(4), Some(5), Some(6)]);
}

#[test]
fn existing_raise_fails_before_the_kernel_runs() {
    let flag = Arc::new(AtomicBool::new(false));
    let t = Transformer::new(
        Shape::n_to_n(ColumnSpec::explicit(["a", "b"]), "", "_out"),
        copy_kernel(flag.clone()),
    );
    let mut input = frame();
    input
        .with_column(input.column("c").unwrap().clone().with_name("b_out".into()))
        .unwrap();
    input
        .with_column(input.column("c").unwrap().clone().with_name("a_out".into()))
        .unwrap();

    let err = t.transform(&input).unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"2 columns already exist in the DataFrame: ["a_out", "b_out"]"#
    );
    assert!(!flag.load(Ordering::SeqCst));
}

#[test]
fn existing_warn_overwrites_with_one_warning() {
    let observer = RecordingObserver::new();
    let t = CopyColumn::transformer("a", "b")
        .unwrap()
        .with_exist_policy(Policy::Warn)
        .with_observer(observer.clone());

    let out = t.transform(&frame()).unwrap();

    assert_eq!(column_names(&out), vec!["a", "b", "c"]);
    let values: Vec<Option<i64>> = out.column("b").unwrap().i64().unwrap().into_iter().collect();
    assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(
        observer
            .warnings()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec![r#"1 column already exists in the DataFrame and will be overwritten: ["b"]"#]
    );
}

#[test]
fn existing_ignore_is_silent() {
    let observer = RecordingObserver::new();
    let t = CopyColumn::transformer("a", "b")
        .unwrap()
        .with_exist_policy(Policy::Ignore)
        .with_observer(observer.clone());

    t.transform(&frame()).unwrap();

    assert!(observer.events().is_empty());
}

#[test]
fn inplace_never_checks_existing_columns() {
    let t = Cast::inplace(ColumnSpec::explicit(["a"]), "float64").unwrap();

    let out = t.transform(&frame()).unwrap();

    assert_eq!(column_names(&out), vec!["a", "b", "c"]);
    assert_eq!(
        out.column("a").unwrap().dtype(),
        &polars::prelude::DataType::Float64
    );
}

// ============================================================================
// Fit
// ============================================================================

#[test]
fn stateless_fit_reports_nothing_to_fit() {
    let observer = RecordingObserver::new();
    let mut t = CopyColumns::transformer(ColumnSpec::all(), "", "_c").with_observer(observer.clone());

    t.fit(&frame()).unwrap();

    assert_eq!(
        observer.events(),
        vec![TransformEvent::FitSkipped {
            transformer: "CopyColumns".to_string()
        }]
    );
}

#[test]
fn fit_applies_the_missing_policy() {
    let mut t = CopyColumns::transformer(ColumnSpec::explicit(["z"]), "", "_c");
    assert!(matches!(
        t.fit(&frame()),
        Err(TransformError::MissingColumns { .. })
    ));
}

#[test]
fn fit_never_checks_existing_columns() {
    let mut t = CopyColumn::transformer("a", "b").unwrap();
    t.fit(&frame()).unwrap();
    assert!(matches!(
        t.transform(&frame()),
        Err(TransformError::ExistingColumns { .. })
    ));
}
