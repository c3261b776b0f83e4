//! Integration tests for the CLI commands.

use std::fs;

use coltx_cli::commands::{kinds_table, read_csv, run_pipeline, schema_table};
use coltx_transform::kinds;
use tempfile::TempDir;

const INPUT: &str = "id,a,b,label\n1,1.0,10,  x \n2,,20,y\n3,3.0,30, z\n";

const PIPELINE: &str = r#"{
    "transformers": [
        {"type": "InplaceStripChars", "columns": ["label"]},
        {"type": "SumHorizontal", "columns": ["a", "b"], "out_col": "total"},
        {"type": "MinMaxScaler", "columns": ["total"], "suffix": "_scaled"},
        {"type": "ColumnSelection", "exclude_columns": ["id"]}
    ]
}"#;

fn write_inputs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let input = dir.path().join("input.csv");
    let pipeline = dir.path().join("pipeline.json");
    fs::write(&input, INPUT).unwrap();
    fs::write(&pipeline, PIPELINE).unwrap();
    (input, pipeline)
}

#[test]
fn run_writes_transformed_csv() {
    let dir = TempDir::new().unwrap();
    let (input, pipeline) = write_inputs(&dir);
    let output = dir.path().join("output.csv");

    let summary = run_pipeline(&input, &pipeline, Some(&output)).unwrap();

    assert_eq!(summary.steps, 4);
    assert_eq!(summary.input_shape, (3, 4));
    assert_eq!(summary.output_shape, (3, 5));

    let written = read_csv(&output).unwrap();
    let names: Vec<String> = written
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["a", "b", "label", "total", "total_scaled"]);

    let labels: Vec<Option<String>> = written
        .column("label")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    assert_eq!(
        labels,
        vec![Some("x".to_string()), Some("y".to_string()), Some("z".to_string())]
    );

    let scaled: Vec<Option<f64>> = written
        .column("total_scaled")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(scaled, vec![Some(0.0), Some(9.0 / 22.0), Some(1.0)]);
}

#[test]
fn run_reports_invalid_pipelines() {
    let dir = TempDir::new().unwrap();
    let (input, _) = write_inputs(&dir);
    let pipeline = dir.path().join("broken.json");
    fs::write(
        &pipeline,
        r#"{"transformers": [{"type": "CopyColumns", "missing_policy": "sometimes"}]}"#,
    )
    .unwrap();

    let err = run_pipeline(&input, &pipeline, None).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("Invalid pipeline"), "{message}");
    assert!(message.contains("incorrect missing_policy: 'sometimes'"), "{message}");
}

#[test]
fn run_reports_missing_columns() {
    let dir = TempDir::new().unwrap();
    let (input, _) = write_inputs(&dir);
    let pipeline = dir.path().join("missing.json");
    fs::write(
        &pipeline,
        r#"{"transformers": [{"type": "CopyColumn", "in_col": "c", "out_col": "d"}]}"#,
    )
    .unwrap();

    let err = run_pipeline(&input, &pipeline, None).unwrap_err();

    assert!(format!("{err:#}").contains(r#"1 column is missing in the DataFrame: ["c"]"#));
}

#[test]
fn missing_pipeline_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let (input, _) = write_inputs(&dir);
    let err = run_pipeline(&input, &dir.path().join("absent.json"), None).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load pipeline"));
}

#[test]
fn schema_lists_columns() {
    let dir = TempDir::new().unwrap();
    let (input, _) = write_inputs(&dir);
    let df = read_csv(&input).unwrap();

    let rendered = schema_table(&df).to_string();

    for name in ["id", "a", "b", "label"] {
        assert!(rendered.contains(name), "{rendered}");
    }
    assert!(rendered.contains("f64"), "{rendered}");
}

#[test]
fn kinds_table_has_one_row_per_kind() {
    let table = kinds_table();
    assert_eq!(table.row_iter().count(), kinds().len());
}
