//! Implementations of the `coltx` subcommands.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::{debug, info, info_span};

use coltx_common::{schema_entries, str_shape_diff};
use coltx_transform::{BaseTransformer, PipelineConfig, kinds};

/// Outcome of a `run` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub input_shape: (usize, usize),
    pub output_shape: (usize, usize),
    pub output: Option<PathBuf>,
}

pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    Ok(df)
}

pub fn write_csv(df: &mut DataFrame, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            CsvWriter::new(&mut stdout)
                .include_header(true)
                .finish(df)
                .context("Failed to write CSV to stdout")?;
        }
    }
    Ok(())
}

/// Fits the pipeline on `input` and writes the transformed frame.
pub fn run_pipeline(input: &Path, pipeline: &Path, output: Option<&Path>) -> Result<RunSummary> {
    let span = info_span!("run", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = PipelineConfig::from_path(pipeline)
        .with_context(|| format!("Failed to load pipeline {}", pipeline.display()))?;
    let mut sequential = config
        .build()
        .with_context(|| format!("Invalid pipeline {}", pipeline.display()))?;
    debug!(pipeline = %sequential, "pipeline built");

    let df = read_csv(input)?;
    let mut out = sequential
        .fit_transform(&df)
        .context("Failed to apply the pipeline")?;
    write_csv(&mut out, output)?;

    info!(
        steps = sequential.len(),
        duration_ms = start.elapsed().as_millis(),
        "{}",
        str_shape_diff(df.shape(), out.shape())
    );
    Ok(RunSummary {
        steps: sequential.len(),
        input_shape: df.shape(),
        output_shape: out.shape(),
        output: output.map(Path::to_path_buf),
    })
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

/// Column name, data type and null count of every column.
pub fn schema_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
    ]);
    apply_table_style(&mut table);
    for ((name, dtype), column) in schema_entries(df).into_iter().zip(df.get_columns()) {
        table.add_row(vec![
            name,
            dtype.to_string(),
            column.null_count().to_string(),
        ]);
    }
    table
}

pub fn kinds_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Shape"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for kind in kinds() {
        table.add_row(vec![kind.name, kind.shape, kind.summary]);
    }
    table
}

pub fn print_run_summary(summary: &RunSummary) {
    let Some(path) = &summary.output else {
        return;
    };
    println!("Output: {}", path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Steps"), header_cell("Input"), header_cell("Output")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        summary.steps.to_string(),
        format!("{:?}", summary.input_shape),
        format!("{:?}", summary.output_shape),
    ]);
    println!("{table}");
}
