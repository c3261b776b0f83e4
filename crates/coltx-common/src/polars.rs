//! Polars DataFrame helper functions.
//!
//! This module provides schema introspection helpers and the conversions
//! between DataFrame columns and the dense `f64` matrices consumed by
//! estimators.

use ndarray::Array2;
use polars::prelude::{Column, DataFrame, DataType, PolarsResult};

/// Returns the column names of a DataFrame, in order.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use coltx_common::column_names;
///
/// let df = df!("a" => [1, 2], "b" => ["x", "y"]).unwrap();
/// assert_eq!(column_names(&df), vec!["a".to_string(), "b".to_string()]);
/// ```
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Returns `(name, dtype)` pairs for every column, in order.
pub fn schema_entries(df: &DataFrame) -> Vec<(String, DataType)> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.dtype().clone()))
        .collect()
}

/// Converts the given columns into a `(rows, columns)` matrix of `f64`.
///
/// Every column is cast to `Float64`; null values become NaN.
pub fn frame_to_matrix(df: &DataFrame, columns: &[String]) -> PolarsResult<Array2<f64>> {
    let mut matrix = Array2::from_elem((df.height(), columns.len()), f64::NAN);
    for (j, name) in columns.iter().enumerate() {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        for (i, value) in casted.f64()?.into_iter().enumerate() {
            if let Some(v) = value {
                matrix[[i, j]] = v;
            }
        }
    }
    Ok(matrix)
}

/// Converts a matrix back into `Float64` columns with the given names.
///
/// NaN values are kept as NaN; see [`propagate_nulls`] to restore nulls.
pub fn matrix_to_columns(matrix: &Array2<f64>, names: &[String]) -> Vec<Column> {
    names
        .iter()
        .enumerate()
        .map(|(j, name)| Column::new(name.as_str().into(), matrix.column(j).to_vec()))
        .collect()
}

/// Re-applies the null positions of `reference` to the same-named columns
/// of `frame`.
///
/// Columns of `frame` without a counterpart in `reference` are returned
/// unchanged.
pub fn propagate_nulls(frame: &DataFrame, reference: &DataFrame) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(frame.width());
    for column in frame.get_columns() {
        let Ok(source) = reference.column(column.name().as_str()) else {
            columns.push(column.clone());
            continue;
        };
        if source.null_count() == 0 {
            columns.push(column.clone());
            continue;
        }
        let values = column.cast(&DataType::Float64)?;
        let mask = source.is_null();
        let merged: Vec<Option<f64>> = values
            .f64()?
            .into_iter()
            .zip(&mask)
            .map(|(value, is_null)| if is_null == Some(true) { None } else { value })
            .collect();
        columns.push(Column::new(column.name().clone(), merged));
    }
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("a".into(), vec![Some(1.0), None, Some(3.0)]).into(),
            Series::new("b".into(), vec![1i64, 2, 3]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_frame_to_matrix_uses_nan_for_nulls() {
        let df = frame();
        let matrix = frame_to_matrix(&df, &["b".to_string(), "a".to_string()]).unwrap();
        assert_eq!(matrix.dim(), (3, 2));
        assert_eq!(matrix[[0, 0]], 1.0);
        assert_eq!(matrix[[2, 1]], 3.0);
        assert!(matrix[[1, 1]].is_nan());
    }

    #[test]
    fn test_frame_to_matrix_missing_column_errors() {
        let df = frame();
        assert!(frame_to_matrix(&df, &["zzz".to_string()]).is_err());
    }

    #[test]
    fn test_matrix_to_columns_names() {
        let matrix = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let columns = matrix_to_columns(&matrix, &["x".to_string(), "y".to_string()]);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name().as_str(), "x");
        let y = columns[1].f64().unwrap();
        assert_eq!(y.get(0), Some(2.0));
        assert_eq!(y.get(1), Some(4.0));
    }

    #[test]
    fn test_propagate_nulls() {
        let df = frame();
        let out = DataFrame::new(vec![
            Series::new("a".into(), vec![10.0, f64::NAN, 30.0]).into(),
        ])
        .unwrap();
        let merged = propagate_nulls(&out, &df).unwrap();
        let a = merged.column("a").unwrap().f64().unwrap();
        assert_eq!(a.get(0), Some(10.0));
        assert_eq!(a.get(1), None);
        assert_eq!(a.get(2), Some(30.0));
    }

    #[test]
    fn test_schema_entries() {
        let df = frame();
        let entries = schema_entries(&df);
        assert_eq!(entries[0], ("a".to_string(), DataType::Float64));
        assert_eq!(entries[1], ("b".to_string(), DataType::Int64));
    }
}
