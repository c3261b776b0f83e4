//! Log-message formatting helpers.

/// Formats a list of column names as `["a", "b"]`.
///
/// # Examples
///
/// ```
/// use coltx_common::format_columns;
///
/// assert_eq!(format_columns(&["a".to_string(), "b".to_string()]), r#"["a", "b"]"#);
/// assert_eq!(format_columns(&[]), "[]");
/// ```
pub fn format_columns(columns: &[String]) -> String {
    format!("{columns:?}")
}

fn percent(diff: usize, orig: usize) -> f64 {
    if orig > 0 {
        100.0 * diff as f64 / orig as f64
    } else {
        f64::NAN
    }
}

fn str_diff(orig: usize, final_: usize, singular: &str, plural: &str) -> String {
    let diff = orig.abs_diff(final_);
    let desc = if orig >= final_ { "removed" } else { "added" };
    let noun = if diff > 1 { plural } else { singular };
    format!(
        "{diff}/{orig} ({:.4} %) {noun} been {desc}",
        percent(diff, orig)
    )
}

/// Describes a change in the number of columns.
///
/// # Examples
///
/// ```
/// use coltx_common::str_col_diff;
///
/// assert_eq!(str_col_diff(100, 10), "90/100 (90.0000 %) columns have been removed");
/// assert_eq!(str_col_diff(3, 4), "1/3 (33.3333 %) column has been added");
/// ```
pub fn str_col_diff(orig: usize, final_: usize) -> String {
    str_diff(orig, final_, "column has", "columns have")
}

/// Describes a change in the number of rows.
///
/// # Examples
///
/// ```
/// use coltx_common::str_row_diff;
///
/// assert_eq!(str_row_diff(100, 99), "1/100 (1.0000 %) row has been removed");
/// ```
pub fn str_row_diff(orig: usize, final_: usize) -> String {
    str_diff(orig, final_, "row has", "rows have")
}

/// Describes a change of DataFrame shape `(rows, columns)`.
///
/// # Examples
///
/// ```
/// use coltx_common::str_shape_diff;
///
/// assert_eq!(
///     str_shape_diff((100, 10), (80, 10)),
///     "DataFrame shape: (100, 10) -> (80, 10) | 20/100 (20.0000 %) rows have been removed"
/// );
/// ```
pub fn str_shape_diff(orig: (usize, usize), final_: (usize, usize)) -> String {
    let mut msg = format!("DataFrame shape: {orig:?} -> {final_:?}");
    if orig.0 != final_.0 {
        msg.push_str(" | ");
        msg.push_str(&str_row_diff(orig.0, final_.0));
    }
    if orig.1 != final_.1 {
        msg.push_str(" | ");
        msg.push_str(&str_col_diff(orig.1, final_.1));
    }
    msg
}

/// Returns `"column is"` or `"columns are"` depending on `count`.
pub fn columns_verb(count: usize) -> &'static str {
    if count == 1 { "column is" } else { "columns are" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_col_diff_zero_origin() {
        assert_eq!(str_col_diff(0, 2), "2/0 (NaN %) columns have been added");
    }

    #[test]
    fn test_str_shape_diff_unchanged() {
        assert_eq!(str_shape_diff((5, 3), (5, 3)), "DataFrame shape: (5, 3) -> (5, 3)");
    }

    #[test]
    fn test_str_shape_diff_both() {
        assert_eq!(
            str_shape_diff((4, 2), (2, 3)),
            "DataFrame shape: (4, 2) -> (2, 3) | 2/4 (50.0000 %) rows have been removed \
             | 1/2 (50.0000 %) column has been added"
        );
    }

    #[test]
    fn test_columns_wording() {
        assert_eq!(columns_verb(1), "column is");
        assert_eq!(columns_verb(2), "columns are");
    }
}
