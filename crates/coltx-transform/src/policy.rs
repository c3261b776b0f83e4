//! Missing and existing column policy enforcement.

use coltx_model::Policy;
use tracing::debug;

use crate::error::{Result, TransformError, TransformWarning};
use crate::observer::{TransformEvent, TransformObserver};
use crate::resolver::{missing_from, present_in};

fn sorted(mut columns: Vec<String>) -> Vec<String> {
    columns.sort();
    columns
}

/// Applies `policy` to the elements of `targets` absent from `names`.
///
/// Returns the missing columns, in `targets` order, so the caller can drop
/// them from its working set. Under [`Policy::Raise`] a non-empty missing set
/// fails with [`TransformError::MissingColumns`]; under [`Policy::Warn`] one
/// warning is sent to `observer`.
pub fn check_missing_columns(
    names: &[String],
    targets: &[String],
    policy: Policy,
    observer: &dyn TransformObserver,
) -> Result<Vec<String>> {
    let missing = missing_from(targets, names);
    if missing.is_empty() {
        return Ok(missing);
    }
    debug!(missing = ?missing, policy = %policy, "missing input columns");
    match policy {
        Policy::Raise => Err(TransformError::MissingColumns {
            columns: sorted(missing),
        }),
        Policy::Warn => {
            observer.on_event(&TransformEvent::Warning(TransformWarning::MissingColumns {
                columns: sorted(missing.clone()),
            }));
            Ok(missing)
        }
        Policy::Ignore => Ok(missing),
    }
}

/// Applies `policy` to the elements of `targets` already present in `names`.
///
/// Returns the existing columns; they are overwritten by the caller unless
/// [`Policy::Raise`] stops the call first.
pub fn check_existing_columns(
    names: &[String],
    targets: &[String],
    policy: Policy,
    observer: &dyn TransformObserver,
) -> Result<Vec<String>> {
    let existing = present_in(targets, names);
    if existing.is_empty() {
        return Ok(existing);
    }
    debug!(existing = ?existing, policy = %policy, "existing output columns");
    match policy {
        Policy::Raise => Err(TransformError::ExistingColumns {
            columns: sorted(existing),
        }),
        Policy::Warn => {
            observer.on_event(&TransformEvent::Warning(
                TransformWarning::ExistingColumns {
                    columns: sorted(existing.clone()),
                },
            ));
            Ok(existing)
        }
        Policy::Ignore => Ok(existing),
    }
}
