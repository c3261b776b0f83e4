//! Fitted-state estimators over dense `f64` matrices.
//!
//! Each estimator learns per-feature statistics in [`Estimator::fit`] and
//! applies them in [`Estimator::transform`]. NaN entries are ignored while
//! fitting and stay NaN after transforming.

pub mod maxabs;
pub mod minmax;
pub mod robust;
pub mod standard;

use std::fmt;

use coltx_model::Args;
use ndarray::{Array2, ArrayView1};
use thiserror::Error;

pub use maxabs::MaxAbsScaler;
pub use minmax::MinMaxScaler;
pub use robust::RobustScaler;
pub use standard::StandardScaler;

/// Errors raised by estimators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    #[error("this {estimator} instance is not fitted yet; call 'fit' before using this estimator")]
    NotFitted { estimator: &'static str },

    #[error("X has {got} features, but {estimator} is expecting {expected} features as input")]
    FeatureMismatch {
        estimator: &'static str,
        expected: usize,
        got: usize,
    },
}

/// A feature-wise estimator with fitted state.
pub trait Estimator: Send + Sync + fmt::Debug {
    /// Estimator name, used in errors and transformer kinds.
    fn name(&self) -> &'static str;

    /// Constructor parameters, in declaration order.
    fn params(&self) -> Args;

    fn is_fitted(&self) -> bool;

    /// Learn per-feature statistics. Refitting replaces the previous state.
    fn fit(&mut self, data: &Array2<f64>) -> Result<(), EstimatorError>;

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, EstimatorError>;
}

/// Returns the non-NaN values of a feature column.
pub(crate) fn observed(column: ArrayView1<'_, f64>) -> Vec<f64> {
    column.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Replaces a zero scale by one so constant features are left unscaled.
pub(crate) fn handle_zero_scale(scale: f64) -> f64 {
    if scale == 0.0 { 1.0 } else { scale }
}

/// Checks that `data` has the number of features seen during fit.
pub(crate) fn check_features(
    estimator: &'static str,
    expected: usize,
    data: &Array2<f64>,
) -> Result<(), EstimatorError> {
    let got = data.ncols();
    if got == expected {
        Ok(())
    } else {
        Err(EstimatorError::FeatureMismatch {
            estimator,
            expected,
            got,
        })
    }
}

/// Applies `(x - offset[j]) / scale[j]` to every entry.
pub(crate) fn apply_affine(data: &Array2<f64>, offset: &[f64], scale: &[f64]) -> Array2<f64> {
    let mut out = data.clone();
    for (j, mut column) in out.columns_mut().into_iter().enumerate() {
        column.mapv_inplace(|x| (x - offset[j]) / scale[j]);
    }
    out
}
