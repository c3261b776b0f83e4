//! Scaling by the maximum absolute value.

use coltx_model::Args;
use ndarray::Array2;

use super::{
    Estimator, EstimatorError, apply_affine, check_features, handle_zero_scale, observed,
};

/// Scales each feature so that its maximal absolute value is 1.0.
///
/// The data is not shifted, so zeros stay zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaxAbsScaler {
    max_abs: Option<Vec<f64>>,
}

impl MaxAbsScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-feature maximum absolute values learned during fit.
    pub fn max_abs(&self) -> Option<&[f64]> {
        self.max_abs.as_deref()
    }
}

impl Estimator for MaxAbsScaler {
    fn name(&self) -> &'static str {
        "MaxAbsScaler"
    }

    fn params(&self) -> Args {
        Args::new()
    }

    fn is_fitted(&self) -> bool {
        self.max_abs.is_some()
    }

    fn fit(&mut self, data: &Array2<f64>) -> Result<(), EstimatorError> {
        let max_abs = data
            .columns()
            .into_iter()
            .map(|column| {
                let values = observed(column);
                if values.is_empty() {
                    f64::NAN
                } else {
                    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
                }
            })
            .collect();
        self.max_abs = Some(max_abs);
        Ok(())
    }

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        let max_abs = self.max_abs.as_ref().ok_or(EstimatorError::NotFitted {
            estimator: self.name(),
        })?;
        check_features(self.name(), max_abs.len(), data)?;
        let offset = vec![0.0; max_abs.len()];
        let scale: Vec<f64> = max_abs.iter().map(|&m| handle_zero_scale(m)).collect();
        Ok(apply_affine(data, &offset, &scale))
    }
}
