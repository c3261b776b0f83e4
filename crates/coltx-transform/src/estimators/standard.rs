//! Standardization to zero mean and unit variance.

use coltx_model::Args;
use ndarray::Array2;

use super::{
    Estimator, EstimatorError, apply_affine, check_features, handle_zero_scale, observed,
};

#[derive(Debug, Clone, PartialEq)]
struct StandardState {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Removes the mean and scales each feature to unit variance.
///
/// The variance is the population variance of the non-NaN entries.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    with_mean: bool,
    with_std: bool,
    state: Option<StandardState>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl StandardScaler {
    pub fn new(with_mean: bool, with_std: bool) -> Self {
        Self {
            with_mean,
            with_std,
            state: None,
        }
    }

    /// Per-feature means learned during fit.
    pub fn mean(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.mean.as_slice())
    }

    /// Per-feature scales learned during fit.
    pub fn scale(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.scale.as_slice())
    }
}

impl Estimator for StandardScaler {
    fn name(&self) -> &'static str {
        "StandardScaler"
    }

    fn params(&self) -> Args {
        Args::new()
            .with("with_mean", self.with_mean)
            .with("with_std", self.with_std)
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    fn fit(&mut self, data: &Array2<f64>) -> Result<(), EstimatorError> {
        let mut mean = Vec::with_capacity(data.ncols());
        let mut scale = Vec::with_capacity(data.ncols());
        for column in data.columns() {
            let values = observed(column);
            let n = values.len() as f64;
            let mu = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / n;
            mean.push(if self.with_mean { mu } else { 0.0 });
            scale.push(if self.with_std {
                handle_zero_scale(var.sqrt())
            } else {
                1.0
            });
        }
        self.state = Some(StandardState { mean, scale });
        Ok(())
    }

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        let state = self.state.as_ref().ok_or(EstimatorError::NotFitted {
            estimator: self.name(),
        })?;
        check_features(self.name(), state.mean.len(), data)?;
        Ok(apply_affine(data, &state.mean, &state.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardizes_columns() {
        let data = array![[1.0, 10.0], [3.0, 10.0]];
        let mut scaler = StandardScaler::default();
        scaler.fit(&data).unwrap();
        assert_eq!(scaler.mean(), Some([2.0, 10.0].as_slice()));
        assert_eq!(scaler.scale(), Some([1.0, 1.0].as_slice()));
        let out = scaler.transform(&data).unwrap();
        assert_eq!(out, array![[-1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn ignores_nan_during_fit() {
        let data = array![[1.0], [f64::NAN], [3.0]];
        let mut scaler = StandardScaler::default();
        scaler.fit(&data).unwrap();
        let out = scaler.transform(&data).unwrap();
        assert_eq!(out[[0, 0]], -1.0);
        assert!(out[[1, 0]].is_nan());
        assert_eq!(out[[2, 0]], 1.0);
    }

    #[test]
    fn without_mean_only_scales() {
        let data = array![[2.0], [4.0]];
        let mut scaler = StandardScaler::new(false, true);
        scaler.fit(&data).unwrap();
        assert_eq!(scaler.transform(&data).unwrap(), array![[2.0], [4.0]]);
    }

    #[test]
    fn transform_before_fit_fails() {
        let scaler = StandardScaler::default();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert_eq!(
            err,
            EstimatorError::NotFitted {
                estimator: "StandardScaler"
            }
        );
    }

    #[test]
    fn feature_count_must_match() {
        let mut scaler = StandardScaler::default();
        scaler.fit(&array![[1.0, 2.0]]).unwrap();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "X has 1 features, but StandardScaler is expecting 2 features as input"
        );
    }
}
