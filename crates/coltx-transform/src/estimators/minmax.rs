//! Scaling to a fixed feature range.

use coltx_model::{Args, ConfigError};
use ndarray::Array2;

use super::{
    Estimator, EstimatorError, apply_affine, check_features, handle_zero_scale, observed,
};

#[derive(Debug, Clone, PartialEq)]
struct MinMaxState {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
}

/// Scales each feature to `feature_range`, `(0.0, 1.0)` by default.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    feature_range: (f64, f64),
    state: Option<MinMaxState>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self {
            feature_range: (0.0, 1.0),
            state: None,
        }
    }
}

impl MinMaxScaler {
    /// Create a scaler for `(min, max)`; `min` must be smaller than `max`.
    pub fn new(feature_range: (f64, f64)) -> Result<Self, ConfigError> {
        let (low, high) = feature_range;
        let ordered = low < high;
        if !ordered {
            return Err(ConfigError::InvalidArgument {
                kind: "MinMaxScaler".to_string(),
                argument: "feature_range".to_string(),
                reason: format!(
                    "minimum of desired feature range must be smaller than maximum, \
                     got ({low:?}, {high:?})"
                ),
            });
        }
        Ok(Self {
            feature_range,
            state: None,
        })
    }

    pub fn data_min(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.data_min.as_slice())
    }

    pub fn data_max(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.data_max.as_slice())
    }
}

impl Estimator for MinMaxScaler {
    fn name(&self) -> &'static str {
        "MinMaxScaler"
    }

    fn params(&self) -> Args {
        Args::new().with(
            "feature_range",
            vec![self.feature_range.0, self.feature_range.1],
        )
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    fn fit(&mut self, data: &Array2<f64>) -> Result<(), EstimatorError> {
        let mut data_min = Vec::with_capacity(data.ncols());
        let mut data_max = Vec::with_capacity(data.ncols());
        for column in data.columns() {
            let values = observed(column);
            let (min, max) = if values.is_empty() {
                (f64::NAN, f64::NAN)
            } else {
                values
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    })
            };
            data_min.push(min);
            data_max.push(max);
        }
        self.state = Some(MinMaxState { data_min, data_max });
        Ok(())
    }

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        let state = self.state.as_ref().ok_or(EstimatorError::NotFitted {
            estimator: self.name(),
        })?;
        check_features(self.name(), state.data_min.len(), data)?;
        let (low, high) = self.feature_range;
        // x' = (x - data_min) / range * (high - low) + low
        let (offset, scale): (Vec<f64>, Vec<f64>) = state
            .data_min
            .iter()
            .zip(&state.data_max)
            .map(|(&min, &max)| {
                let factor = handle_zero_scale(max - min) / (high - low);
                (min - low * factor, factor)
            })
            .unzip();
        Ok(apply_affine(data, &offset, &scale))
    }
}
