//! Scaling robust to outliers, based on the median and a quantile range.

use coltx_model::{Args, ConfigError};
use ndarray::Array2;

use super::{
    Estimator, EstimatorError, apply_affine, check_features, handle_zero_scale, observed,
};

#[derive(Debug, Clone, PartialEq)]
struct RobustState {
    center: Vec<f64>,
    scale: Vec<f64>,
}

/// Removes the median and scales by the interquantile range.
#[derive(Debug, Clone, PartialEq)]
pub struct RobustScaler {
    with_centering: bool,
    with_scaling: bool,
    quantile_range: (f64, f64),
    state: Option<RobustState>,
}

impl Default for RobustScaler {
    fn default() -> Self {
        Self {
            with_centering: true,
            with_scaling: true,
            quantile_range: (25.0, 75.0),
            state: None,
        }
    }
}

/// Linear-interpolated percentile of sorted values, `q` in `[0, 100]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = q / 100.0 * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

impl RobustScaler {
    pub fn new(
        with_centering: bool,
        with_scaling: bool,
        quantile_range: (f64, f64),
    ) -> Result<Self, ConfigError> {
        let (low, high) = quantile_range;
        let valid = 0.0 <= low && low <= high && high <= 100.0;
        if !valid {
            return Err(ConfigError::InvalidArgument {
                kind: "RobustScaler".to_string(),
                argument: "quantile_range".to_string(),
                reason: format!("invalid quantile range: ({low:?}, {high:?})"),
            });
        }
        Ok(Self {
            with_centering,
            with_scaling,
            quantile_range,
            state: None,
        })
    }

    pub fn center(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.center.as_slice())
    }

    pub fn scale(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.scale.as_slice())
    }
}

impl Estimator for RobustScaler {
    fn name(&self) -> &'static str {
        "RobustScaler"
    }

    fn params(&self) -> Args {
        Args::new()
            .with("with_centering", self.with_centering)
            .with("with_scaling", self.with_scaling)
            .with(
                "quantile_range",
                vec![self.quantile_range.0, self.quantile_range.1],
            )
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    fn fit(&mut self, data: &Array2<f64>) -> Result<(), EstimatorError> {
        let mut center = Vec::with_capacity(data.ncols());
        let mut scale = Vec::with_capacity(data.ncols());
        for column in data.columns() {
            let mut values = observed(column);
            values.sort_by(f64::total_cmp);
            center.push(if self.with_centering {
                percentile(&values, 50.0)
            } else {
                0.0
            });
            scale.push(if self.with_scaling {
                let (low, high) = self.quantile_range;
                handle_zero_scale(percentile(&values, high) - percentile(&values, low))
            } else {
                1.0
            });
        }
        self.state = Some(RobustState { center, scale });
        Ok(())
    }

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        let state = self.state.as_ref().ok_or(EstimatorError::NotFitted {
            estimator: self.name(),
        })?;
        check_features(self.name(), state.center.len(), data)?;
        Ok(apply_affine(data, &state.center, &state.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 50.0), 3.0);
        assert_eq!(percentile(&values, 25.0), 2.0);
        assert_eq!(percentile(&[1.0, 2.0], 50.0), 1.5);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn centers_on_median() {
        let data = array![[1.0], [2.0], [3.0], [4.0], [100.0]];
        let mut scaler = RobustScaler::default();
        scaler.fit(&data).unwrap();
        assert_eq!(scaler.center(), Some([3.0].as_slice()));
        assert_eq!(scaler.scale(), Some([2.0].as_slice()));
        let out = scaler.transform(&data).unwrap();
        assert_eq!(out[[0, 0]], -1.0);
        assert_eq!(out[[4, 0]], 48.5);
    }

    #[test]
    fn invalid_quantile_range() {
        assert!(RobustScaler::new(true, true, (80.0, 20.0)).is_err());
        assert!(RobustScaler::new(true, true, (0.0, 120.0)).is_err());
    }
}
