//! Transformers backed by a fitted [`Estimator`].

use coltx_common::{frame_to_matrix, matrix_to_columns, propagate_nulls};
use coltx_model::{Args, ColumnSpec};
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::Result;
use crate::estimators::Estimator;
use crate::kernel::{Kernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Fits an estimator on the input columns and writes its output.
///
/// The estimator sees nulls as NaN. With `propagate_nulls`, the outputs are
/// null wherever the inputs were null; otherwise they are NaN.
#[derive(Debug)]
pub struct Scaler<E> {
    kind: String,
    estimator: E,
    propagate_nulls: bool,
}

impl<E: Estimator + 'static> Scaler<E> {
    /// Writes the scaled columns to `prefix + column + suffix`.
    pub fn transformer(
        spec: ColumnSpec,
        estimator: E,
        prefix: &str,
        suffix: &str,
        propagate_nulls: bool,
    ) -> Transformer {
        let kernel = Self {
            kind: estimator.name().to_string(),
            estimator,
            propagate_nulls,
        };
        Transformer::new(Shape::n_to_n(spec, prefix, suffix), kernel)
    }

    /// Replaces the input columns by their scaled values.
    pub fn inplace(spec: ColumnSpec, estimator: E, propagate_nulls: bool) -> Transformer {
        let kernel = Self {
            kind: format!("Inplace{}", estimator.name()),
            estimator,
            propagate_nulls,
        };
        Transformer::new(Shape::n_to_n_inplace(spec), kernel)
    }
}

impl<E: Estimator> Kernel for Scaler<E> {
    fn name(&self) -> &str {
        &self.kind
    }

    fn params(&self) -> Args {
        let mut params = self.estimator.params();
        params.insert("propagate_nulls", self.propagate_nulls);
        params
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn fit(&mut self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<()> {
        info!(
            "Fitting {} on {} columns ...",
            self.estimator.name(),
            ctx.columns.len()
        );
        let matrix = frame_to_matrix(frame, ctx.columns)?;
        self.estimator.fit(&matrix)?;
        Ok(())
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        info!(
            "Applying {} to {} columns ...",
            self.estimator.name(),
            ctx.columns.len()
        );
        let matrix = frame_to_matrix(frame, ctx.columns)?;
        let scaled = self.estimator.transform(&matrix)?;
        let out = DataFrame::new(matrix_to_columns(&scaled, ctx.columns))?;
        if self.propagate_nulls {
            Ok(propagate_nulls(&out, frame)?)
        } else {
            Ok(out)
        }
    }
}
