//! The transformer protocol and its generic implementation.
//!
//! Every call runs in two phases. Phase 1 resolves the input columns and
//! applies the missing and existing column policies; it may fail, or skip
//! and return the frame unchanged. Phase 2 runs the kernel on the validated
//! columns and merges its output.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use coltx_common::{column_names, str_shape_diff};
use coltx_model::{Args, ConfigError, Policy};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::kernel::{Kernel, KernelContext};
use crate::observer::{TransformEvent, TransformObserver, default_observer};
use crate::shape::{Resolution, Shape};

/// The fit/transform protocol shared by all transformers.
pub trait BaseTransformer: fmt::Debug + fmt::Display + Send + Sync {
    /// Transformer kind. Two transformers of different kinds are never equal.
    fn kind(&self) -> &str;

    /// Full configuration, used for equality and rendering.
    fn get_args(&self) -> Args;

    /// Fits the transformer to `frame`. Refitting replaces fitted state.
    fn fit(&mut self, frame: &DataFrame) -> Result<()>;

    /// Returns a transformed copy of `frame`.
    fn transform(&self, frame: &DataFrame) -> Result<DataFrame>;

    fn fit_transform(&mut self, frame: &DataFrame) -> Result<DataFrame> {
        self.fit(frame)?;
        self.transform(frame)
    }

    /// Same kind and deep-equal arguments, optionally treating NaNs as equal.
    fn equal(&self, other: &dyn BaseTransformer, equal_nan: bool) -> bool {
        self.kind() == other.kind() && self.get_args().equals(&other.get_args(), equal_nan)
    }
}

/// A transformer made of a [`Shape`] and a [`Kernel`].
pub struct Transformer {
    shape: Shape,
    kernel: Box<dyn Kernel>,
    extra_args: Args,
    observer: Arc<dyn TransformObserver>,
}

impl Transformer {
    pub fn new(shape: Shape, kernel: impl Kernel + 'static) -> Self {
        Self {
            shape,
            kernel: Box::new(kernel),
            extra_args: Args::new(),
            observer: default_observer(),
        }
    }

    #[must_use]
    pub fn with_missing_policy(mut self, policy: Policy) -> Self {
        self.shape = self.shape.with_missing_policy(policy);
        self
    }

    #[must_use]
    pub fn with_exist_policy(mut self, policy: Policy) -> Self {
        self.shape = self.shape.with_exist_policy(policy);
        self
    }

    /// Adds extra keyword arguments, forwarded to the kernel.
    ///
    /// The kernel validates them; a key that shadows a configured argument
    /// is rejected.
    pub fn with_extra_args(mut self, args: Args) -> std::result::Result<Self, ConfigError> {
        let configured = self.configured_args();
        if let Some(key) = args.keys().find(|key| configured.contains_key(key)) {
            return Err(ConfigError::InvalidArgument {
                kind: self.kind().to_string(),
                argument: key.to_string(),
                reason: "conflicts with a configured argument".to_string(),
            });
        }
        let mut merged = self.extra_args.clone();
        merged.extend(args);
        self.kernel.validate_args(&merged)?;
        self.extra_args = merged;
        Ok(self)
    }

    /// Routes skip and warning events to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TransformObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn configured_args(&self) -> Args {
        let mut args = self.shape.args();
        args.extend(self.kernel.params());
        args
    }

    fn skip(&self, method: &'static str, column: String) {
        self.observer.on_event(&TransformEvent::Skipped {
            transformer: self.kind().to_string(),
            method,
            column,
        });
    }
}

impl BaseTransformer for Transformer {
    fn kind(&self) -> &str {
        self.kernel.name()
    }

    fn get_args(&self) -> Args {
        let mut args = self.configured_args();
        args.extend(self.extra_args.clone());
        args
    }

    fn fit(&mut self, frame: &DataFrame) -> Result<()> {
        let span = info_span!("fit", transformer = %self.kind());
        let _guard = span.enter();
        let start = Instant::now();

        let names = column_names(frame);
        let inputs = match self.shape.resolve_inputs(&names, self.observer.as_ref())? {
            Resolution::Skip { column } => {
                self.skip("fit", column);
                return Ok(());
            }
            Resolution::Inputs(inputs) => inputs,
        };
        debug!(columns = ?inputs, "resolved input columns");

        if !self.kernel.is_stateful() {
            self.observer.on_event(&TransformEvent::FitSkipped {
                transformer: self.kind().to_string(),
            });
            return Ok(());
        }
        if inputs.is_empty() && matches!(self.shape, Shape::NToN { .. }) {
            return Ok(());
        }
        let ctx = KernelContext {
            columns: &inputs,
            args: &self.extra_args,
        };
        self.kernel.fit(frame, &ctx)?;
        info!(
            columns = inputs.len(),
            duration_ms = start.elapsed().as_millis(),
            "fit complete"
        );
        Ok(())
    }

    fn transform(&self, frame: &DataFrame) -> Result<DataFrame> {
        let span = info_span!("transform", transformer = %self.kind());
        let _guard = span.enter();
        let start = Instant::now();

        let names = column_names(frame);
        let inputs = match self.shape.resolve_inputs(&names, self.observer.as_ref())? {
            Resolution::Skip { column } => {
                self.skip("transform", column);
                return Ok(frame.clone());
            }
            Resolution::Inputs(inputs) => inputs,
        };
        let outputs = self.shape.resolve_outputs(&inputs);
        debug!(inputs = ?inputs, outputs = ?outputs, "resolved columns");
        self.shape
            .check_outputs(&names, &outputs, self.observer.as_ref())?;

        let out = if inputs.is_empty() && matches!(self.shape, Shape::NToN { .. }) {
            frame.clone()
        } else {
            let ctx = KernelContext {
                columns: &inputs,
                args: &self.extra_args,
            };
            let produced = self.kernel.transform(frame, &ctx)?;
            self.shape
                .merge(self.kind(), frame, produced, &inputs, &outputs)?
        };
        info!("{}", str_shape_diff(frame.shape(), out.shape()));
        debug!(
            duration_ms = start.elapsed().as_millis(),
            "transform complete"
        );
        Ok(out)
    }
}

impl PartialEq for Transformer {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, false)
    }
}

/// Repr form: `Kind(key="value", ...)`.
impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.get_args().to_repr_line())
    }
}

/// Str form: `Kind(key=value, ...)`.
impl fmt::Display for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.get_args().to_str_line())
    }
}
