//! The computation a concrete transformer supplies.
//!
//! A [`Kernel`] only ever sees columns that already passed resolution and
//! policy checks. It returns the derived data; naming and merging the
//! output into the frame is done by the [`Transformer`](crate::Transformer).

use std::fmt;

use coltx_model::{Args, ConfigError};
use polars::prelude::DataFrame;

use crate::error::Result;

/// What a kernel receives besides the frame.
#[derive(Debug, Clone, Copy)]
pub struct KernelContext<'a> {
    /// Validated input columns, in resolution order.
    pub columns: &'a [String],
    /// Extra keyword arguments configured on the transformer.
    pub args: &'a Args,
}

/// The fit/transform hooks of a concrete transformer.
///
/// Output contract of [`Kernel::transform`] per shape:
/// - one-to-one, two-to-one, n-to-one: a frame with exactly one column;
/// - n-to-n: one column per input, named after the input;
/// - n-to-none: the whole resulting frame.
pub trait Kernel: Send + Sync + fmt::Debug {
    /// Transformer kind, used for equality and rendering.
    fn name(&self) -> &str;

    /// Kernel parameters rendered after the shape arguments.
    fn params(&self) -> Args {
        Args::new()
    }

    /// Validates extra keyword arguments at construction time.
    fn validate_args(&self, _args: &Args) -> std::result::Result<(), ConfigError> {
        Ok(())
    }

    /// Whether [`Kernel::fit`] learns anything from the data.
    fn is_stateful(&self) -> bool {
        false
    }

    fn fit(&mut self, _frame: &DataFrame, _ctx: &KernelContext<'_>) -> Result<()> {
        Ok(())
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame>;
}

type TransformFn = dyn Fn(&DataFrame, &KernelContext<'_>) -> Result<DataFrame> + Send + Sync;
type FitFn = dyn FnMut(&DataFrame, &KernelContext<'_>) -> Result<()> + Send + Sync;

/// A kernel built from closures.
///
/// ```
/// use coltx_transform::{FnKernel, Kernel};
/// use polars::prelude::*;
///
/// let kernel = FnKernel::new("Identity", |frame: &DataFrame, _ctx: &coltx_transform::KernelContext<'_>| {
///     Ok(frame.clone())
/// });
/// assert_eq!(kernel.name(), "Identity");
/// assert!(!kernel.is_stateful());
/// ```
pub struct FnKernel {
    name: String,
    params: Args,
    transform: Box<TransformFn>,
    fit: Option<Box<FitFn>>,
}

impl FnKernel {
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&DataFrame, &KernelContext<'_>) -> Result<DataFrame> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: Args::new(),
            transform: Box::new(transform),
            fit: None,
        }
    }

    /// Adds a fit hook; the kernel becomes stateful.
    #[must_use]
    pub fn with_fit<F>(mut self, fit: F) -> Self
    where
        F: FnMut(&DataFrame, &KernelContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.fit = Some(Box::new(fit));
        self
    }

    /// Sets the parameters reported by [`Kernel::params`].
    #[must_use]
    pub fn with_params(mut self, params: Args) -> Self {
        self.params = params;
        self
    }
}

impl fmt::Debug for FnKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKernel")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("stateful", &self.fit.is_some())
            .finish_non_exhaustive()
    }
}

impl Kernel for FnKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> Args {
        self.params.clone()
    }

    fn is_stateful(&self) -> bool {
        self.fit.is_some()
    }

    fn fit(&mut self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<()> {
        match self.fit.as_mut() {
            Some(fit) => fit(frame, ctx),
            None => Ok(()),
        }
    }

    fn transform(&self, frame: &DataFrame, ctx: &KernelContext<'_>) -> Result<DataFrame> {
        (self.transform)(frame, ctx)
    }
}
