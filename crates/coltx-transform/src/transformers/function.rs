use coltx_model::{Args, ColumnSpec};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::kernel::{FnKernel, KernelContext};
use crate::shape::Shape;
use crate::transformer::Transformer;

/// Applies a closure to the frame.
///
/// `label` names the closure in `get_args`, so two functions compare equal
/// when their labels and column specs match.
///
/// ```
/// use coltx_model::ColumnSpec;
/// use coltx_transform::BaseTransformer;
/// use coltx_transform::transformers::Function;
/// use polars::prelude::*;
///
/// let t = Function::transformer("head", ColumnSpec::all(), |frame: &DataFrame, _: &[String]| {
///     Ok(frame.head(Some(1)))
/// });
/// assert_eq!(t.kind(), "Function");
/// ```
pub struct Function;

impl Function {
    pub fn transformer<F>(label: &str, spec: ColumnSpec, func: F) -> Transformer
    where
        F: Fn(&DataFrame, &[String]) -> Result<DataFrame> + Send + Sync + 'static,
    {
        let kernel = FnKernel::new("Function", move |frame: &DataFrame, ctx: &KernelContext<'_>| {
            func(frame, ctx.columns)
        })
        .with_params(Args::new().with("func", label));
        Transformer::new(Shape::n_to_none(spec), kernel)
    }
}
