//! Applying several transformers in order.

use std::fmt;
use std::time::Instant;

use coltx_common::str_shape_diff;
use coltx_model::{ArgValue, Args};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::error::Result;
use crate::transformer::BaseTransformer;

/// Applies transformers one after another.
///
/// Fitting runs `fit_transform` on each child so that every transformer is
/// fitted on the output of the previous ones.
#[derive(Default)]
pub struct Sequential {
    transformers: Vec<Box<dyn BaseTransformer>>,
}

impl Sequential {
    pub fn new(transformers: Vec<Box<dyn BaseTransformer>>) -> Self {
        Self { transformers }
    }

    #[must_use]
    pub fn with(mut self, transformer: impl BaseTransformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn push(&mut self, transformer: Box<dyn BaseTransformer>) {
        self.transformers.push(transformer);
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn BaseTransformer> {
        self.transformers.iter().map(AsRef::as_ref)
    }

    fn write_children(
        &self,
        f: &mut fmt::Formatter<'_>,
        render: impl Fn(&dyn BaseTransformer) -> String,
    ) -> fmt::Result {
        if self.transformers.is_empty() {
            return f.write_str("Sequential()");
        }
        writeln!(f, "Sequential(")?;
        for (idx, transformer) in self.iter().enumerate() {
            writeln!(f, "  ({idx}): {}", render(transformer))?;
        }
        f.write_str(")")
    }
}

impl BaseTransformer for Sequential {
    fn kind(&self) -> &str {
        "Sequential"
    }

    /// Each child is listed as a map of its `type` followed by its own
    /// arguments, so equality compares children argument by argument.
    fn get_args(&self) -> Args {
        let children: Vec<ArgValue> = self
            .iter()
            .map(|transformer| {
                let mut args = Args::new().with("type", transformer.kind());
                args.extend(transformer.get_args());
                ArgValue::from(args)
            })
            .collect();
        Args::new().with("transformers", children)
    }

    fn fit(&mut self, frame: &DataFrame) -> Result<()> {
        self.fit_transform(frame).map(|_| ())
    }

    fn transform(&self, frame: &DataFrame) -> Result<DataFrame> {
        let span = info_span!("transform", transformer = "Sequential");
        let _guard = span.enter();
        let start = Instant::now();
        let mut out = frame.clone();
        for transformer in &self.transformers {
            out = transformer.transform(&out)?;
        }
        info!(
            steps = self.transformers.len(),
            duration_ms = start.elapsed().as_millis(),
            "{}",
            str_shape_diff(frame.shape(), out.shape())
        );
        Ok(out)
    }

    fn fit_transform(&mut self, frame: &DataFrame) -> Result<DataFrame> {
        let span = info_span!("fit_transform", transformer = "Sequential");
        let _guard = span.enter();
        let start = Instant::now();
        let mut out = frame.clone();
        for transformer in &mut self.transformers {
            out = transformer.fit_transform(&out)?;
        }
        info!(
            steps = self.transformers.len(),
            duration_ms = start.elapsed().as_millis(),
            "{}",
            str_shape_diff(frame.shape(), out.shape())
        );
        Ok(out)
    }
}

/// Lists the children in repr form.
impl fmt::Debug for Sequential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_children(f, |transformer| format!("{transformer:?}"))
    }
}

/// Lists the children in str form.
impl fmt::Display for Sequential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_children(f, |transformer| transformer.to_string())
    }
}

impl PartialEq for Sequential {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, false)
    }
}
