//! JSON pipeline configuration.
//!
//! A pipeline document lists transformer entries. Each entry names its kind
//! under `"type"`; the other keys are the arguments reported by `get_args`:
//!
//! ```json
//! {
//!   "transformers": [
//!     {"type": "Cast", "columns": ["a", "b"], "dtype": "float64", "suffix": "_f"},
//!     {"type": "SumHorizontal", "columns": ["a_f", "b_f"], "out_col": "total"}
//!   ]
//! }
//! ```

use std::path::Path;

use coltx_model::{Args, ConfigError};
use serde::{Deserialize, Serialize};

use crate::registry;
use crate::sequential::Sequential;
use crate::transformer::BaseTransformer;

/// One transformer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub args: Args,
}

impl TransformerConfig {
    pub fn new(kind: impl Into<String>, args: Args) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }

    /// Builds the transformer, validating every argument.
    pub fn build(&self) -> Result<Box<dyn BaseTransformer>, ConfigError> {
        registry::build(self)
    }
}

/// A list of transformers applied in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub transformers: Vec<TransformerConfig>,
}

/// Errors raised while loading a pipeline document.
#[derive(Debug, thiserror::Error)]
pub enum PipelineLoadError {
    #[error("failed to read pipeline file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pipeline document: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> Result<Self, PipelineLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PipelineLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn build(&self) -> Result<Sequential, ConfigError> {
        let transformers = self
            .transformers
            .iter()
            .map(TransformerConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sequential::new(transformers))
    }
}
