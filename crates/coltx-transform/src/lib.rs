//! Column transformers over Polars DataFrames.
//!
//! This crate provides the transformer protocol and its building blocks:
//!
//! - **resolver**: which configured columns exist in a frame
//! - **policy**: raise, warn or ignore on missing inputs and existing outputs
//! - **shape**: the five input/output column shapes
//! - **kernel**: the per-kind computation run on validated columns
//! - **transformer**: the fit/transform protocol and its generic implementation
//! - **transformers**: concrete kinds (casts, copies, scalers, ...)
//! - **sequential**: transformers applied in order
//! - **config**: JSON pipeline documents and the kind registry

pub mod config;
pub mod error;
pub mod estimators;
pub mod kernel;
pub mod observer;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod sequential;
pub mod shape;
pub mod transformer;
pub mod transformers;

pub use config::{PipelineConfig, PipelineLoadError, TransformerConfig};
pub use error::{Result, TransformError, TransformWarning};
pub use estimators::{Estimator, EstimatorError};
pub use kernel::{FnKernel, Kernel, KernelContext};
pub use observer::{RecordingObserver, TracingObserver, TransformEvent, TransformObserver};
pub use policy::{check_existing_columns, check_missing_columns};
pub use registry::{KindInfo, kinds};
pub use resolver::{find_columns, find_common_columns, find_missing_columns};
pub use sequential::Sequential;
pub use shape::{NToNOutput, Resolution, Shape};
pub use transformer::{BaseTransformer, Transformer};
