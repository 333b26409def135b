//! Utility functions for a text-classification notebook workflow.
//!
//! Two independent helpers: [`dataset::fetch_and_unpack`] downloads and
//! extracts a zip-archived dataset under a project root, and
//! [`predict::predict`] wraps a trained classifier's inference call with
//! tokenization, padding, and output labeling.

/// Dataset download and extraction.
pub mod dataset;
/// Crate-wide error type.
pub mod error;
/// Classifier inference wrapper.
pub mod predict;

mod http_client;

pub use dataset::{DatasetLayout, fetch_and_unpack, normalize_dataset_name};
pub use error::Error;
pub use predict::{
    Classifier, DEFAULT_MAX_SEQUENCE_LENGTH, LabeledScore, PredictOptions, Tokenizer,
    pad_sequence, predict,
};
