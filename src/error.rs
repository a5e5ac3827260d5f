//! Crate-wide error types

use std::path::PathBuf;
use thiserror::Error;

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised during model evaluation
#[derive(Debug, Error)]
pub enum Error {
    /// Test dataset missing or unreadable
    #[error("Failed to load dataset from {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    /// Dataset content is not usable tabular data
    #[error("Invalid dataset: {0}")]
    InvalidData(String),

    /// Model file missing, corrupt, or in an unsupported format
    #[error("Failed to load model from {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    /// Target column absent from the dataset
    #[error("Target column '{column}' not found in dataset (available columns: {available:?})")]
    Schema {
        column: String,
        available: Vec<String>,
    },

    /// Estimator rejected the feature matrix
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Metric inputs are empty, mismatched, or non-finite
    #[error("Metric computation failed: {0}")]
    MetricComputation(String),

    /// Tracking backend call failed
    #[error("Tracking error: {0}")]
    Tracking(String),

    /// Local file could not be written
    #[error("Failed to write {path}: {message}")]
    Persistence { path: PathBuf, message: String },

    /// Configuration file missing, unparsable, or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
