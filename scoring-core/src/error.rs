//! Error types for classifier loading and scoring

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a classifier implementation
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The underlying model is not usable (not loaded, runtime gone)
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// The record shape was rejected by the model
    #[error("feature schema rejected: {0}")]
    Schema(String),

    /// Inference ran but failed
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Failure while loading a classifier artifact
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("model not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("feature schema rejected: {0}")]
    Schema(String),

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(String),
}

/// Scoring failure. No partial result is ever returned alongside one.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("classifier returned invalid output: {0}")]
    InvalidOutput(String),
}

impl From<ClassifierError> for ScoreError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Schema(msg) => ScoreError::SchemaMismatch(msg),
            ClassifierError::Unavailable(msg) | ClassifierError::Inference(msg) => {
                ScoreError::ModelUnavailable(msg)
            }
        }
    }
}

impl From<LoadError> for ScoreError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Schema(msg) => ScoreError::SchemaMismatch(msg),
            other => ScoreError::ModelUnavailable(other.to_string()),
        }
    }
}

pub type ScoreResult<T> = Result<T, ScoreError>;
