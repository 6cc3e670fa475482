//! Model Loader
//!
//! Reads a classifier artifact once at startup and returns it behind an
//! `Arc` together with metadata for status reporting.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::Classifier;
use super::logistic::LogisticClassifier;
use crate::error::LoadError;
use crate::features::validate_schema;

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub version: Option<String>,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    /// SHA-256 of the artifact bytes, hex encoded
    pub checksum: String,
    pub size_bytes: u64,
    /// Whether the model's schema matches the feature layout
    pub schema_compatible: bool,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// A loaded classifier plus what we know about it
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub metadata: ModelMetadata,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Artifact formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Onnx,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(ModelFormat::Json),
            Some("onnx") => Ok(ModelFormat::Onnx),
            other => Err(LoadError::UnsupportedFormat(format!(
                "file extension {:?} (expected .json or .onnx)",
                other.unwrap_or("")
            ))),
        }
    }
}

/// SHA-256 checksum of the artifact bytes
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load classifier artifact from file, picking the implementation by extension
pub fn load_classifier(model_path: impl AsRef<Path>) -> Result<LoadedModel, LoadError> {
    let path = model_path.as_ref();
    log::info!("Loading classifier from: {}", path.display());

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let format = ModelFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    let digest = checksum(&bytes);

    let (classifier, version): (Arc<dyn Classifier>, Option<String>) = match format {
        ModelFormat::Json => {
            let json = std::str::from_utf8(&bytes)
                .map_err(|e| LoadError::Invalid(format!("artifact is not UTF-8: {}", e)))?;
            let model = LogisticClassifier::from_json(json)?;
            let version = model.params().version.clone();
            (Arc::new(model), version)
        }
        ModelFormat::Onnx => (load_onnx(&bytes)?, None),
    };

    let feature_names = classifier.feature_names().to_vec();
    let schema_compatible = match validate_schema(&feature_names) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Loaded classifier will reject every record: {}", e);
            false
        }
    };

    let metadata = ModelMetadata {
        model_path: path.display().to_string(),
        model_type: classifier.kind().to_string(),
        version,
        feature_count: feature_names.len(),
        feature_names,
        checksum: digest,
        size_bytes: bytes.len() as u64,
        schema_compatible,
        loaded_at: chrono::Utc::now(),
    };

    log::info!(
        "Classifier loaded: type={}, features={}, sha256={}",
        metadata.model_type,
        metadata.feature_count,
        metadata.checksum
    );

    Ok(LoadedModel {
        classifier,
        metadata,
    })
}

#[cfg(feature = "onnx")]
fn load_onnx(bytes: &[u8]) -> Result<Arc<dyn Classifier>, LoadError> {
    Ok(Arc::new(super::onnx::OnnxClassifier::from_bytes(bytes)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_bytes: &[u8]) -> Result<Arc<dyn Classifier>, LoadError> {
    Err(LoadError::UnsupportedFormat(
        "ONNX artifact, but this build lacks the `onnx` feature".to_string(),
    ))
}
