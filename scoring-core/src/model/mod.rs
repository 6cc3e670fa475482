//! Model Module - Classifier capability and implementations
//!
//! Keeps inference behind one trait so the model can be swapped (JSON
//! logistic regression, ONNX export, test double) without touching the
//! scorer.

pub mod classifier;
pub mod loader;
pub mod logistic;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use classifier::{Classifier, ClassProbabilities, Label};
pub use loader::{load_classifier, LoadedModel, ModelFormat, ModelMetadata};
pub use logistic::{LogisticClassifier, LogisticParams, StandardScaler};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
