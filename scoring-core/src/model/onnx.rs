//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs a scikit-learn classifier exported to ONNX with `zipmap=False`:
//! - input: float32 tensor `[1, FEATURE_COUNT]` in layout order
//! - output 0: int64 label tensor `[1]`
//! - output 1: float32 probability tensor `[1, 2]`

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{Classifier, ClassProbabilities, Label};
use crate::error::{ClassifierError, LoadError};
use crate::features::{FeatureRecord, FEATURE_COUNT, FEATURE_LAYOUT};

pub const MODEL_TYPE: &str = "onnx";

/// Raw outputs of one session run
struct RunOutput {
    label: i64,
    probabilities: [f64; 2],
}

/// ONNX-backed classifier.
///
/// `Session::run` needs exclusive access, so runs are serialized behind a
/// mutex; the session itself is loaded once and never replaced.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    label_output: String,
    probability_output: String,
    feature_names: Vec<String>,
}

impl OnnxClassifier {
    /// Load ONNX model from bytes and probe it with one record
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, LoadError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| LoadError::Onnx(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| LoadError::Onnx(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| LoadError::Onnx(format!("Load from memory error: {}", e)))?;

        Self::from_session(session)
    }

    fn from_session(session: Session) -> Result<Self, LoadError> {
        if session.inputs.len() != 1 {
            return Err(LoadError::Schema(format!(
                "expected a single input tensor, model has {}",
                session.inputs.len()
            )));
        }
        if session.outputs.len() < 2 {
            return Err(LoadError::Schema(format!(
                "expected label and probability outputs, model has {}",
                session.outputs.len()
            )));
        }

        let label_output = session.outputs[0].name.clone();
        let probability_output = session.outputs[1].name.clone();

        let classifier = Self {
            session: Mutex::new(session),
            label_output,
            probability_output,
            // The graph carries no column names; it is exported from the
            // training frame in layout order.
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        };

        // A model trained on another feature count fails here, not on the
        // first request.
        classifier
            .run(&FeatureRecord::new())
            .map_err(|e| LoadError::Schema(e.to_string()))?;

        log::info!("ONNX model loaded successfully");
        Ok(classifier)
    }

    fn run(&self, record: &FeatureRecord) -> Result<RunOutput, ClassifierError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), record.to_f32_vec())
            .map_err(|e| ClassifierError::Schema(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| runtime_error("Tensor error", e))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| runtime_error("Inference failed", e))?;

        let label_value = outputs
            .get(&self.label_output)
            .ok_or_else(|| runtime_error("Missing output", &self.label_output))?;
        let (_, labels) = label_value
            .try_extract_tensor::<i64>()
            .map_err(|e| runtime_error("Label extract error", e))?;
        let label = labels
            .first()
            .copied()
            .ok_or_else(|| runtime_error("Empty output", &self.label_output))?;

        let probability_value = outputs
            .get(&self.probability_output)
            .ok_or_else(|| runtime_error("Missing output", &self.probability_output))?;
        let (_, probs) = probability_value
            .try_extract_tensor::<f32>()
            .map_err(|e| runtime_error("Probability extract error (zipmap disabled?)", e))?;
        if probs.len() != 2 {
            return Err(ClassifierError::Schema(format!(
                "expected 2 class probabilities, got {}",
                probs.len()
            )));
        }

        Ok(RunOutput {
            label,
            probabilities: [f64::from(probs[0]), f64::from(probs[1])],
        })
    }
}

/// A fault while running the session, as opposed to a shape the model rejects
fn runtime_error(context: &str, detail: impl std::fmt::Display) -> ClassifierError {
    ClassifierError::Inference(format!("{}: {}", context, detail))
}

impl Classifier for OnnxClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Label, ClassifierError> {
        let output = self.run(record)?;
        Label::from_class(output.label)
    }

    fn predict_probability(
        &self,
        record: &FeatureRecord,
    ) -> Result<ClassProbabilities, ClassifierError> {
        let output = self.run(record)?;
        Ok(ClassProbabilities::from_row(output.probabilities))
    }

    fn kind(&self) -> &str {
        MODEL_TYPE
    }
}
