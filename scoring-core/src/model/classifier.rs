//! Classifier capability
//!
//! Any model that can label a feature record and give per-class
//! probabilities plugs in here: the shipped logistic regression, an ONNX
//! export, or a test double.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::PROBABILITY_SUM_TOLERANCE;
use crate::error::{ClassifierError, ScoreError};
use crate::features::FeatureRecord;

// ============================================================================
// LABEL
// ============================================================================

/// Binary outcome. Serialized as its class index (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    /// Class 0: no signs of diabetic retinopathy
    NoSigns,
    /// Class 1: diabetic retinopathy present
    Present,
}

impl Label {
    /// Map a model's class index onto a label
    pub fn from_class(class: i64) -> Result<Self, ClassifierError> {
        match class {
            0 => Ok(Label::NoSigns),
            1 => Ok(Label::Present),
            other => Err(ClassifierError::Schema(format!(
                "unknown class label {}, expected 0 or 1",
                other
            ))),
        }
    }

    pub fn class_index(self) -> u8 {
        match self {
            Label::NoSigns => 0,
            Label::Present => 1,
        }
    }

    /// Short text used in the downloadable report
    pub fn report_text(self) -> &'static str {
        match self {
            Label::NoSigns => "No DR",
            Label::Present => "DR Present",
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.class_index()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Label::from_class(i64::from(value)).map_err(|e| e.to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_text())
    }
}

// ============================================================================
// CLASS PROBABILITIES
// ============================================================================

/// Probability mass per class, as returned by `predict_probability`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub no_signs: f64,
    pub present: f64,
}

impl ClassProbabilities {
    pub fn new(no_signs: f64, present: f64) -> Self {
        Self { no_signs, present }
    }

    /// From a `[p(class 0), p(class 1)]` row
    pub fn from_row(row: [f64; 2]) -> Self {
        Self::new(row[0], row[1])
    }

    /// Probability mass assigned to `label`
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::NoSigns => self.no_signs,
            Label::Present => self.present,
        }
    }

    /// Every entry finite and in [0, 1], summing to one
    pub fn validate(&self) -> Result<(), ScoreError> {
        for (label, p) in [(Label::NoSigns, self.no_signs), (Label::Present, self.present)] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(ScoreError::InvalidOutput(format!(
                    "probability for class {} is {}",
                    label.class_index(),
                    p
                )));
            }
        }

        let sum = self.no_signs + self.present;
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(ScoreError::InvalidOutput(format!(
                "class probabilities sum to {}",
                sum
            )));
        }

        Ok(())
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Two-operation scoring contract over a fixed-layout feature record.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait Classifier: Send + Sync {
    /// Column names the model was trained on, in training order
    fn feature_names(&self) -> &[String];

    /// Predicted class for the record, by the model's own decision rule
    fn predict(&self, record: &FeatureRecord) -> Result<Label, ClassifierError>;

    /// Probability of each class for the record
    fn predict_probability(
        &self,
        record: &FeatureRecord,
    ) -> Result<ClassProbabilities, ClassifierError>;

    /// Short model family name, for status output
    fn kind(&self) -> &str {
        "classifier"
    }
}
