//! Scorer - derive features, run the classifier, pick the confidence
//!
//! One call is one complete, synchronous scoring of a submission:
//!
//! ```text
//! RawVitals ─► DerivedFeatures ─► FeatureRecord ─► schema check
//!                                                      │
//!        PredictionResult ◄─ probabilities[label] ◄─ predict + predict_probability
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ScoreResult;
use crate::features::{validate_schema, FeatureRecord};
use crate::model::{Classifier, Label};
use crate::vitals::{DerivedFeatures, RawVitals};


/// Outcome of one scoring call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    /// Probability the classifier assigned to `label`
    pub confidence: f64,
    pub derived: DerivedFeatures,
}

impl PredictionResult {
    /// Sentence shown on the result page
    pub fn summary(&self) -> String {
        match self.label {
            Label::Present => format!(
                "The model predicts presence of Diabetic Retinopathy (Confidence: {:.2})",
                self.confidence
            ),
            Label::NoSigns => format!(
                "The model predicts no signs of Diabetic Retinopathy (Confidence: {:.2})",
                self.confidence
            ),
        }
    }
}

/// Score one submission against `classifier`.
///
/// Inputs are trusted; range checks happen where the values are collected.
/// The label comes from the classifier's own decision rule and the
/// confidence is always the probability of that label.
pub fn score(raw: &RawVitals, classifier: &dyn Classifier) -> ScoreResult<PredictionResult> {
    let derived = DerivedFeatures::from_vitals(raw);
    let record = FeatureRecord::from_vitals(raw, &derived);

    validate_schema(classifier.feature_names())?;

    let label = classifier.predict(&record)?;
    let probabilities = classifier.predict_probability(&record)?;
    probabilities.validate()?;

    let confidence = probabilities.get(label);

    log::debug!(
        "Scored record (pp={:.2}, map={:.2}): label={}, confidence={:.4}",
        derived.pulse_pressure,
        derived.mean_arterial_pressure,
        label.class_index(),
        confidence
    );

    Ok(PredictionResult {
        label,
        confidence,
        derived,
    })
}

/// Scorer bound to one classifier, injected at construction
#[derive(Clone)]
pub struct Scorer {
    classifier: Arc<dyn Classifier>,
}

impl Scorer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn score(&self, raw: &RawVitals) -> ScoreResult<PredictionResult> {
        score(raw, self.classifier.as_ref())
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("classifier", &self.classifier.kind())
            .finish()
    }
}
