//! Logistic Regression Classifier
//!
//! Pure-Rust evaluation of a trained binary logistic regression whose
//! parameters ship as a JSON artifact:
//!
//! ```json
//! {
//!   "model_type": "logistic_regression",
//!   "version": "1.0.0",
//!   "feature_names": ["age", "systolic_bp", "..."],
//!   "coefficients": [0.04, 0.01, "..."],
//!   "intercept": -3.2,
//!   "scaler": { "mean": ["..."], "scale": ["..."] },
//!   "decision_threshold": 0.5
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, ClassProbabilities, Label};
use crate::constants::DEFAULT_DECISION_THRESHOLD;
use crate::error::{ClassifierError, LoadError};
use crate::features::FeatureRecord;

pub const MODEL_TYPE: &str = "logistic_regression";

/// Standardisation applied before the linear term: (x - mean) / scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Serialized model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    #[serde(default = "default_model_type")]
    pub model_type: String,

    #[serde(default)]
    pub version: Option<String>,

    pub feature_names: Vec<String>,

    pub coefficients: Vec<f64>,

    pub intercept: f64,

    #[serde(default)]
    pub scaler: Option<StandardScaler>,

    /// p(class 1) above this yields label 1
    #[serde(default = "default_threshold")]
    pub decision_threshold: f64,
}

fn default_model_type() -> String {
    MODEL_TYPE.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_DECISION_THRESHOLD
}

impl LogisticParams {
    /// Internal consistency: one coefficient (and scaler entry) per feature,
    /// all finite, threshold inside (0, 1)
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.model_type != MODEL_TYPE {
            return Err(LoadError::UnsupportedFormat(format!(
                "model_type '{}', expected '{}'",
                self.model_type, MODEL_TYPE
            )));
        }

        let n = self.feature_names.len();
        if n == 0 {
            return Err(LoadError::Invalid("no feature names".to_string()));
        }
        if self.coefficients.len() != n {
            return Err(LoadError::Invalid(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                n
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(LoadError::Invalid("non-finite model parameter".to_string()));
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(LoadError::Invalid(format!(
                    "scaler has {} means and {} scales for {} features",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    n
                )));
            }
            if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
                || scaler.mean.iter().any(|m| !m.is_finite())
            {
                return Err(LoadError::Invalid(
                    "scaler contains zero or non-finite entries".to_string(),
                ));
            }
        }

        if !(self.decision_threshold > 0.0 && self.decision_threshold < 1.0) {
            return Err(LoadError::Invalid(format!(
                "decision_threshold {} outside (0, 1)",
                self.decision_threshold
            )));
        }

        Ok(())
    }
}

/// Logistic regression ready for inference
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    params: LogisticParams,
}

impl LogisticClassifier {
    pub fn new(params: LogisticParams) -> Result<Self, LoadError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let params: LogisticParams = serde_json::from_str(json)?;
        Self::new(params)
    }

    pub fn params(&self) -> &LogisticParams {
        &self.params
    }

    /// Linear term before the sigmoid
    fn decision_function(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        let values = record.as_slice();
        if values.len() != self.params.coefficients.len() {
            return Err(ClassifierError::Schema(format!(
                "record has {} features, model expects {}",
                values.len(),
                self.params.coefficients.len()
            )));
        }

        let mut z = self.params.intercept;
        for (i, (&x, &coef)) in values.iter().zip(self.params.coefficients.iter()).enumerate() {
            let x = match &self.params.scaler {
                Some(scaler) => (x - scaler.mean[i]) / scaler.scale[i],
                None => x,
            };
            z += coef * x;
        }

        if !z.is_finite() {
            return Err(ClassifierError::Inference(
                "decision function is not finite".to_string(),
            ));
        }

        Ok(z)
    }

    fn positive_probability(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        self.decision_function(record).map(sigmoid)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticClassifier {
    fn feature_names(&self) -> &[String] {
        &self.params.feature_names
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Label, ClassifierError> {
        let p = self.positive_probability(record)?;
        Ok(if p > self.params.decision_threshold {
            Label::Present
        } else {
            Label::NoSigns
        })
    }

    fn predict_probability(
        &self,
        record: &FeatureRecord,
    ) -> Result<ClassProbabilities, ClassifierError> {
        let p = self.positive_probability(record)?;
        Ok(ClassProbabilities::new(1.0 - p, p))
    }

    fn kind(&self) -> &str {
        MODEL_TYPE
    }
}
