//! Diabetic Retinopathy Scoring Core
//!
//! Turns four patient vitals into a diabetic retinopathy prediction.
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────┐   ┌──────────────────┐   ┌───────────────┐   ┌────────────┐
//! │ RawVitals  │──►│ DerivedFeatures  │──►│ FeatureRecord │──►│ Classifier │
//! │ (4 inputs) │   │ (PP, MAP)        │   │ (6, ordered)  │   │ (injected) │
//! └────────────┘   └──────────────────┘   └───────────────┘   └─────┬──────┘
//!                                                                   ▼
//!                              report::format_report ◄── PredictionResult
//! ```
//!
//! The classifier is loaded once (see [`model::load_classifier`]) and passed
//! into [`Scorer`]; nothing here keeps global model state.

pub mod constants;
pub mod error;
pub mod features;
pub mod model;
pub mod report;
pub mod scorer;
pub mod vitals;

pub use error::{ClassifierError, LoadError, ScoreError, ScoreResult};
pub use features::{FeatureRecord, FEATURE_COUNT, FEATURE_LAYOUT};
pub use model::{
    load_classifier, Classifier, ClassProbabilities, Label, LoadedModel, ModelMetadata,
};
pub use report::{format_report, REPORT_FILE_NAME};
pub use scorer::{score, PredictionResult, Scorer};
pub use vitals::{DerivedFeatures, RawVitals};
