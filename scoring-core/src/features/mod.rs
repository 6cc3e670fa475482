//! Features Module - Feature Record Assembly
//!
//! Turns raw vitals plus derived indices into the fixed-order record the
//! classifier was trained on.

pub mod layout;
pub mod record;

// Re-export common types
pub use layout::{validate_schema, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use record::{FeatureExtractor, FeatureRecord};
