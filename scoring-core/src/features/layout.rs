//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The order below is the column order the classifier was trained on.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the record
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Raw vitals (0-3) ===
    "age",                    // 0: Age in years
    "systolic_bp",            // 1: Systolic blood pressure
    "diastolic_bp",           // 2: Diastolic blood pressure
    "cholesterol",            // 3: Cholesterol level

    // === Derived (4-5) ===
    "pulse_pressure",         // 4: systolic - diastolic
    "mean_arterial_pressure", // 5: (systolic + 2 * diastolic) / 3
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 6;

pub const AGE: usize = 0;
pub const SYSTOLIC_BP: usize = 1;
pub const DIASTOLIC_BP: usize = 2;
pub const CHOLESTEROL: usize = 3;
pub const PULSE_PRESSURE: usize = 4;
pub const MEAN_ARTERIAL_PRESSURE: usize = 5;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Check that a classifier's training schema is exactly this layout.
///
/// Names and order must match one to one. A reordered or renamed column is
/// rejected rather than remapped.
pub fn validate_schema<S: AsRef<str>>(expected_by_model: &[S]) -> Result<(), ScoreError> {
    let matches = expected_by_model.len() == FEATURE_COUNT
        && expected_by_model
            .iter()
            .zip(FEATURE_LAYOUT.iter())
            .all(|(model_name, layout_name)| model_name.as_ref() == *layout_name);

    if matches {
        return Ok(());
    }

    Err(ScoreError::SchemaMismatch(format!(
        "classifier expects [{}], record provides [{}]",
        expected_by_model
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
        FEATURE_LAYOUT.join(", "),
    )))
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 6);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_index_constants_match_layout() {
        assert_eq!(feature_index("age"), Some(AGE));
        assert_eq!(feature_index("systolic_bp"), Some(SYSTOLIC_BP));
        assert_eq!(feature_index("diastolic_bp"), Some(DIASTOLIC_BP));
        assert_eq!(feature_index("cholesterol"), Some(CHOLESTEROL));
        assert_eq!(feature_index("pulse_pressure"), Some(PULSE_PRESSURE));
        assert_eq!(feature_index("mean_arterial_pressure"), Some(MEAN_ARTERIAL_PRESSURE));
        assert_eq!(feature_index("bmi"), None);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_schema_exact() {
        assert!(validate_schema(FEATURE_LAYOUT).is_ok());

        let owned: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        assert!(validate_schema(&owned).is_ok());
    }

    #[test]
    fn test_validate_schema_rejects_reorder() {
        let swapped = [
            "age",
            "diastolic_bp",
            "systolic_bp",
            "cholesterol",
            "pulse_pressure",
            "mean_arterial_pressure",
        ];
        let err = validate_schema(&swapped).unwrap_err();
        assert!(matches!(err, ScoreError::SchemaMismatch(_)));
    }

    #[test]
    fn test_validate_schema_rejects_other_feature_set() {
        let five = ["age", "systolic_bp", "diastolic_bp", "cholesterol", "bmi"];
        assert!(validate_schema(&five).is_err());

        let empty: [&str; 0] = [];
        assert!(validate_schema(&empty).is_err());
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names[5], "mean_arterial_pressure");
    }
}
