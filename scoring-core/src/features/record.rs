//! Feature Record - Core data structure for classifier input
//!
//! **Versioned feature record**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version and layout hash stamped on every record

use serde::{Deserialize, Serialize};

use super::layout::{
    self, feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use crate::vitals::{DerivedFeatures, RawVitals};

/// Something that writes its values into the slots it owns
pub trait FeatureExtractor {
    fn extract(&self, record: &mut FeatureRecord);
}

/// Versioned, fixed-order record of the six classifier inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    values: [f64; FEATURE_COUNT],
}

impl FeatureRecord {
    /// Create a new zeroed record with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Build the record for one submission: raw vitals then derived indices
    pub fn from_vitals(raw: &RawVitals, derived: &DerivedFeatures) -> Self {
        let mut record = Self::new();
        raw.extract(&mut record);
        derived.extract(&mut record);
        record
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Values narrowed to f32 for tensor-based runtimes
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// (name, value) pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for RawVitals {
    fn extract(&self, record: &mut FeatureRecord) {
        record.set(layout::AGE, f64::from(self.age));
        record.set(layout::SYSTOLIC_BP, self.systolic_bp);
        record.set(layout::DIASTOLIC_BP, self.diastolic_bp);
        record.set(layout::CHOLESTEROL, self.cholesterol);
    }
}

impl FeatureExtractor for DerivedFeatures {
    fn extract(&self, record: &mut FeatureRecord) {
        record.set(layout::PULSE_PRESSURE, self.pulse_pressure);
        record.set(layout::MEAN_ARTERIAL_PRESSURE, self.mean_arterial_pressure);
    }
}
