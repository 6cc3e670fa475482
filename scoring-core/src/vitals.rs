//! Patient Vitals - raw inputs and derived blood-pressure indices

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AGE, DEFAULT_CHOLESTEROL, DEFAULT_DIASTOLIC_BP, DEFAULT_SYSTOLIC_BP,
};

/// Raw vital-sign measurements submitted for one prediction.
///
/// Range checks belong to whoever collects the values (the web form);
/// the scorer takes these as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawVitals {
    /// Age in years
    pub age: u32,

    /// Systolic blood pressure (mmHg)
    pub systolic_bp: f64,

    /// Diastolic blood pressure (mmHg)
    pub diastolic_bp: f64,

    /// Cholesterol level
    pub cholesterol: f64,
}

impl RawVitals {
    pub fn new(age: u32, systolic_bp: f64, diastolic_bp: f64, cholesterol: f64) -> Self {
        Self {
            age,
            systolic_bp,
            diastolic_bp,
            cholesterol,
        }
    }

    /// Compute pulse pressure and mean arterial pressure
    pub fn derive(&self) -> DerivedFeatures {
        DerivedFeatures::from_vitals(self)
    }
}

impl Default for RawVitals {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            systolic_bp: DEFAULT_SYSTOLIC_BP,
            diastolic_bp: DEFAULT_DIASTOLIC_BP,
            cholesterol: DEFAULT_CHOLESTEROL,
        }
    }
}

/// Indices derived from the blood-pressure pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// systolic - diastolic, not clamped (negative when diastolic > systolic)
    pub pulse_pressure: f64,

    /// (systolic + 2 * diastolic) / 3
    pub mean_arterial_pressure: f64,
}

impl DerivedFeatures {
    pub fn from_vitals(raw: &RawVitals) -> Self {
        Self {
            pulse_pressure: raw.systolic_bp - raw.diastolic_bp,
            mean_arterial_pressure: (raw.systolic_bp + 2.0 * raw.diastolic_bp) / 3.0,
        }
    }
}
