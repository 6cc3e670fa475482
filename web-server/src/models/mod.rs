//! Request and response models

pub mod vitals;
pub mod prediction;

pub use vitals::*;
pub use prediction::*;
