//! Logic Module - Assessment Engine & Components
//!
//! - `features/` - Sensor layout, raw readings, scaling into model space
//! - `model/` - Condition classifiers (ONNX, linear) and output validation
//! - `bands/` - Per-sensor operating bands
//! - `source/` - Where readings come from
//! - `assess/` - Engine and response assembly

pub mod error;
pub mod config;

// Components
pub mod features;
pub mod model;
pub mod bands;
pub mod source;

// Pipeline
pub mod assess;
