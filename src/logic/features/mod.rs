//! Features Module - raw readings and their model-space form
//!
//! `layout` is the single source of truth for sensor order; everything that
//! crosses into the model goes through `FeatureScaler`.

pub mod layout;
pub mod reading;
pub mod scaler;
pub mod vector;

// Re-export common types
pub use layout::{feature_name, LayoutInfo, Sensor, SensorSpec, FEATURE_COUNT, SENSOR_SPECS};
pub use reading::SensorReading;
pub use scaler::{FeatureScaler, ScalerParams};
pub use vector::FeatureVector;
