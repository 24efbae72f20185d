//! Feature Scaler - fitted per-dimension affine normalization
//!
//! Loaded once from the scaler artifact and never mutated afterwards.
//! Dimension `i` of the output depends only on dimension `i` of the input:
//! `scaled[i] = (raw[i] - center[i]) / scale[i]`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::layout::{Sensor, FEATURE_COUNT};
use super::reading::SensorReading;
use super::vector::FeatureVector;
use crate::logic::error::{ComputationError, ConfigError};

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// Fitted parameters as exported from training
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParams {
    /// Mean / standard deviation
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// Per-feature min / max from the training set
    MinMax { min: Vec<f64>, max: Vec<f64> },
}

// ============================================================================
// SCALER
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    center: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl FeatureScaler {
    /// Validate fitted parameters and reduce them to affine form
    pub fn from_params(params: ScalerParams) -> Result<Self, ConfigError> {
        let (center, scale) = match params {
            ScalerParams::Standard { mean, scale } => {
                (to_array(mean, "scaler mean")?, to_array(scale, "scaler scale")?)
            }
            ScalerParams::MinMax { min, max } => {
                let min = to_array(min, "scaler min")?;
                let max = to_array(max, "scaler max")?;
                let mut range = [0.0; FEATURE_COUNT];
                for i in 0..FEATURE_COUNT {
                    range[i] = max[i] - min[i];
                }
                (min, range)
            }
        };

        for sensor in Sensor::ALL {
            let i = sensor.index();
            if !center[i].is_finite() {
                return Err(ConfigError::ScalerParameter {
                    feature: sensor.key(),
                    reason: format!("center {} is not finite", center[i]),
                });
            }
            if !(scale[i].is_finite() && scale[i] > 0.0) {
                return Err(ConfigError::ScalerParameter {
                    feature: sensor.key(),
                    reason: format!("scale {} must be finite and positive", scale[i]),
                });
            }
        }

        Ok(Self { center, scale })
    }

    /// Load scaler artifact (JSON) from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading scaler from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::ArtifactMissing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let params: ScalerParams = serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_params(params)
    }

    /// Scale a raw reading into model space
    pub fn scale(&self, reading: &SensorReading) -> Result<FeatureVector, ComputationError> {
        let raw = reading.values();
        let mut values = [0.0f32; FEATURE_COUNT];

        for i in 0..FEATURE_COUNT {
            values[i] = ((raw[i] - self.center[i]) / self.scale[i]) as f32;
        }

        let vector = FeatureVector::from_values(values);
        if let Some((feature, value)) = vector.first_non_finite() {
            return Err(ComputationError::NonFiniteFeature { feature, value });
        }

        Ok(vector)
    }

    pub fn center(&self) -> &[f64; FEATURE_COUNT] {
        &self.center
    }
}

fn to_array(values: Vec<f64>, what: &'static str) -> Result<[f64; FEATURE_COUNT], ConfigError> {
    let actual = values.len();
    values.try_into().map_err(|_| ConfigError::FeatureCount {
        what,
        expected: FEATURE_COUNT,
        actual,
    })
}
