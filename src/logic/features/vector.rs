//! Feature Vector - model-space input for the classifier
//!
//! **Versioned feature vector with layout validation**
//!
//! Produced only by the `FeatureScaler`; carries the layout version and hash
//! so a vector built against another layout is rejected before inference.

use serde::{Deserialize, Serialize};

use super::layout::{feature_name, layout_hash, FEATURE_COUNT, FEATURE_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Scaled values in column order
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from scaled values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Check if this vector was built against the current layout
    pub fn is_compatible(&self) -> bool {
        self.version == FEATURE_VERSION && self.layout_hash == layout_hash()
    }

    /// First non-finite value, if any
    pub fn first_non_finite(&self) -> Option<(&'static str, f32)> {
        self.values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
            .map(|(i, &v)| (feature_name(i).unwrap_or("unknown"), v))
    }

    /// Convert to JSON for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
        })
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}
