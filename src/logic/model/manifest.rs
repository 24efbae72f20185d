//! Model Manifest - describes the classifier artifact
//!
//! ```json
//! {
//!   "kind": "onnx",
//!   "name": "xgb-harvester-v3",
//!   "feature_names": ["Hydraulic Pressure", "Oil Temperature", "Blade RPM",
//!                     "Fuel Consumption", "Blade Sharpness"],
//!   "model_file": "xgb_model.onnx",
//!   "sha256": "9f2c...",
//!   "feature_importances": [0.31, 0.22, 0.18, 0.12, 0.17]
//! }
//! ```
//!
//! Relative `model_file` paths resolve against the manifest's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{Classifier, FeatureImportances};
use super::inference::{OnnxClassifier, DEFAULT_LABEL_OUTPUT, DEFAULT_PROBABILITIES_OUTPUT};
use super::linear::{LinearClassifier, LinearParams};
use crate::logic::error::ConfigError;
use crate::logic::features::layout::{is_layout_compatible, LayoutInfo};

// ============================================================================
// MANIFEST FORMAT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelManifest {
    Onnx(OnnxManifest),
    Linear(LinearManifest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnnxManifest {
    #[serde(default)]
    pub name: Option<String>,
    pub feature_names: Vec<String>,
    pub model_file: PathBuf,
    /// Hex SHA-256 of the model file, verified before loading
    #[serde(default)]
    pub sha256: Option<String>,
    /// `feature_importances_` of the fitted model, column order
    pub feature_importances: Vec<f32>,
    #[serde(default = "default_label_output")]
    pub label_output: String,
    #[serde(default = "default_probabilities_output")]
    pub probabilities_output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearManifest {
    #[serde(default)]
    pub name: Option<String>,
    pub feature_names: Vec<String>,
    #[serde(flatten)]
    pub params: LinearParams,
}

fn default_label_output() -> String {
    DEFAULT_LABEL_OUTPUT.to_string()
}

fn default_probabilities_output() -> String {
    DEFAULT_PROBABILITIES_OUTPUT.to_string()
}

// ============================================================================
// LOADING
// ============================================================================

impl ModelManifest {
    /// Read and parse a manifest, checking its feature layout
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading model manifest from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::ArtifactMissing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: ModelManifest = serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        manifest.check_layout()?;
        Ok(manifest)
    }

    pub fn feature_names(&self) -> &[String] {
        match self {
            ModelManifest::Onnx(m) => &m.feature_names,
            ModelManifest::Linear(m) => &m.feature_names,
        }
    }

    fn check_layout(&self) -> Result<(), ConfigError> {
        if is_layout_compatible(self.feature_names()) {
            return Ok(());
        }

        Err(ConfigError::FeatureLayout {
            expected: LayoutInfo::current().feature_names,
            actual: self.feature_names().to_vec(),
        })
    }

    /// Build the classifier this manifest describes
    pub fn into_classifier(self, base_dir: &Path) -> Result<Box<dyn Classifier>, ConfigError> {
        match self {
            ModelManifest::Onnx(m) => {
                let model_path = if m.model_file.is_absolute() {
                    m.model_file.clone()
                } else {
                    base_dir.join(&m.model_file)
                };

                if let Some(expected) = &m.sha256 {
                    verify_checksum(&model_path, expected)?;
                }

                let importances = FeatureImportances::normalized(&m.feature_importances)?;
                let classifier = OnnxClassifier::load(&model_path, m.label_output, m.probabilities_output, importances)?;
                Ok(Box::new(classifier))
            }
            ModelManifest::Linear(m) => {
                let name = m.name.unwrap_or_else(|| "linear".to_string());
                Ok(Box::new(LinearClassifier::new(name, m.params)?))
            }
        }
    }
}

/// Load manifest + classifier in one step
pub fn load_classifier(manifest_path: impl AsRef<Path>) -> Result<Box<dyn Classifier>, ConfigError> {
    let manifest_path = manifest_path.as_ref();
    let manifest = ModelManifest::load(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    manifest.into_classifier(base_dir)
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// Compute hex SHA-256 of a file
pub fn file_sha256(path: &Path) -> Result<String, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Verify a file against an expected hex SHA-256 (case-insensitive)
pub fn verify_checksum(path: &Path, expected: &str) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ArtifactMissing(path.to_path_buf()));
    }

    let actual = file_sha256(path)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(ConfigError::Checksum {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }

    log::debug!("Checksum verified for {}", path.display());
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
