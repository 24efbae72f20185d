//! Error Taxonomy
//!
//! - `ConfigError`      - fatal, raised while loading artifacts at startup
//! - `ValidationError`  - per request, bad input rejected before scaling
//! - `ComputationError` - per request, numeric failure inside scaling/prediction
//!
//! `AssessmentError` wraps all three. Only configuration errors are fatal.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// CONFIGURATION ERRORS (fatal)
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Feature count mismatch in {what}: expected {expected}, got {actual}")]
    FeatureCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Feature layout mismatch: expected {expected:?}, got {actual:?}")]
    FeatureLayout {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Invalid scaler parameter for {feature}: {reason}")]
    ScalerParameter { feature: &'static str, reason: String },

    #[error("Invalid feature importances: {0}")]
    Importances(String),

    #[error("Checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    Checksum {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Invalid model parameters: {0}")]
    InvalidModel(String),

    #[error("Class index {0} has no condition label")]
    UnmappedClass(usize),

    #[error("Model reports {actual} classes, expected {expected}")]
    ClassCount { expected: usize, actual: usize },

    #[error("Invalid band table for {sensor}: {reason}")]
    BandTable { sensor: &'static str, reason: String },

    #[error("ONNX Runtime error: {0}")]
    Runtime(String),

    #[error("Invalid setting {key}={value}: {reason}")]
    Setting {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Startup probe failed: {0}")]
    Probe(String),
}

// ============================================================================
// VALIDATION ERRORS (per request)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Sensor reading must have {expected} values, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("Sensor {sensor} has non-finite value {value}")]
    NonFinite { sensor: &'static str, value: f64 },

    #[error("Malformed sensor reading: {0}")]
    Malformed(String),
}

// ============================================================================
// COMPUTATION ERRORS (per request)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("Scaled feature {feature} is not finite ({value})")]
    NonFiniteFeature { feature: &'static str, value: f32 },

    #[error("Invalid probability distribution: {0}")]
    InvalidDistribution(String),

    #[error("Predicted class {predicted} disagrees with most probable class {argmax}")]
    InconsistentPrediction { predicted: usize, argmax: usize },

    #[error("Feature vector built against layout v{version} ({hash:08x}), not the current one")]
    LayoutMismatch { version: u8, hash: u32 },

    #[error("Inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// UMBRELLA
// ============================================================================

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),

    /// The sensor source failed to deliver a reading.
    #[error("Sensor source error: {0}")]
    Source(String),

    /// The sensor source has no more readings.
    #[error("Sensor source exhausted")]
    Exhausted,
}

impl AssessmentError {
    /// Configuration errors mean the engine cannot produce trustworthy
    /// assessments at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AssessmentError::Config(_))
    }
}

pub type AssessmentResult<T> = Result<T, AssessmentError>;
