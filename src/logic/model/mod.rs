//! Model Module - condition classifier
//!
//! `classifier` defines the contract and validation; `inference` (ONNX) and
//! `linear` are the two model families; `manifest` picks one from disk.

pub mod classifier;
pub mod inference;
pub mod linear;
pub mod manifest;

// Re-export common types
pub use classifier::{
    classify, ClassDistribution, ClassificationResult, Classifier, ConditionLabel, FeatureImportance,
    FeatureImportances, ModelKind, CLASS_COUNT,
};
pub use inference::OnnxClassifier;
pub use linear::{LinearClassifier, LinearParams};
pub use manifest::{load_classifier, ModelManifest};
