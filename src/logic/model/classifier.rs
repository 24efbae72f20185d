//! Classifier Contract
//!
//! Any pretrained 3-class model plugs in behind `Classifier`. Implementors
//! return raw outputs; `classify` validates them before they become a
//! `ClassificationResult`:
//! - the distribution has exactly `CLASS_COUNT` non-negative entries summing to 1
//! - the predicted index maps to a `ConditionLabel`
//! - the predicted index is the most probable class

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logic::error::{AssessmentResult, ComputationError, ConfigError};
use crate::logic::features::{feature_name, FeatureVector, Sensor, FEATURE_COUNT};

/// Number of condition classes the model was trained on
pub const CLASS_COUNT: usize = 3;

/// Allowed drift of probability / importance sums from 1.0
pub const SUM_TOLERANCE: f32 = 1e-4;

// ============================================================================
// CONDITION LABEL
// ============================================================================

/// Equipment condition, serialized as the operator-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionLabel {
    #[serde(rename = "All good")]
    Healthy,
    #[serde(rename = "Maintenance Due!")]
    MaintenanceDue,
    #[serde(rename = "Repair / Replace")]
    RepairOrReplace,
}

impl ConditionLabel {
    pub fn class_index(self) -> usize {
        match self {
            ConditionLabel::Healthy => 0,
            ConditionLabel::MaintenanceDue => 1,
            ConditionLabel::RepairOrReplace => 2,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConditionLabel::Healthy => "All good",
            ConditionLabel::MaintenanceDue => "Maintenance Due!",
            ConditionLabel::RepairOrReplace => "Repair / Replace",
        }
    }
}

impl TryFrom<usize> for ConditionLabel {
    type Error = ConfigError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(ConditionLabel::Healthy),
            1 => Ok(ConditionLabel::MaintenanceDue),
            2 => Ok(ConditionLabel::RepairOrReplace),
            other => Err(ConfigError::UnmappedClass(other)),
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// CLASS DISTRIBUTION
// ============================================================================

/// Validated probability vector over the condition classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassDistribution([f32; CLASS_COUNT]);

impl ClassDistribution {
    /// Validate raw model output.
    ///
    /// A wrong class count means the model does not match the label mapping
    /// (configuration error); anything else wrong with the numbers is a
    /// per-request computation error.
    pub fn from_slice(probabilities: &[f32]) -> AssessmentResult<Self> {
        let array: [f32; CLASS_COUNT] = probabilities.try_into().map_err(|_| ConfigError::ClassCount {
            expected: CLASS_COUNT,
            actual: probabilities.len(),
        })?;

        if let Some(p) = array.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(ComputationError::InvalidDistribution(format!("entry {} is not a probability", p)).into());
        }

        let sum: f32 = array.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ComputationError::InvalidDistribution(format!("probabilities sum to {}", sum)).into());
        }

        Ok(Self(array))
    }

    pub fn probabilities(&self) -> &[f32; CLASS_COUNT] {
        &self.0
    }

    pub fn get(&self, class: usize) -> Option<f32> {
        self.0.get(class).copied()
    }

    /// Index of the most probable class (first one on ties)
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.0.iter().enumerate() {
            if p > self.0[best] {
                best = i;
            }
        }
        best
    }

    /// Highest class probability
    pub fn max(&self) -> f32 {
        self.0[self.argmax()]
    }
}

// ============================================================================
// FEATURE IMPORTANCES
// ============================================================================

/// One entry of the attribution breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f32,
}

/// Model-level attribution weights: non-negative, summing to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportances([f32; FEATURE_COUNT]);

impl FeatureImportances {
    /// Validate raw weights and normalize them to sum 1
    pub fn normalized(raw: &[f32]) -> Result<Self, ConfigError> {
        let array: [f32; FEATURE_COUNT] = raw.try_into().map_err(|_| ConfigError::FeatureCount {
            what: "feature importances",
            expected: FEATURE_COUNT,
            actual: raw.len(),
        })?;

        if let Some(w) = array.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ConfigError::Importances(format!("weight {} must be finite and non-negative", w)));
        }

        let sum: f32 = array.iter().sum();
        if sum <= 0.0 {
            return Err(ConfigError::Importances("weights sum to zero".to_string()));
        }
        if !sum.is_finite() {
            return Err(ConfigError::Importances(format!("weights overflow when summed ({})", sum)));
        }

        Ok(Self(array.map(|w| w / sum)))
    }

    pub fn weights(&self) -> &[f32; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, sensor: Sensor) -> f32 {
        self.0[sensor.index()]
    }

    /// Breakdown sorted by descending importance, ties keep column order
    pub fn ranked(&self) -> Vec<FeatureImportance> {
        let mut order: Vec<usize> = (0..FEATURE_COUNT).collect();
        order.sort_by(|&a, &b| self.0[b].partial_cmp(&self.0[a]).unwrap_or(std::cmp::Ordering::Equal));

        order
            .into_iter()
            .map(|i| FeatureImportance {
                name: feature_name(i).unwrap_or("unknown").to_string(),
                importance: self.0[i],
            })
            .collect()
    }

    /// Rebuild column-ordered weights from a breakdown.
    /// `None` unless every feature appears exactly once.
    pub fn from_breakdown(entries: &[FeatureImportance]) -> Option<Self> {
        if entries.len() != FEATURE_COUNT {
            return None;
        }

        let mut weights = [0.0f32; FEATURE_COUNT];
        let mut seen = [false; FEATURE_COUNT];
        for entry in entries {
            let index = crate::logic::features::layout::feature_index(&entry.name)?;
            if seen[index] {
                return None;
            }
            seen[index] = true;
            weights[index] = entry.importance;
        }

        Some(Self(weights))
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: ConditionLabel,
    /// Highest class probability
    pub confidence: f32,
    pub distribution: ClassDistribution,
    pub importances: FeatureImportances,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Model family, reported in engine status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Onnx,
    Linear,
}

/// Trait for pretrained condition classifiers (ONNX, in-process linear, ...)
///
/// Weights are immutable after load, so one instance serves concurrent
/// requests.
pub trait Classifier: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn kind(&self) -> ModelKind;

    /// Predicted class index
    fn predict(&self, features: &FeatureVector) -> Result<usize, ComputationError>;

    /// Raw per-class probabilities
    fn predict_distribution(&self, features: &FeatureVector) -> Result<Vec<f32>, ComputationError>;

    /// Class index and probabilities from one evaluation. Override when the
    /// backend produces both in a single run.
    fn predict_with_distribution(&self, features: &FeatureVector) -> Result<(usize, Vec<f32>), ComputationError> {
        Ok((self.predict(features)?, self.predict_distribution(features)?))
    }

    /// Fixed attribution weights, computed once at load
    fn feature_importances(&self) -> &FeatureImportances;
}

/// Run a classifier and validate everything it returns
pub fn classify(classifier: &dyn Classifier, features: &FeatureVector) -> AssessmentResult<ClassificationResult> {
    if !features.is_compatible() {
        return Err(ComputationError::LayoutMismatch {
            version: features.version,
            hash: features.layout_hash,
        }
        .into());
    }

    let (predicted, probabilities) = classifier.predict_with_distribution(features)?;
    let distribution = ClassDistribution::from_slice(&probabilities)?;
    let label = ConditionLabel::try_from(predicted)?;

    let confidence = distribution.max();
    if distribution.get(predicted).unwrap_or(0.0) < confidence {
        return Err(ComputationError::InconsistentPrediction {
            predicted,
            argmax: distribution.argmax(),
        }
        .into());
    }

    Ok(ClassificationResult {
        label,
        confidence,
        distribution,
        importances: *classifier.feature_importances(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
