//! Response Assembler
//!
//! Structural composition only: every field is copied from a component
//! output, nothing is recomputed.

use serde::{Deserialize, Serialize};

use crate::logic::bands::SensorStatuses;
use crate::logic::features::SensorReading;
use crate::logic::model::{ClassificationResult, ConditionLabel, FeatureImportance, FeatureImportances};

/// What the dashboard receives for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub prediction: ConditionLabel,
    pub confidence: f32,
    /// Descending importance, ties in column order
    pub feature_importance: Vec<FeatureImportance>,
    pub sensor_data: SensorReading,
    pub color: SensorStatuses,
}

pub fn assemble(
    reading: &SensorReading,
    classification: &ClassificationResult,
    statuses: &SensorStatuses,
) -> AssessmentResponse {
    AssessmentResponse {
        prediction: classification.label,
        confidence: classification.confidence,
        feature_importance: classification.importances.ranked(),
        sensor_data: *reading,
        color: *statuses,
    }
}

impl AssessmentResponse {
    pub fn label(&self) -> ConditionLabel {
        self.prediction
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Column-ordered weights, `None` if the breakdown does not name every
    /// feature exactly once
    pub fn importances(&self) -> Option<FeatureImportances> {
        FeatureImportances::from_breakdown(&self.feature_importance)
    }

    pub fn reading(&self) -> &SensorReading {
        &self.sensor_data
    }

    pub fn statuses(&self) -> &SensorStatuses {
        &self.color
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
