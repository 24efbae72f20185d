//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs the exported gradient-boosted condition model.
//! Expected graph: input `float[1, 5]`, outputs `label` (int64[1]) and
//! `probabilities` (float[1, 3], ZipMap disabled at export).

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{Classifier, FeatureImportances, ModelKind};
use crate::logic::error::{ComputationError, ConfigError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

/// Default output names written by the exporter
pub const DEFAULT_LABEL_OUTPUT: &str = "label";
pub const DEFAULT_PROBABILITIES_OUTPUT: &str = "probabilities";

pub struct OnnxClassifier {
    name: String,
    /// `Session::run` needs exclusive access; held for one inference only
    session: Mutex<Session>,
    label_output: String,
    probabilities_output: String,
    importances: FeatureImportances,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(
        model_path: &Path,
        label_output: String,
        probabilities_output: String,
        importances: FeatureImportances,
    ) -> Result<Self, ConfigError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ConfigError::ArtifactMissing(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| ConfigError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ConfigError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ConfigError::Runtime(format!("Failed to load model: {}", e)))?;

        let name = model_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<onnx>".to_string());

        Self::from_session(name, session, label_output, probabilities_output, importances)
    }

    fn from_session(
        name: String,
        session: Session,
        label_output: String,
        probabilities_output: String,
        importances: FeatureImportances,
    ) -> Result<Self, ConfigError> {
        if session.inputs.len() != 1 {
            return Err(ConfigError::Runtime(format!(
                "Model must have exactly one input, found {}",
                session.inputs.len()
            )));
        }

        for wanted in [&label_output, &probabilities_output] {
            if !session.outputs.iter().any(|o| &o.name == wanted) {
                return Err(ConfigError::Runtime(format!("Model has no output named '{}'", wanted)));
            }
        }

        log::info!("ONNX model '{}' loaded successfully", name);

        Ok(Self {
            name,
            session: Mutex::new(session),
            label_output,
            probabilities_output,
            importances,
        })
    }

    /// Run one inference, returning (label, probabilities)
    fn run(&self, features: &FeatureVector) -> Result<(i64, Vec<f32>), ComputationError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.values.to_vec())
            .map_err(|e| ComputationError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ComputationError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ComputationError::Inference(format!("Inference failed: {}", e)))?;

        let label_value = outputs
            .get(&self.label_output)
            .ok_or_else(|| ComputationError::Inference(format!("No output '{}'", self.label_output)))?;
        let (_, labels) = label_value
            .try_extract_tensor::<i64>()
            .map_err(|e| ComputationError::Inference(format!("Extract label error: {}", e)))?;
        let label = labels
            .first()
            .copied()
            .ok_or_else(|| ComputationError::Inference("Empty label output".to_string()))?;

        let prob_value = outputs
            .get(&self.probabilities_output)
            .ok_or_else(|| ComputationError::Inference(format!("No output '{}'", self.probabilities_output)))?;
        let (_, probabilities) = prob_value
            .try_extract_tensor::<f32>()
            .map_err(|e| ComputationError::Inference(format!("Extract probabilities error: {}", e)))?;

        Ok((label, probabilities.to_vec()))
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Onnx
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, ComputationError> {
        let (label, _) = self.run(features)?;
        to_class_index(label)
    }

    fn predict_distribution(&self, features: &FeatureVector) -> Result<Vec<f32>, ComputationError> {
        let (_, probabilities) = self.run(features)?;
        Ok(probabilities)
    }

    /// One session run yields both outputs
    fn predict_with_distribution(&self, features: &FeatureVector) -> Result<(usize, Vec<f32>), ComputationError> {
        let (label, probabilities) = self.run(features)?;
        Ok((to_class_index(label)?, probabilities))
    }

    fn feature_importances(&self) -> &FeatureImportances {
        &self.importances
    }
}

fn to_class_index(label: i64) -> Result<usize, ComputationError> {
    usize::try_from(label).map_err(|_| ComputationError::Inference(format!("Negative class label {}", label)))
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("name", &self.name)
            .field("label_output", &self.label_output)
            .field("probabilities_output", &self.probabilities_output)
            .finish_non_exhaustive()
    }
}
