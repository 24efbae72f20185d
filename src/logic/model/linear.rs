//! Linear Classifier - multinomial logistic regression in pure Rust
//!
//! `p = softmax(W·x + b)`. Needs no native runtime, so it also serves as the
//! reference model in tests.

use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, FeatureImportances, ModelKind, CLASS_COUNT};
use crate::logic::error::{ComputationError, ConfigError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

/// Fitted weights as exported from training
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearParams {
    /// One row per class, one column per feature
    pub coefficients: Vec<Vec<f32>>,
    /// One intercept per class
    pub intercepts: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    coefficients: [[f32; FEATURE_COUNT]; CLASS_COUNT],
    intercepts: [f32; CLASS_COUNT],
    importances: FeatureImportances,
}

impl LinearClassifier {
    pub fn new(name: impl Into<String>, params: LinearParams) -> Result<Self, ConfigError> {
        if params.coefficients.len() != CLASS_COUNT {
            return Err(ConfigError::ClassCount {
                expected: CLASS_COUNT,
                actual: params.coefficients.len(),
            });
        }
        if params.intercepts.len() != CLASS_COUNT {
            return Err(ConfigError::ClassCount {
                expected: CLASS_COUNT,
                actual: params.intercepts.len(),
            });
        }

        let mut coefficients = [[0.0f32; FEATURE_COUNT]; CLASS_COUNT];
        for (class, row) in params.coefficients.iter().enumerate() {
            coefficients[class] = row.as_slice().try_into().map_err(|_| ConfigError::FeatureCount {
                what: "linear coefficients",
                expected: FEATURE_COUNT,
                actual: row.len(),
            })?;
        }

        let mut intercepts = [0.0f32; CLASS_COUNT];
        intercepts.copy_from_slice(&params.intercepts);

        let all_finite = coefficients.iter().flatten().chain(intercepts.iter()).all(|w| w.is_finite());
        if !all_finite {
            return Err(ConfigError::InvalidModel("linear weights must be finite".to_string()));
        }

        // Mean absolute coefficient per feature across classes
        let mut raw = [0.0f32; FEATURE_COUNT];
        for row in &coefficients {
            for (i, w) in row.iter().enumerate() {
                raw[i] += w.abs() / CLASS_COUNT as f32;
            }
        }
        let importances = FeatureImportances::normalized(&raw)?;

        Ok(Self {
            name: name.into(),
            coefficients,
            intercepts,
            importances,
        })
    }

    fn logits(&self, features: &FeatureVector) -> [f32; CLASS_COUNT] {
        let mut logits = self.intercepts;
        for (class, row) in self.coefficients.iter().enumerate() {
            for (w, x) in row.iter().zip(features.values.iter()) {
                logits[class] += w * x;
            }
        }
        logits
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Linear
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, ComputationError> {
        let logits = self.logits(features);
        if logits.iter().any(|l| !l.is_finite()) {
            return Err(ComputationError::Inference("non-finite logit".to_string()));
        }

        let mut best = 0;
        for (i, &l) in logits.iter().enumerate() {
            if l > logits[best] {
                best = i;
            }
        }
        Ok(best)
    }

    fn predict_distribution(&self, features: &FeatureVector) -> Result<Vec<f32>, ComputationError> {
        let logits = self.logits(features);
        if logits.iter().any(|l| !l.is_finite()) {
            return Err(ComputationError::Inference("non-finite logit".to_string()));
        }

        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
        let sum: f32 = exps.iter().sum();

        Ok(exps.into_iter().map(|e| e / sum).collect())
    }

    fn feature_importances(&self) -> &FeatureImportances {
        &self.importances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::classifier::{classify, ConditionLabel, SUM_TOLERANCE};

    /// Healthy near the origin, maintenance when features 1 and 3 rise,
    /// repair when feature 4 (sharpness) drops.
    fn params() -> LinearParams {
        LinearParams {
            coefficients: vec![
                vec![-0.5, -1.0, -0.5, -1.0, 1.0],
                vec![0.2, 1.5, 0.3, 1.5, 0.0],
                vec![0.3, 0.5, 0.2, 0.5, -2.0],
            ],
            intercepts: vec![1.0, 0.0, -0.5],
        }
    }

    #[test]
    fn test_distribution_is_proper() {
        let model = LinearClassifier::new("test", params()).unwrap();

        for x in [-3.0f32, -1.0, 0.0, 0.5, 2.0, 10.0] {
            let features = FeatureVector::from_values([x, -x, x * 0.5, x, -x * 2.0]);
            let probs = model.predict_distribution(&features).unwrap();

            assert_eq!(probs.len(), CLASS_COUNT);
            assert!(probs.iter().all(|p| *p >= 0.0));
            assert!((probs.iter().sum::<f32>() - 1.0).abs() < SUM_TOLERANCE);
        }
    }

    #[test]
    fn test_predict_matches_argmax() {
        let model = LinearClassifier::new("test", params()).unwrap();

        for x in [-3.0f32, -1.0, 0.0, 0.5, 2.0, 10.0] {
            let features = FeatureVector::from_values([x, x, x, x, -x]);
            let result = classify(&model, &features).unwrap();
            assert_eq!(result.label.class_index(), model.predict(&features).unwrap());
        }
    }

    #[test]
    fn test_known_conditions() {
        let model = LinearClassifier::new("test", params()).unwrap();

        let nominal = FeatureVector::from_values([0.0, 0.0, 0.0, 0.0, 0.5]);
        assert_eq!(classify(&model, &nominal).unwrap().label, ConditionLabel::Healthy);

        let hot = FeatureVector::from_values([0.0, 2.0, 0.0, 2.0, 0.0]);
        assert_eq!(classify(&model, &hot).unwrap().label, ConditionLabel::MaintenanceDue);

        let dull = FeatureVector::from_values([0.0, 0.0, 0.0, 0.0, -2.0]);
        assert_eq!(classify(&model, &dull).unwrap().label, ConditionLabel::RepairOrReplace);
    }

    #[test]
    fn test_importances_from_coefficients() {
        let model = LinearClassifier::new("test", params()).unwrap();
        let weights = model.feature_importances().weights();

        // column sums of |W|: 1.0, 3.0, 1.0, 3.0, 3.0
        assert!((weights[0] - 1.0 / 11.0).abs() < 1e-6);
        assert!((weights[1] - 3.0 / 11.0).abs() < 1e-6);
        assert!((weights.iter().sum::<f32>() - 1.0).abs() < SUM_TOLERANCE);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let mut p = params();
        p.coefficients.pop();
        assert!(matches!(LinearClassifier::new("x", p), Err(ConfigError::ClassCount { actual: 2, .. })));

        let mut p = params();
        p.coefficients[1].push(0.0);
        assert!(matches!(
            LinearClassifier::new("x", p),
            Err(ConfigError::FeatureCount { actual: 6, .. })
        ));

        let mut p = params();
        p.intercepts[0] = f32::NAN;
        assert!(matches!(LinearClassifier::new("x", p), Err(ConfigError::InvalidModel(_))));
    }
}
