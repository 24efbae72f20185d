//! Pipeline tests: scaler + linear classifier + calibrated bands

use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use super::*;
use crate::logic::bands::{BandEvaluator, BandStatus, SensorStatuses};
use crate::logic::config::EngineConfig;
use crate::logic::error::{AssessmentError, ComputationError, ConfigError};
use crate::logic::features::{FeatureScaler, FeatureVector, ScalerParams, SensorReading};
use crate::logic::model::{
    Classifier, ConditionLabel, FeatureImportances, LinearClassifier, LinearParams, ModelKind,
};
use crate::logic::source::{JsonLinesSource, RandomSensorSource, ReplaySource, SensorSource, SourceSetting};

// ============================================================================
// FIXTURES
// ============================================================================

const MEAN: [f64; 5] = [220.0, 52.0, 1700.0, 17.0, 65.0];
const SCALE: [f64; 5] = [45.0, 19.0, 577.0, 4.0, 20.0];

fn scaler() -> FeatureScaler {
    FeatureScaler::from_params(ScalerParams::Standard {
        mean: MEAN.to_vec(),
        scale: SCALE.to_vec(),
    })
    .unwrap()
}

fn linear_params() -> LinearParams {
    LinearParams {
        coefficients: vec![
            vec![-0.5, -1.0, -0.5, -1.0, 1.0],
            vec![0.2, 1.5, 0.3, 1.5, 0.0],
            vec![0.3, 0.5, 0.2, 0.5, -2.0],
        ],
        intercepts: vec![1.0, 0.0, -0.5],
    }
}

fn engine() -> AssessmentEngine {
    AssessmentEngine::new(
        scaler(),
        Box::new(LinearClassifier::new("fixture", linear_params()).unwrap()),
        BandEvaluator::calibrated().unwrap(),
    )
    .unwrap()
}

fn reading(values: [f64; 5]) -> SensorReading {
    SensorReading::new(values).unwrap()
}

/// Reports a class with no condition label
#[derive(Debug)]
struct Unmapped {
    importances: FeatureImportances,
}

impl Classifier for Unmapped {
    fn name(&self) -> &str {
        "unmapped"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Linear
    }

    fn predict(&self, _: &FeatureVector) -> Result<usize, ComputationError> {
        Ok(3)
    }

    fn predict_distribution(&self, _: &FeatureVector) -> Result<Vec<f32>, ComputationError> {
        Ok(vec![0.2, 0.3, 0.5])
    }

    fn feature_importances(&self) -> &FeatureImportances {
        &self.importances
    }
}

/// Returns a distribution that does not sum to one
#[derive(Debug)]
struct Unnormalized {
    importances: FeatureImportances,
}

impl Classifier for Unnormalized {
    fn name(&self) -> &str {
        "unnormalized"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Linear
    }

    fn predict(&self, _: &FeatureVector) -> Result<usize, ComputationError> {
        Ok(0)
    }

    fn predict_distribution(&self, _: &FeatureVector) -> Result<Vec<f32>, ComputationError> {
        Ok(vec![0.9, 0.3, 0.1])
    }

    fn feature_importances(&self) -> &FeatureImportances {
        &self.importances
    }
}

fn uniform_importances() -> FeatureImportances {
    FeatureImportances::normalized(&[1.0; 5]).unwrap()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_nominal_reading_is_all_good() {
    let response = engine().assess(&reading([200.0, 50.0, 1500.0, 15.0, 90.0])).unwrap();

    assert_eq!(response.prediction, ConditionLabel::Healthy);
    assert_eq!(response.color, SensorStatuses::from_fn(|_| BandStatus::Healthy));
    assert_eq!(response.sensor_data, reading([200.0, 50.0, 1500.0, 15.0, 90.0]));
    assert!(response.confidence > 0.9);
}

#[test]
fn test_degraded_reading() {
    let response = engine().assess(&reading([170.0, 50.0, 1500.0, 24.0, 49.0])).unwrap();

    assert_eq!(response.color.hydraulic_pressure, BandStatus::Critical);
    assert_eq!(response.color.fuel_consumption, BandStatus::Critical);
    assert_eq!(response.color.blade_sharpness, BandStatus::Critical);
    assert_eq!(response.color.oil_temperature, BandStatus::Healthy);
    assert_eq!(response.prediction, ConditionLabel::MaintenanceDue);
    assert_eq!(response.color.worst(), BandStatus::Critical);
}

#[test]
fn test_sharpness_boundary_through_pipeline() {
    let e = engine();
    let at_49 = e.assess(&reading([200.0, 50.0, 1500.0, 15.0, 49.0])).unwrap();
    let at_50 = e.assess(&reading([200.0, 50.0, 1500.0, 15.0, 50.0])).unwrap();

    assert_eq!(at_49.color.blade_sharpness, BandStatus::Critical);
    assert_eq!(at_50.color.blade_sharpness, BandStatus::Warning);
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_distribution_properties_over_demo_stream() {
    let e = engine();
    let mut source = RandomSensorSource::new(99);

    for _ in 0..500 {
        let r = source.next_reading().unwrap();
        let result = e.classify(&r).unwrap();

        let probs = result.distribution.probabilities();
        assert!(probs.iter().all(|p| *p >= 0.0));
        assert!((probs.iter().sum::<f32>() - 1.0).abs() <= 1e-4);
        assert_eq!(result.confidence, result.distribution.max());
        assert_eq!(result.label.class_index(), result.distribution.argmax());
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
    }
}

#[test]
fn test_importances_identical_across_requests() {
    let e = engine();
    let mut source = RandomSensorSource::new(5);

    let first = e.assess_next(&mut source).unwrap();
    let weights = first.importances().unwrap();
    assert!((weights.weights().iter().sum::<f32>() - 1.0).abs() <= 1e-4);
    assert!(weights.weights().iter().all(|w| *w >= 0.0));

    for _ in 0..50 {
        let next = e.assess_next(&mut source).unwrap();
        assert_eq!(next.feature_importance, first.feature_importance);
    }
}

#[test]
fn test_every_demo_value_gets_a_status() {
    let e = engine();
    let mut source = RandomSensorSource::new(11);

    for _ in 0..200 {
        let response = e.assess_next(&mut source).unwrap();
        let statuses = response.color.as_array();
        assert_eq!(statuses.len(), 5);
    }
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_overflowing_reading_fails_request_only() {
    let e = engine();

    let err = e.assess(&reading([1e300, 50.0, 1500.0, 15.0, 90.0])).unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::Computation(ComputationError::NonFiniteFeature { feature: "Hydraulic Pressure", .. })
    ));
    assert!(!err.is_fatal());

    // engine keeps serving
    assert!(e.assess(&reading([200.0, 50.0, 1500.0, 15.0, 90.0])).is_ok());
}

#[test]
fn test_malformed_source_line_is_not_fatal() {
    let e = engine();
    let capture = "{\"Hydraulic_Pressure\": \"n/a\"}\n\
                   {\"Hydraulic_Pressure\": 200, \"Hydraulic_Oil_Temperature\": 50, \"Saw_Blade_RPM\": 1500, \"Fuel_Consumption\": 15, \"Blade_Sharpness_Level\": 90}\n";
    let mut source = JsonLinesSource::new(Cursor::new(capture));

    let err = e.assess_next(&mut source).unwrap_err();
    assert!(matches!(err, AssessmentError::Validation(_)));

    assert!(e.assess_next(&mut source).is_ok());
    assert!(matches!(e.assess_next(&mut source), Err(AssessmentError::Exhausted)));

    let status = e.status();
    assert_eq!(status.assessments, 1);
    assert_eq!(status.failures, 1);
}

#[test]
fn test_unmapped_class_fails_startup() {
    let err = AssessmentEngine::new(
        scaler(),
        Box::new(Unmapped { importances: uniform_importances() }),
        BandEvaluator::calibrated().unwrap(),
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::UnmappedClass(3)));
}

#[test]
fn test_invalid_distribution_fails_probe() {
    let err = AssessmentEngine::new(
        scaler(),
        Box::new(Unnormalized { importances: uniform_importances() }),
        BandEvaluator::calibrated().unwrap(),
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Probe(_)));
}

// ============================================================================
// STATUS & CONCURRENCY
// ============================================================================

#[test]
fn test_status_counts_assessments() {
    let e = engine();
    let mut source = ReplaySource::once(vec![
        reading([200.0, 50.0, 1500.0, 15.0, 90.0]),
        reading([170.0, 50.0, 1500.0, 24.0, 49.0]),
    ]);

    while e.assess_next(&mut source).is_ok() {}

    let status = e.status();
    assert_eq!(status.model_name, "fixture");
    assert_eq!(status.model_kind, ModelKind::Linear);
    assert_eq!(status.assessments, 2);
    assert_eq!(status.failures, 0);
    assert!(status.avg_latency_ms >= 0.0);

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["model_kind"], "linear");
}

#[test]
fn test_concurrent_requests_match_sequential() {
    let e = Arc::new(engine());

    let mut handles = Vec::new();
    for seed in 0..4u64 {
        let e = Arc::clone(&e);
        handles.push(thread::spawn(move || {
            let mut source = RandomSensorSource::new(seed);
            (0..100).map(|_| e.assess_next(&mut source).unwrap()).collect::<Vec<_>>()
        }));
    }

    for (seed, handle) in handles.into_iter().enumerate() {
        let concurrent = handle.join().unwrap();

        let mut source = RandomSensorSource::new(seed as u64);
        for response in concurrent {
            let expected = e.assess_next(&mut source).unwrap();
            assert_eq!(response, expected);
        }
    }

    assert_eq!(e.status().assessments, 800);
}

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_load_from_config() {
    let dir = tempfile::tempdir().unwrap();

    let scaler_path = dir.path().join("scaler.json");
    fs::write(
        &scaler_path,
        serde_json::to_string(&ScalerParams::Standard {
            mean: MEAN.to_vec(),
            scale: SCALE.to_vec(),
        })
        .unwrap(),
    )
    .unwrap();

    let manifest_path = dir.path().join("model.json");
    let manifest = serde_json::json!({
        "kind": "linear",
        "name": "harvester-logreg",
        "feature_names": ["Hydraulic Pressure", "Oil Temperature", "Blade RPM", "Fuel Consumption", "Blade Sharpness"],
        "coefficients": linear_params().coefficients,
        "intercepts": linear_params().intercepts,
    });
    fs::write(&manifest_path, manifest.to_string()).unwrap();

    let config = EngineConfig {
        model_manifest: manifest_path,
        scaler: scaler_path,
        bands: None,
        source: SourceSetting::Random,
        seed: Some(3),
        assessments: 1,
    };

    let e = AssessmentEngine::load(&config).unwrap();
    assert_eq!(e.status().model_name, "harvester-logreg");

    let mut source = config.source.open(config.seed).unwrap();
    assert!(e.assess_next(source.as_mut()).is_ok());
}

#[test]
fn test_load_missing_scaler_is_fatal() {
    let config = EngineConfig {
        scaler: "/nonexistent/scaler.json".into(),
        ..EngineConfig::default()
    };

    let err = AssessmentEngine::load(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ArtifactMissing(_)));
    assert!(AssessmentError::from(err).is_fatal());
}
