//! Assessment Engine
//!
//! Owns the loaded artifacts for the life of the process. Shared across
//! threads behind an `Arc`; the only mutation after construction is the
//! statistics counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::{assemble, AssessmentResponse};
use crate::logic::bands::BandEvaluator;
use crate::logic::config::EngineConfig;
use crate::logic::error::{AssessmentError, AssessmentResult, ConfigError};
use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::features::{FeatureScaler, SensorReading, FEATURE_COUNT, SENSOR_SPECS};
use crate::logic::model::{classify, load_classifier, ClassificationResult, Classifier, ModelKind};
use crate::logic::source::SensorSource;

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_name: String,
    pub model_kind: ModelKind,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: DateTime<Utc>,
    pub assessments: u64,
    pub failures: u64,
    pub avg_latency_ms: f32,
}

#[derive(Debug, Default)]
struct EngineStats {
    assessments: AtomicU64,
    failures: AtomicU64,
    latency_sum_us: AtomicU64,
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct AssessmentEngine {
    scaler: FeatureScaler,
    classifier: Box<dyn Classifier>,
    bands: BandEvaluator,
    loaded_at: DateTime<Utc>,
    stats: EngineStats,
}

impl AssessmentEngine {
    /// Assemble an engine and run the startup probe
    pub fn new(scaler: FeatureScaler, classifier: Box<dyn Classifier>, bands: BandEvaluator) -> Result<Self, ConfigError> {
        let engine = Self {
            scaler,
            classifier,
            bands,
            loaded_at: Utc::now(),
            stats: EngineStats::default(),
        };

        engine.probe()?;
        Ok(engine)
    }

    /// Load every artifact named by the configuration
    pub fn load(config: &EngineConfig) -> Result<Self, ConfigError> {
        let scaler = FeatureScaler::load(&config.scaler)?;

        let classifier = load_classifier(&config.model_manifest)?;

        let bands = match &config.bands {
            Some(path) => BandEvaluator::load(path)?,
            None => BandEvaluator::calibrated()?,
        };

        let engine = Self::new(scaler, classifier, bands)?;
        log::info!(
            "Assessment engine ready (model: {}, kind: {:?})",
            engine.classifier.name(),
            engine.classifier.kind()
        );
        Ok(engine)
    }

    /// Classify the midpoint of the demo ranges once; any failure is fatal
    fn probe(&self) -> Result<(), ConfigError> {
        let mut values = [0.0f64; FEATURE_COUNT];
        for (value, spec) in values.iter_mut().zip(SENSOR_SPECS.iter()) {
            *value = (*spec.demo_range.start() + *spec.demo_range.end()) as f64 / 2.0;
        }

        let reading = SensorReading::new(values).map_err(|e| ConfigError::Probe(e.to_string()))?;
        match self.classify(&reading) {
            Ok(result) => {
                log::debug!("Startup probe: {} ({:.3})", result.label, result.confidence);
                Ok(())
            }
            Err(AssessmentError::Config(e)) => Err(e),
            Err(e) => Err(ConfigError::Probe(e.to_string())),
        }
    }

    /// Scale and classify, without band evaluation or statistics
    pub fn classify(&self, reading: &SensorReading) -> AssessmentResult<ClassificationResult> {
        let features = self.scaler.scale(reading)?;
        log::trace!("Scaled features: {}", features.to_log_entry());
        classify(self.classifier.as_ref(), &features)
    }

    /// Full pipeline for one reading
    pub fn assess(&self, reading: &SensorReading) -> AssessmentResult<AssessmentResponse> {
        let start_time = Instant::now();

        let result = self.classify(reading).map(|classification| {
            let statuses = self.bands.evaluate(reading);
            assemble(reading, &classification, &statuses)
        });

        match &result {
            Ok(response) => {
                let elapsed_us = start_time.elapsed().as_micros() as u64;
                self.stats.assessments.fetch_add(1, Ordering::Relaxed);
                self.stats.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
                log::debug!(
                    "Assessed {:?}: {} ({:.3}), worst band {}, in {}us",
                    reading.values(),
                    response.prediction,
                    response.confidence,
                    response.color.worst().color(),
                    elapsed_us
                );
            }
            Err(_) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
            }
        }

        result
    }

    /// Pull the next reading from `source` and assess it
    pub fn assess_next(&self, source: &mut dyn SensorSource) -> AssessmentResult<AssessmentResponse> {
        let reading = match source.next_reading() {
            Ok(reading) => reading,
            Err(AssessmentError::Exhausted) => return Err(AssessmentError::Exhausted),
            Err(e) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };

        self.assess(&reading)
    }

    pub fn bands(&self) -> &BandEvaluator {
        &self.bands
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let count = self.stats.assessments.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_name: self.classifier.name().to_string(),
            model_kind: self.classifier.kind(),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            loaded_at: self.loaded_at,
            assessments: count,
            failures: self.stats.failures.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}

impl std::fmt::Debug for AssessmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentEngine")
            .field("model", &self.classifier.name())
            .field("scaler", &self.scaler)
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}
