//! Sensor Sources - where readings come from
//!
//! The engine only needs `next_reading()`. The demo generator, a fixed
//! replay list and a JSON-lines telemetry feed all plug in here without
//! touching downstream components.

pub mod jsonl;
pub mod random;
pub mod replay;

use std::path::PathBuf;

use crate::logic::error::{AssessmentResult, ConfigError};
use crate::logic::features::SensorReading;

pub use jsonl::JsonLinesSource;
pub use random::RandomSensorSource;
pub use replay::ReplaySource;

/// Supplies one raw reading per request
pub trait SensorSource {
    fn next_reading(&mut self) -> AssessmentResult<SensorReading>;
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn next_reading(&mut self) -> AssessmentResult<SensorReading> {
        (**self).next_reading()
    }
}

/// Configured source kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSetting {
    Random,
    JsonLines(PathBuf),
}

impl SourceSetting {
    /// `"random"` or a path to a JSON-lines capture
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "random" => SourceSetting::Random,
            path => SourceSetting::JsonLines(PathBuf::from(path)),
        }
    }

    pub fn open(&self, seed: Option<u64>) -> Result<Box<dyn SensorSource>, ConfigError> {
        match self {
            SourceSetting::Random => {
                let source = match seed {
                    Some(seed) => RandomSensorSource::new(seed),
                    None => RandomSensorSource::from_entropy(),
                };
                Ok(Box::new(source))
            }
            SourceSetting::JsonLines(path) => Ok(Box::new(JsonLinesSource::open(path)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_setting() {
        assert_eq!(SourceSetting::parse("random"), SourceSetting::Random);
        assert_eq!(SourceSetting::parse(""), SourceSetting::Random);
        assert_eq!(
            SourceSetting::parse("/var/log/harvester/readings.jsonl"),
            SourceSetting::JsonLines(PathBuf::from("/var/log/harvester/readings.jsonl"))
        );
    }

    #[test]
    fn test_open_random_source() {
        let mut source = SourceSetting::Random.open(Some(7)).unwrap();
        assert!(source.next_reading().is_ok());
    }

    #[test]
    fn test_open_missing_capture() {
        let result = SourceSetting::parse("/nonexistent/readings.jsonl").open(None);
        assert!(matches!(result, Err(ConfigError::ArtifactMissing(_))));
    }
}
