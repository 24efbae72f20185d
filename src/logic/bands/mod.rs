//! Bands Module - per-sensor traffic-light evaluation
//!
//! Pure threshold logic on raw values, independent of the classifier.
//! Operators get an immediately readable per-sensor signal next to the
//! model's overall verdict.

pub mod rules;
pub mod table;
pub mod types;

use std::path::Path;

use serde::Deserialize;

use crate::logic::error::ConfigError;
use crate::logic::features::{Sensor, SensorReading};

// Re-export common types
pub use table::{Band, BandTable, Segment};
pub use types::{BandStatus, SensorStatuses};

/// Optional per-sensor overrides read from the bands file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BandOverrides {
    hydraulic_pressure: Option<Vec<Segment>>,
    oil_temperature: Option<Vec<Segment>>,
    blade_rpm: Option<Vec<Segment>>,
    fuel_consumption: Option<Vec<Segment>>,
    blade_sharpness: Option<Vec<Segment>>,
}

impl BandOverrides {
    fn take(&mut self, sensor: Sensor) -> Option<Vec<Segment>> {
        match sensor {
            Sensor::HydraulicPressure => self.hydraulic_pressure.take(),
            Sensor::OilTemperature => self.oil_temperature.take(),
            Sensor::BladeRpm => self.blade_rpm.take(),
            Sensor::FuelConsumption => self.fuel_consumption.take(),
            Sensor::BladeSharpness => self.blade_sharpness.take(),
        }
    }
}

/// One validated table per sensor, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct BandEvaluator {
    tables: Vec<BandTable>,
}

impl BandEvaluator {
    pub fn new(tables: Vec<BandTable>) -> Result<Self, ConfigError> {
        if tables.len() != Sensor::ALL.len() {
            return Err(ConfigError::FeatureCount {
                what: "band tables",
                expected: Sensor::ALL.len(),
                actual: tables.len(),
            });
        }

        for (table, sensor) in tables.iter().zip(Sensor::ALL) {
            if table.sensor() != sensor {
                return Err(ConfigError::BandTable {
                    sensor: sensor.key(),
                    reason: format!("table for {} found in its place", table.sensor().key()),
                });
            }
        }

        Ok(Self { tables })
    }

    /// Factory calibration
    pub fn calibrated() -> Result<Self, ConfigError> {
        let tables = Sensor::ALL
            .iter()
            .map(|&sensor| BandTable::from_segments(sensor, rules::calibrated_segments(sensor)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tables)
    }

    /// Calibrated tables with overrides from a JSON file:
    /// `{ "blade_rpm": [{"upper": 700, "status": "red"}, ..., {"upper": null, "status": "red"}] }`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading band overrides from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::ArtifactMissing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut overrides: BandOverrides = serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut tables = Vec::with_capacity(Sensor::ALL.len());
        for sensor in Sensor::ALL {
            let table = match overrides.take(sensor) {
                Some(segments) => {
                    log::info!("Using custom bands for {}", sensor);
                    BandTable::from_segments(sensor, &segments)?
                }
                None => BandTable::from_segments(sensor, rules::calibrated_segments(sensor))?,
            };
            tables.push(table);
        }

        Self::new(tables)
    }

    pub fn table(&self, sensor: Sensor) -> &BandTable {
        &self.tables[sensor.index()]
    }

    pub fn evaluate_one(&self, sensor: Sensor, value: f64) -> BandStatus {
        self.table(sensor).evaluate(value)
    }

    /// Status of every sensor in a reading
    pub fn evaluate(&self, reading: &SensorReading) -> SensorStatuses {
        SensorStatuses::from_fn(|sensor| self.evaluate_one(sensor, reading.get(sensor)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
