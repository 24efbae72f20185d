//! Sensor Reading - one raw sample of the five monitored quantities
//!
//! Readings are validated on construction: exactly five finite values.
//! Serialized field names follow the dashboard contract
//! (`Hydraulic_Pressure`, `Saw_Blade_RPM`, ...).

use serde::{Deserialize, Serialize};

use super::layout::{Sensor, FEATURE_COUNT};
use crate::logic::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    #[serde(rename = "Hydraulic_Pressure")]
    hydraulic_pressure: f64,
    #[serde(rename = "Hydraulic_Oil_Temperature")]
    oil_temperature: f64,
    #[serde(rename = "Saw_Blade_RPM")]
    blade_rpm: f64,
    #[serde(rename = "Fuel_Consumption")]
    fuel_consumption: f64,
    #[serde(rename = "Blade_Sharpness_Level")]
    blade_sharpness: f64,
}

/// Unvalidated wire form, see `SensorReading::from_json`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReading {
    #[serde(rename = "Hydraulic_Pressure")]
    hydraulic_pressure: f64,
    #[serde(rename = "Hydraulic_Oil_Temperature")]
    oil_temperature: f64,
    #[serde(rename = "Saw_Blade_RPM")]
    blade_rpm: f64,
    #[serde(rename = "Fuel_Consumption")]
    fuel_consumption: f64,
    #[serde(rename = "Blade_Sharpness_Level")]
    blade_sharpness: f64,
}

impl SensorReading {
    /// Build a reading from values in column order
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, ValidationError> {
        for (sensor, &value) in Sensor::ALL.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    sensor: sensor.key(),
                    value,
                });
            }
        }

        let [hydraulic_pressure, oil_temperature, blade_rpm, fuel_consumption, blade_sharpness] = values;
        Ok(Self {
            hydraulic_pressure,
            oil_temperature,
            blade_rpm,
            fuel_consumption,
            blade_sharpness,
        })
    }

    /// Build a reading from a slice of arbitrary length
    pub fn from_slice(values: &[f64]) -> Result<Self, ValidationError> {
        let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| ValidationError::Dimension {
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;
        Self::new(array)
    }

    /// Parse one JSON object with the dashboard field names
    pub fn from_json(input: &str) -> Result<Self, ValidationError> {
        let raw: RawReading = serde_json::from_str(input)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;

        Self::new([
            raw.hydraulic_pressure,
            raw.oil_temperature,
            raw.blade_rpm,
            raw.fuel_consumption,
            raw.blade_sharpness,
        ])
    }

    pub fn hydraulic_pressure(&self) -> f64 {
        self.hydraulic_pressure
    }

    pub fn oil_temperature(&self) -> f64 {
        self.oil_temperature
    }

    pub fn blade_rpm(&self) -> f64 {
        self.blade_rpm
    }

    pub fn fuel_consumption(&self) -> f64 {
        self.fuel_consumption
    }

    pub fn blade_sharpness(&self) -> f64 {
        self.blade_sharpness
    }

    pub fn get(&self, sensor: Sensor) -> f64 {
        match sensor {
            Sensor::HydraulicPressure => self.hydraulic_pressure,
            Sensor::OilTemperature => self.oil_temperature,
            Sensor::BladeRpm => self.blade_rpm,
            Sensor::FuelConsumption => self.fuel_consumption,
            Sensor::BladeSharpness => self.blade_sharpness,
        }
    }

    /// Values in column order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.hydraulic_pressure,
            self.oil_temperature,
            self.blade_rpm,
            self.fuel_consumption,
            self.blade_sharpness,
        ]
    }
}

impl TryFrom<Vec<f64>> for SensorReading {
    type Error = ValidationError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl<'de> Deserialize<'de> for SensorReading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawReading::deserialize(deserializer)?;
        SensorReading::new([
            raw.hydraulic_pressure,
            raw.oil_temperature,
            raw.blade_rpm,
            raw.fuel_consumption,
            raw.blade_sharpness,
        ])
        .map_err(serde::de::Error::custom)
    }
}
