//! Band status types - one traffic light per sensor

use serde::{Deserialize, Serialize};

use crate::logic::features::{Sensor, FEATURE_COUNT};

/// Traffic-light status of one sensor, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BandStatus {
    #[serde(rename = "green")]
    Healthy,
    #[serde(rename = "yellow")]
    Warning,
    #[serde(rename = "red")]
    Critical,
}

impl BandStatus {
    pub fn color(self) -> &'static str {
        match self {
            BandStatus::Healthy => "green",
            BandStatus::Warning => "yellow",
            BandStatus::Critical => "red",
        }
    }
}

/// One status per sensor, keyed like `sensor_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorStatuses {
    #[serde(rename = "Hydraulic_Pressure")]
    pub hydraulic_pressure: BandStatus,
    #[serde(rename = "Hydraulic_Oil_Temperature")]
    pub oil_temperature: BandStatus,
    #[serde(rename = "Saw_Blade_RPM")]
    pub blade_rpm: BandStatus,
    #[serde(rename = "Fuel_Consumption")]
    pub fuel_consumption: BandStatus,
    #[serde(rename = "Blade_Sharpness_Level")]
    pub blade_sharpness: BandStatus,
}

impl SensorStatuses {
    pub fn from_fn(mut f: impl FnMut(Sensor) -> BandStatus) -> Self {
        Self {
            hydraulic_pressure: f(Sensor::HydraulicPressure),
            oil_temperature: f(Sensor::OilTemperature),
            blade_rpm: f(Sensor::BladeRpm),
            fuel_consumption: f(Sensor::FuelConsumption),
            blade_sharpness: f(Sensor::BladeSharpness),
        }
    }

    pub fn get(&self, sensor: Sensor) -> BandStatus {
        match sensor {
            Sensor::HydraulicPressure => self.hydraulic_pressure,
            Sensor::OilTemperature => self.oil_temperature,
            Sensor::BladeRpm => self.blade_rpm,
            Sensor::FuelConsumption => self.fuel_consumption,
            Sensor::BladeSharpness => self.blade_sharpness,
        }
    }

    pub fn as_array(&self) -> [BandStatus; FEATURE_COUNT] {
        Sensor::ALL.map(|s| self.get(s))
    }

    /// Most severe status across all sensors
    pub fn worst(&self) -> BandStatus {
        self.as_array().into_iter().max().unwrap_or(BandStatus::Healthy)
    }
}
