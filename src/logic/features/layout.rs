//! Feature Layout - Centralized Sensor Definition
//!
//! **This file controls the feature schema shared with the trained model.**
//!
//! ## Rules:
//! 1. Add sensor → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove sensor → increment FEATURE_VERSION
//!
//! The scaler and the classifier were fitted on columns in exactly this order.

use std::fmt;
use std::ops::RangeInclusive;

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Total number of sensors / model features
pub const FEATURE_COUNT: usize = 5;

// ============================================================================
// SENSORS
// ============================================================================

/// The five monitored quantities, in model column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    HydraulicPressure,
    OilTemperature,
    BladeRpm,
    FuelConsumption,
    BladeSharpness,
}

/// Static description of a sensor channel
#[derive(Debug, Clone)]
pub struct SensorSpec {
    pub sensor: Sensor,
    /// Display name, also used as the feature name reported to clients
    pub label: &'static str,
    /// Key used in the `sensor_data` / `color` response objects
    pub wire_key: &'static str,
    pub unit: &'static str,
    /// Integer range drawn by the demo source
    pub demo_range: RangeInclusive<i64>,
    pub description: &'static str,
}

/// Authoritative sensor table, in column order
pub static SENSOR_SPECS: [SensorSpec; FEATURE_COUNT] = [
    SensorSpec {
        sensor: Sensor::HydraulicPressure,
        label: "Hydraulic Pressure",
        wire_key: "Hydraulic_Pressure",
        unit: "bar",
        demo_range: 145..=300,
        description: "Hydraulic system pressure for cutting performance",
    },
    SensorSpec {
        sensor: Sensor::OilTemperature,
        label: "Oil Temperature",
        wire_key: "Hydraulic_Oil_Temperature",
        unit: "°C",
        demo_range: 20..=85,
        description: "Hydraulic oil temperature, guards against overheating",
    },
    SensorSpec {
        sensor: Sensor::BladeRpm,
        label: "Blade RPM",
        wire_key: "Saw_Blade_RPM",
        unit: "RPM",
        demo_range: 700..=2700,
        description: "Saw blade rotation speed",
    },
    SensorSpec {
        sensor: Sensor::FuelConsumption,
        label: "Fuel Consumption",
        wire_key: "Fuel_Consumption",
        unit: "L/h",
        demo_range: 10..=24,
        description: "Fuel consumption rate",
    },
    SensorSpec {
        sensor: Sensor::BladeSharpness,
        label: "Blade Sharpness",
        wire_key: "Blade_Sharpness_Level",
        unit: "%",
        demo_range: 29..=100,
        description: "Saw blade sharpness level for maintenance planning",
    },
];

impl Sensor {
    pub const ALL: [Sensor; FEATURE_COUNT] = [
        Sensor::HydraulicPressure,
        Sensor::OilTemperature,
        Sensor::BladeRpm,
        Sensor::FuelConsumption,
        Sensor::BladeSharpness,
    ];

    /// Column index in the feature vector
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static SensorSpec {
        &SENSOR_SPECS[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// snake_case identifier, used in logs and error messages
    pub fn key(self) -> &'static str {
        match self {
            Sensor::HydraulicPressure => "hydraulic_pressure",
            Sensor::OilTemperature => "oil_temperature",
            Sensor::BladeRpm => "blade_rpm",
            Sensor::FuelConsumption => "fuel_consumption",
            Sensor::BladeSharpness => "blade_sharpness",
        }
    }

    pub fn from_index(index: usize) -> Option<Sensor> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches between artifacts and this build
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for spec in &SENSOR_SPECS {
        hasher.update(spec.label.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Get layout hash (computed once)
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Feature names in column order
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    SENSOR_SPECS.iter().map(|spec| spec.label)
}

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    SENSOR_SPECS.iter().position(|spec| spec.label == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    SENSOR_SPECS.get(index).map(|spec| spec.label)
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: feature_names().map(str::to_string).collect(),
        }
    }
}

/// Check an artifact's declared feature names against this layout
pub fn is_layout_compatible(names: &[String]) -> bool {
    names.len() == FEATURE_COUNT && names.iter().map(String::as_str).eq(feature_names())
}

// ============================================================================
// TESTS
// ============================================================================
