//! Calibrated Band Rules
//!
//! Operating bands per sensor, lower bound inclusive, upper bound exclusive.
//!
//! | Sensor             | Critical | Warning      | Healthy      | Warning      | Critical |
//! |--------------------|----------|--------------|--------------|--------------|----------|
//! | Hydraulic Pressure | < 175    | [175, 180)   | [180, 280)   | [280, 290)   | ≥ 290    |
//! | Oil Temperature    | < 25     | [25, 30)     | [30, 65)     | [65, 70)     | ≥ 70     |
//! | Blade RPM          | < 750    | [750, 800)   | [800, 2500)  | [2500, 2550) | ≥ 2550   |
//! | Fuel Consumption   |          |              | < 20         | [20, 23)     | ≥ 23     |
//! | Blade Sharpness    | < 50     | [50, 75)     | ≥ 75         |              |          |

use super::table::Segment;
use super::types::BandStatus::{Critical, Healthy, Warning};
use crate::logic::features::Sensor;

pub const HYDRAULIC_PRESSURE: &[Segment] = &[
    Segment::below(175.0, Critical),
    Segment::below(180.0, Warning),
    Segment::below(280.0, Healthy),
    Segment::below(290.0, Warning),
    Segment::rest(Critical),
];

pub const OIL_TEMPERATURE: &[Segment] = &[
    Segment::below(25.0, Critical),
    Segment::below(30.0, Warning),
    Segment::below(65.0, Healthy),
    Segment::below(70.0, Warning),
    Segment::rest(Critical),
];

pub const BLADE_RPM: &[Segment] = &[
    Segment::below(750.0, Critical),
    Segment::below(800.0, Warning),
    Segment::below(2500.0, Healthy),
    Segment::below(2550.0, Warning),
    Segment::rest(Critical),
];

/// Low consumption is never a fault
pub const FUEL_CONSUMPTION: &[Segment] = &[
    Segment::below(20.0, Healthy),
    Segment::below(23.0, Warning),
    Segment::rest(Critical),
];

/// A fully sharp blade (100 %) stays healthy
pub const BLADE_SHARPNESS: &[Segment] = &[
    Segment::below(50.0, Critical),
    Segment::below(75.0, Warning),
    Segment::rest(Healthy),
];

pub fn calibrated_segments(sensor: Sensor) -> &'static [Segment] {
    match sensor {
        Sensor::HydraulicPressure => HYDRAULIC_PRESSURE,
        Sensor::OilTemperature => OIL_TEMPERATURE,
        Sensor::BladeRpm => BLADE_RPM,
        Sensor::FuelConsumption => FUEL_CONSUMPTION,
        Sensor::BladeSharpness => BLADE_SHARPNESS,
    }
}
