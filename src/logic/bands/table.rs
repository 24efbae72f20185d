//! Band Table - per-sensor interval strategy
//!
//! A table is an ordered list of half-open `[lower, upper)` bands that are
//! contiguous, non-overlapping and span the whole real line, so every finite
//! value lands in exactly one band.

use serde::{Deserialize, Serialize};

use super::types::BandStatus;
use crate::logic::error::ConfigError;
use crate::logic::features::Sensor;

/// `[lower, upper)` with a status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub status: BandStatus,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

/// Table definition form: bands listed by exclusive upper bound,
/// each starting where the previous one ended. `None` = +∞.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub upper: Option<f64>,
    pub status: BandStatus,
}

impl Segment {
    pub const fn below(upper: f64, status: BandStatus) -> Self {
        Self { upper: Some(upper), status }
    }

    pub const fn rest(status: BandStatus) -> Self {
        Self { upper: None, status }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    sensor: Sensor,
    bands: Vec<Band>,
}

impl BandTable {
    /// Validate bands: contiguous, ascending, covering (-∞, +∞)
    pub fn new(sensor: Sensor, bands: Vec<Band>) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::BandTable {
            sensor: sensor.key(),
            reason,
        };

        let (first, last) = match (bands.first(), bands.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(invalid("no bands".to_string())),
        };

        if first.lower != f64::NEG_INFINITY {
            return Err(invalid(format!("first band starts at {}, not -inf", first.lower)));
        }
        if last.upper != f64::INFINITY {
            return Err(invalid(format!("last band ends at {}, not +inf", last.upper)));
        }

        for band in &bands {
            if band.lower.is_nan() || band.upper.is_nan() || band.lower >= band.upper {
                return Err(invalid(format!("empty band [{}, {})", band.lower, band.upper)));
            }
        }

        for pair in bands.windows(2) {
            if pair[0].upper != pair[1].lower {
                return Err(invalid(format!(
                    "gap or overlap between {} and {}",
                    pair[0].upper, pair[1].lower
                )));
            }
        }

        Ok(Self { sensor, bands })
    }

    /// Build from ascending segments
    pub fn from_segments(sensor: Sensor, segments: &[Segment]) -> Result<Self, ConfigError> {
        let mut lower = f64::NEG_INFINITY;
        let mut bands = Vec::with_capacity(segments.len());

        for segment in segments {
            let upper = segment.upper.unwrap_or(f64::INFINITY);
            bands.push(Band {
                lower,
                upper,
                status: segment.status,
            });
            lower = upper;
        }

        Self::new(sensor, bands)
    }

    pub fn sensor(&self) -> Sensor {
        self.sensor
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Healthy bands first, then warning shoulders; anything else is critical
    pub fn evaluate(&self, value: f64) -> BandStatus {
        for status in [BandStatus::Healthy, BandStatus::Warning] {
            if self.bands.iter().any(|b| b.status == status && b.contains(value)) {
                return status;
            }
        }
        BandStatus::Critical
    }

    /// Number of bands containing `value`; 1 for every finite value
    pub fn coverage(&self, value: f64) -> usize {
        self.bands.iter().filter(|b| b.contains(value)).count()
    }
}
