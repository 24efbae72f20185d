//! Replay source for fixed reading lists

use super::SensorSource;
use crate::logic::error::{AssessmentError, AssessmentResult};
use crate::logic::features::SensorReading;

/// Replays a fixed list of readings, optionally forever
#[derive(Debug, Clone)]
pub struct ReplaySource {
    readings: Vec<SensorReading>,
    position: usize,
    cycle: bool,
}

impl ReplaySource {
    /// Loop over `readings` indefinitely
    pub fn cycling(readings: Vec<SensorReading>) -> Self {
        Self {
            readings,
            position: 0,
            cycle: true,
        }
    }

    /// Yield each reading once, then report exhaustion
    pub fn once(readings: Vec<SensorReading>) -> Self {
        Self {
            readings,
            position: 0,
            cycle: false,
        }
    }
}

impl SensorSource for ReplaySource {
    fn next_reading(&mut self) -> AssessmentResult<SensorReading> {
        if self.readings.is_empty() {
            return Err(AssessmentError::Exhausted);
        }

        if self.position >= self.readings.len() {
            if !self.cycle {
                return Err(AssessmentError::Exhausted);
            }
            self.position = 0;
        }

        let reading = self.readings[self.position];
        self.position += 1;
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings() -> Vec<SensorReading> {
        vec![
            SensorReading::new([200.0, 50.0, 1500.0, 15.0, 90.0]).unwrap(),
            SensorReading::new([170.0, 50.0, 1500.0, 24.0, 49.0]).unwrap(),
        ]
    }

    #[test]
    fn test_once_exhausts() {
        let mut source = ReplaySource::once(readings());
        assert_eq!(source.next_reading().unwrap(), readings()[0]);
        assert_eq!(source.next_reading().unwrap(), readings()[1]);
        assert!(matches!(source.next_reading(), Err(AssessmentError::Exhausted)));
    }

    #[test]
    fn test_cycling_wraps() {
        let mut source = ReplaySource::cycling(readings());
        for i in 0..5 {
            assert_eq!(source.next_reading().unwrap(), readings()[i % 2]);
        }
    }

    #[test]
    fn test_empty_is_exhausted() {
        let mut source = ReplaySource::cycling(Vec::new());
        assert!(matches!(source.next_reading(), Err(AssessmentError::Exhausted)));
    }
}
