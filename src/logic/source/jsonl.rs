//! JSON-lines telemetry feed
//!
//! One reading per line, dashboard field names:
//! `{"Hydraulic_Pressure": 231, "Hydraulic_Oil_Temperature": 48, ...}`
//! A bad line fails only the request that reads it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::SensorSource;
use crate::logic::error::{AssessmentError, AssessmentResult, ConfigError, ValidationError};
use crate::logic::features::SensorReading;

pub struct JsonLinesSource<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::ArtifactMissing(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Reading sensor telemetry from: {}", path.display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> SensorSource for JsonLinesSource<R> {
    fn next_reading(&mut self) -> AssessmentResult<SensorReading> {
        loop {
            self.buffer.clear();
            // a failed read has still consumed its line
            let read = match self.reader.read_line(&mut self.buffer) {
                Ok(read) => read,
                Err(e) => {
                    self.line_number += 1;
                    return Err(AssessmentError::Source(format!("line {}: {}", self.line_number, e)));
                }
            };

            if read == 0 {
                return Err(AssessmentError::Exhausted);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }

            return SensorReading::from_json(line).map_err(|e| {
                let detail = match e {
                    ValidationError::Malformed(msg) => msg,
                    other => other.to_string(),
                };
                ValidationError::Malformed(format!("line {}: {}", self.line_number, detail)).into()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CAPTURE: &str = r#"{"Hydraulic_Pressure": 200, "Hydraulic_Oil_Temperature": 50, "Saw_Blade_RPM": 1500, "Fuel_Consumption": 15, "Blade_Sharpness_Level": 90}

{"Hydraulic_Pressure": 200, "Hydraulic_Oil_Temperature": "hot"}
{"Hydraulic_Pressure": 170.5, "Hydraulic_Oil_Temperature": 50, "Saw_Blade_RPM": 1500, "Fuel_Consumption": 24, "Blade_Sharpness_Level": 49}
"#;

    #[test]
    fn test_reads_lines_and_isolates_bad_ones() {
        let mut source = JsonLinesSource::new(Cursor::new(CAPTURE));

        let first = source.next_reading().unwrap();
        assert_eq!(first.blade_rpm(), 1500.0);

        let err = source.next_reading().unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("line 3"));

        let third = source.next_reading().unwrap();
        assert_eq!(third.hydraulic_pressure(), 170.5);
        assert_eq!(source.line_number(), 4);

        assert!(matches!(source.next_reading(), Err(AssessmentError::Exhausted)));
    }

    #[test]
    fn test_unreadable_lines_keep_numbering() {
        let mut capture = b"\xff\xfe\n\xff\n".to_vec();
        capture.extend_from_slice(CAPTURE.lines().next().unwrap_or_default().as_bytes());
        capture.push(b'\n');
        let mut source = JsonLinesSource::new(Cursor::new(capture));

        let first = source.next_reading().unwrap_err();
        assert!(matches!(first, AssessmentError::Source(ref msg) if msg.starts_with("line 1:")));

        let second = source.next_reading().unwrap_err();
        assert!(matches!(second, AssessmentError::Source(ref msg) if msg.starts_with("line 2:")));

        assert!(source.next_reading().is_ok());
        assert_eq!(source.line_number(), 3);
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.jsonl");
        std::fs::write(&path, CAPTURE).unwrap();

        let mut source = JsonLinesSource::open(&path).unwrap();
        assert!(source.next_reading().is_ok());
    }
}
