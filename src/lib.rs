//! Harvester Health - Sensor Assessment Core
//!
//! Turns one reading of five harvester sensors into an equipment-condition
//! verdict with per-sensor traffic-light statuses.

pub mod constants;
pub mod logic;

pub use logic::assess::{AssessmentEngine, AssessmentResponse, EngineStatus};
pub use logic::config::EngineConfig;
pub use logic::error::{AssessmentError, AssessmentResult, ConfigError};
