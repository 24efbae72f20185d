//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override these, see `logic::config`.

/// Default model manifest location
pub const DEFAULT_MODEL_MANIFEST: &str = "./prediction_data_and_model/model.json";

/// Default scaler parameters location
pub const DEFAULT_SCALER: &str = "./prediction_data_and_model/scaler.json";

/// Default sensor source
pub const DEFAULT_SOURCE: &str = "random";

/// Default number of assessments per run
pub const DEFAULT_ASSESSMENTS: usize = 1;

// ============================================
// Environment keys
// ============================================

pub const ENV_MODEL_MANIFEST: &str = "HARVESTER_MODEL_MANIFEST";
pub const ENV_SCALER: &str = "HARVESTER_SCALER";
pub const ENV_BANDS: &str = "HARVESTER_BANDS";
pub const ENV_SOURCE: &str = "HARVESTER_SOURCE";
pub const ENV_SEED: &str = "HARVESTER_SEED";
pub const ENV_ASSESSMENTS: &str = "HARVESTER_ASSESSMENTS";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Harvester Health";
