//! Harvester Health - Main Entry Point

use std::io::Write;
use std::process::ExitCode;

use harvester_health::constants::{APP_NAME, APP_VERSION};
use harvester_health::logic::error::AssessmentError;
use harvester_health::{AssessmentEngine, EngineConfig};

fn main() -> ExitCode {
    // .env is optional
    let dotenv = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);
    if let Ok(path) = dotenv {
        log::info!("Loaded environment from: {}", path.display());
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AssessmentError> {
    let config = EngineConfig::from_env()?;
    log::debug!("Configuration: {:?}", config);

    let engine = AssessmentEngine::load(&config)?;
    let mut source = config.source.open(config.seed)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut served = 0usize;

    while config.assessments == 0 || served < config.assessments {
        served += 1;

        match engine.assess_next(source.as_mut()) {
            Ok(response) => match response.to_json() {
                Ok(line) => {
                    if let Err(e) = writeln!(out, "{}", line) {
                        log::error!("Failed to write response: {}", e);
                        break;
                    }
                }
                Err(e) => log::warn!("Failed to encode response: {}", e),
            },
            Err(AssessmentError::Exhausted) => {
                log::info!("Sensor source exhausted");
                break;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("Assessment failed: {}", e),
        }
    }

    let status = engine.status();
    log::info!(
        "Done: {} assessments, {} failures, avg {:.3}ms (model: {})",
        status.assessments,
        status.failures,
        status.avg_latency_ms,
        status.model_name
    );

    Ok(())
}
