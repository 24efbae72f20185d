//! Assess Module - the per-request pipeline
//!
//! reading → scale → classify → bands → response

pub mod engine;
pub mod response;

#[cfg(test)]
mod tests;

pub use engine::{AssessmentEngine, EngineStatus};
pub use response::{assemble, AssessmentResponse};
