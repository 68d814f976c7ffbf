//! Shared infrastructure for the gotree converter: errors, layered
//! configuration, tracing bootstrap, constants and collection aliases.

pub mod collections;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;

pub use config::GotreeConfig;
pub use errors::{GotreeErrorCode, PipelineError, PipelineResult};
