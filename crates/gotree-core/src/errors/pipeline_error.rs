//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, GotreeErrorCode};
use super::{ConfigError, ConvertError, InputError};

/// Errors that can occur during a batch conversion.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Worker pool could not be built: {0}")]
    ThreadPool(String),
}

impl GotreeErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.error_code(),
            Self::Convert(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::ThreadPool(_) => error_code::PIPELINE_ERROR,
        }
    }
}

/// A pipeline error attributed to the file that raised it.
#[derive(Debug)]
pub struct FileError {
    pub file: String,
    pub error: PipelineError,
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Allows partial results to be returned even when some files fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the pipeline run.
    pub errors: Vec<FileError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result without errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, file: impl Into<String>, error: impl Into<PipelineError>) {
        self.errors.push(FileError {
            file: file.into(),
            error: error.into(),
        });
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
