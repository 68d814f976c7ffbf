//! GotreeErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code next to its human-readable message.
pub trait GotreeErrorCode {
    /// Returns the error code string (e.g., "CONVERT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const CONVERT_ERROR: &str = "CONVERT_ERROR";
pub const POSITION_ERROR: &str = "POSITION_ERROR";
pub const TOKEN_MISMATCH: &str = "TOKEN_MISMATCH";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
