//! Input errors: the source could not be parsed or the batch framing is broken.

use super::error_code::{self, GotreeErrorCode};

/// Errors raised before any tree mapping happens.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputError {
    /// The native parser rejected the file; the message is the parser's own.
    #[error("{message}")]
    Parse { file: String, message: String },

    #[error("Truncated batch frame at byte {offset}: need {needed} bytes, {available} available")]
    TruncatedFrame {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Negative length {length} in batch frame at byte {offset}")]
    NegativeLength { offset: usize, length: i32 },

    #[error("Batch entry at byte {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },
}

impl GotreeErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => error_code::PARSE_ERROR,
            _ => error_code::INPUT_ERROR,
        }
    }
}
