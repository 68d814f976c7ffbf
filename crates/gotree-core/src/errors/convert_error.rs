//! Internal-consistency errors raised while building the generic tree.
//!
//! These never describe bad user input: they mean the mapping schema and the
//! source text disagree. In strict mode they abort the file being converted.

use std::fmt;

use super::error_code::{self, GotreeErrorCode};

/// Where in a file an internal-consistency error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub offset: usize,
    pub end_offset: usize,
    /// 1-based line and 1-based column of `offset`, when it lies inside the file.
    pub line_column: Option<(usize, usize)>,
}

impl Location {
    pub fn new(file: impl Into<String>, offset: usize, end_offset: usize) -> Self {
        Self {
            file: file.into(),
            offset,
            end_offset,
            line_column: None,
        }
    }

    pub fn with_line_column(mut self, line: usize, column: usize) -> Self {
        self.line_column = Some((line, column));
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " at offset {}:{} for file {}",
            self.offset, self.end_offset, self.file
        )?;
        if let Some((line, column)) = self.line_column {
            write!(f, ":{line}:{column}")?;
        }
        Ok(())
    }
}

/// Errors raised by the position engine, the reconciler and the mapper.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid token{location}")]
    InvalidToken { location: Location },

    #[error("Invalid offset{location}")]
    InvalidOffset { location: Location },

    #[error("Invalid empty token{location}")]
    EmptyToken { location: Location },

    #[error("Invalid token value '{actual}' instead of '{expected}'{location}")]
    TokenValue {
        actual: String,
        expected: String,
        location: Location,
    },

    #[error("Invalid missing token '{text}'{location}")]
    MissingToken { text: String, location: Location },

    #[error("Invalid token sequence{location}")]
    TokenSequence { location: Location },

    #[error("Unexpected compilation unit{location}")]
    UnexpectedRoot { location: Location },

    #[error("Unknown comment kind: {text}")]
    Comment { text: String },
}

impl ConvertError {
    /// The location attached to this error, if it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::InvalidToken { location }
            | Self::InvalidOffset { location }
            | Self::EmptyToken { location }
            | Self::TokenValue { location, .. }
            | Self::MissingToken { location, .. }
            | Self::TokenSequence { location }
            | Self::UnexpectedRoot { location } => Some(location),
            Self::Comment { .. } => None,
        }
    }
}

impl GotreeErrorCode for ConvertError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } | Self::InvalidOffset { .. } => error_code::POSITION_ERROR,
            Self::TokenValue { .. } | Self::MissingToken { .. } => error_code::TOKEN_MISMATCH,
            _ => error_code::CONVERT_ERROR,
        }
    }
}
