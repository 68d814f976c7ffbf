//! Serializer output configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INDENT;

/// Configuration for the document serializer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Indentation unit. Spaces and tabs only. Default: two spaces.
    pub indent: Option<String>,
}

impl OutputConfig {
    /// Returns the effective indentation unit.
    pub fn effective_indent(&self) -> &str {
        self.indent.as_deref().unwrap_or(DEFAULT_INDENT)
    }
}
