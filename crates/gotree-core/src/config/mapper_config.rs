//! Tree mapper configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the tree mapper.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MapperConfig {
    /// Abort a file on any internal-consistency error. Default: true.
    pub strict: Option<bool>,
    /// Attach id/type/package to identifier nodes. Default: true.
    pub identifier_info: Option<bool>,
}

impl MapperConfig {
    /// Returns whether strict ("paranoid") mode is on, defaulting to true.
    pub fn effective_strict(&self) -> bool {
        self.strict.unwrap_or(true)
    }

    /// Returns whether identifiers are enriched, defaulting to true.
    pub fn effective_identifier_info(&self) -> bool {
        self.identifier_info.unwrap_or(true)
    }
}
