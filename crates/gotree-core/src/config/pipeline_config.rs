//! Batch pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_THREADS;

/// Configuration for the batch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads for parallel file mapping. 0 = auto-detect.
    pub threads: Option<usize>,
}

impl PipelineConfig {
    /// Returns the effective thread count, defaulting to 0 (auto).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }
}
