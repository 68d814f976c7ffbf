//! Batch conversion: one document per file, files mapped in parallel.
//!
//! A file that fails (parse error, or a consistency error in strict mode)
//! still gets a document carrying the message and a `null` tree; the
//! failure is recorded in the [`PipelineResult`] and never stops the batch.

pub mod input;

use std::sync::Arc;
use std::time::Instant;

use gotree_core::config::GotreeConfig;
use gotree_core::errors::{GotreeErrorCode, InputError, PipelineError, PipelineResult};
use gotree_core::logging::{self, names};
use rayon::prelude::*;

use crate::enrich::{NoSymbols, SymbolResolver};
use crate::mapper::{map_file, MapOptions};
use crate::native::File;
use crate::serialize::{BatchDocument, Serializer};

pub use input::{decode_batch, encode_batch, BatchEntry};

/// Name under which batch-level failures are reported.
pub const BATCH_SCOPE: &str = "<batch>";

/// Why the native parser produced no tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One file as handed over by the parser and type checker.
#[derive(Clone)]
pub struct SourceUnit {
    pub name: String,
    pub source: String,
    pub parsed: Result<File, ParseFailure>,
    pub symbols: Arc<dyn SymbolResolver>,
}

impl SourceUnit {
    /// A unit without type information.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        parsed: Result<File, ParseFailure>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            parsed,
            symbols: Arc::new(NoSymbols),
        }
    }

    pub fn with_symbols(mut self, symbols: Arc<dyn SymbolResolver>) -> Self {
        self.symbols = symbols;
        self
    }
}

impl std::fmt::Debug for SourceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceUnit")
            .field("name", &self.name)
            .field("source_len", &self.source.len())
            .field("parsed", &self.parsed.is_ok())
            .finish()
    }
}

/// Document of one file plus the error that produced it, if any.
#[derive(Debug)]
pub struct FileOutcome {
    pub name: String,
    pub document: String,
    pub error: Option<PipelineError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Converts and serializes one file.
pub fn convert_unit(unit: &SourceUnit, config: &GotreeConfig) -> FileOutcome {
    let _span = tracing::debug_span!(names::CONVERT_FILE, file = %unit.name).entered();
    let serializer = Serializer::new(config.output.effective_indent());

    let file = match &unit.parsed {
        Ok(file) => file,
        Err(failure) => {
            tracing::warn!(file = %unit.name, error = %failure.message, "file did not parse");
            return FileOutcome {
                name: unit.name.clone(),
                document: serializer.failure_document(&failure.message),
                error: Some(
                    InputError::Parse {
                        file: unit.name.clone(),
                        message: failure.message.clone(),
                    }
                    .into(),
                ),
            };
        }
    };

    let options = MapOptions::from(&config.mapper);
    let converted = map_file(file, &unit.source, &unit.name, unit.symbols.as_ref(), options)
        .and_then(|converted| serializer.document(&converted, None));
    match converted {
        Ok(document) => FileOutcome {
            name: unit.name.clone(),
            document,
            error: None,
        },
        Err(error) => {
            tracing::warn!(file = %unit.name, error = %error.diagnostic(), "conversion failed");
            FileOutcome {
                name: unit.name.clone(),
                document: serializer.failure_document(&error.to_string()),
                error: Some(error.into()),
            }
        }
    }
}

/// Converts every unit on a dedicated pool and collects the documents by
/// file name. Installs the `GOTREE_LOG` subscriber unless the host already
/// installed one.
pub fn convert_batch(units: &[SourceUnit], config: &GotreeConfig) -> PipelineResult<BatchDocument> {
    logging::init_tracing();
    let _span = tracing::info_span!(names::CONVERT_BATCH, files = units.len()).entered();
    let start = Instant::now();
    let mut result = PipelineResult::new(BatchDocument::new());

    let threads = config.pipeline.effective_threads();
    let convert = || -> Vec<FileOutcome> {
        units
            .par_iter()
            .map(|unit| convert_unit(unit, config))
            .collect()
    };
    let outcomes = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(convert),
        Err(e) => {
            let error = PipelineError::ThreadPool(e.to_string());
            tracing::warn!(threads, error = %error.diagnostic(), "falling back to the global pool");
            result.add_error(BATCH_SCOPE, error);
            convert()
        }
    };

    for outcome in outcomes {
        if let Some(error) = outcome.error {
            result.add_error(outcome.name.clone(), error);
        }
        result.data.insert(outcome.name, outcome.document);
    }

    tracing::info!(
        files = result.data.len(),
        errors = result.error_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "converted batch"
    );
    result
}
