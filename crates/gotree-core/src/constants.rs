//! Shared constants for the gotree converter.

/// Sentinel for unresolved identifier type and package information.
pub const UNKNOWN: &str = "UNKNOWN";

/// Default serializer indentation unit.
pub const DEFAULT_INDENT: &str = "  ";

/// Default number of worker threads (0 = let rayon decide).
pub const DEFAULT_THREADS: usize = 0;

/// Upper bound accepted for `pipeline.threads`.
pub const MAX_THREADS: usize = 1024;

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "gotree.toml";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "GOTREE_LOG";
