//! Top-level gotree configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{MapperConfig, OutputConfig, PipelineConfig};
use crate::constants::{MAX_THREADS, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Environment variables recognised by [`GotreeConfig::load`].
pub const ENV_VARS: [&str; 4] = [
    "GOTREE_MAPPER_STRICT",
    "GOTREE_MAPPER_IDENTIFIER_INFO",
    "GOTREE_OUTPUT_INDENT",
    "GOTREE_PIPELINE_THREADS",
];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`GOTREE_*`)
/// 3. Project config (`gotree.toml` in project root)
/// 4. User config (`~/.gotree/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GotreeConfig {
    pub mapper: MapperConfig,
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub strict: Option<bool>,
    pub identifier_info: Option<bool>,
    pub indent: Option<String>,
    pub threads: Option<usize>,
}

impl GotreeConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &GotreeConfig) -> Result<(), ConfigError> {
        if let Some(ref indent) = config.output.indent {
            if !indent.chars().all(|c| c == ' ' || c == '\t') {
                return Err(ConfigError::ValidationFailed {
                    field: "output.indent".to_string(),
                    message: "must contain only spaces and tabs".to_string(),
                });
            }
        }
        if let Some(threads) = config.pipeline.threads {
            if threads > MAX_THREADS {
                return Err(ConfigError::ValidationFailed {
                    field: "pipeline.threads".to_string(),
                    message: format!("must be at most {MAX_THREADS}"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.gotree/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".gotree").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut GotreeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        let file_config: GotreeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut GotreeConfig, other: &GotreeConfig) {
        if other.mapper.strict.is_some() {
            base.mapper.strict = other.mapper.strict;
        }
        if other.mapper.identifier_info.is_some() {
            base.mapper.identifier_info = other.mapper.identifier_info;
        }
        if other.output.indent.is_some() {
            base.output.indent = other.output.indent.clone();
        }
        if other.pipeline.threads.is_some() {
            base.pipeline.threads = other.pipeline.threads;
        }
    }

    /// Apply environment variable overrides (`GOTREE_<SECTION>_<KEY>`).
    fn apply_env_overrides(config: &mut GotreeConfig) {
        if let Ok(val) = std::env::var("GOTREE_MAPPER_STRICT") {
            if let Ok(v) = val.parse::<bool>() {
                config.mapper.strict = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GOTREE_MAPPER_IDENTIFIER_INFO") {
            if let Ok(v) = val.parse::<bool>() {
                config.mapper.identifier_info = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GOTREE_OUTPUT_INDENT") {
            config.output.indent = Some(val);
        }
        if let Ok(val) = std::env::var("GOTREE_PIPELINE_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.pipeline.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut GotreeConfig, cli: &CliOverrides) {
        if let Some(v) = cli.strict {
            config.mapper.strict = Some(v);
        }
        if let Some(v) = cli.identifier_info {
            config.mapper.identifier_info = Some(v);
        }
        if let Some(ref v) = cli.indent {
            config.output.indent = Some(v.clone());
        }
        if let Some(v) = cli.threads {
            config.pipeline.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
