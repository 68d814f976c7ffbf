//! Configuration system for gotree.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod gotree_config;
pub mod mapper_config;
pub mod output_config;
pub mod pipeline_config;

pub use gotree_config::{CliOverrides, GotreeConfig};
pub use mapper_config::MapperConfig;
pub use output_config::OutputConfig;
pub use pipeline_config::PipelineConfig;
