//! Error handling for gotree.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod convert_error;
pub mod error_code;
pub mod input_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use convert_error::{ConvertError, Location};
pub use error_code::GotreeErrorCode;
pub use input_error::InputError;
pub use pipeline_error::{FileError, PipelineError, PipelineResult};
