//! Evaluation configuration
//!
//! YAML-backed configuration schema, validation, and CLI argument types.

mod cli;
mod schema;
mod validate;

pub use cli::{Cli, Command, EvaluateArgs, InfoArgs, ValidateArgs};
pub use schema::EvaluationConfig;
pub use validate::{validate_config, ValidationError};

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load an evaluation configuration from a YAML file
///
/// # Example
///
/// ```no_run
/// use evaluar::config::load_config;
///
/// let config = load_config("evaluation.yaml")?;
/// # Ok::<(), evaluar::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EvaluationConfig> {
    let yaml_content = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let config: EvaluationConfig = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))?;

    Ok(config)
}
