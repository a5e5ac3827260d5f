//! Model loading functionality

use super::format::ModelFormat;
use super::model::Model;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a model from a file
///
/// The format is automatically detected from the file extension.
///
/// # Example
///
/// ```no_run
/// use evaluar::io::load_model;
///
/// let model = load_model("model.json").expect("failed to load model");
/// println!("Loaded model: {}", model.metadata.name);
/// ```
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::ModelLoad {
            path: path.to_path_buf(),
            message: "file has no extension".to_string(),
        })?;

    let format = ModelFormat::from_extension(ext).ok_or_else(|| Error::ModelLoad {
        path: path.to_path_buf(),
        message: format!("unsupported file extension: {ext}"),
    })?;

    let content = fs::read_to_string(path).map_err(|e| Error::ModelLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let model: Model = match format {
        ModelFormat::Json => serde_json::from_str(&content).map_err(|e| Error::ModelLoad {
            path: path.to_path_buf(),
            message: format!("JSON deserialization failed: {e}"),
        })?,
        ModelFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| Error::ModelLoad {
            path: path.to_path_buf(),
            message: format!("YAML deserialization failed: {e}"),
        })?,
    };

    Ok(model)
}
