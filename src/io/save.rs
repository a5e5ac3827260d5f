//! Model saving functionality

use super::format::{ModelFormat, SaveConfig};
use super::model::Model;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Save a model to a file
///
/// # Example
///
/// ```no_run
/// use evaluar::io::{save_model, ModelFormat, SaveConfig};
/// # use evaluar::io::load_model;
///
/// # let model = load_model("model.json").unwrap();
/// let config = SaveConfig::new(ModelFormat::Json).with_pretty(true);
/// save_model(&model, "artifacts/model.json", &config).unwrap();
/// ```
pub fn save_model(model: &Model, path: impl AsRef<Path>, config: &SaveConfig) -> Result<()> {
    let path = path.as_ref();

    let data = match config.format {
        ModelFormat::Json => {
            if config.pretty {
                serde_json::to_string_pretty(model)
                    .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?
            } else {
                serde_json::to_string(model)
                    .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?
            }
        }
        ModelFormat::Yaml => serde_yaml::to_string(model)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}")))?,
    };

    fs::write(path, data).map_err(|e| Error::Persistence {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{Estimator, ModelMetadata};
    use smartcore::linalg::basic::matrix::DenseMatrix;
    use smartcore::linear::linear_regression::LinearRegression;

    fn sample_model() -> Model {
        let x = DenseMatrix::from_2d_vec(&vec![vec![1.0], vec![2.0], vec![3.0]]);
        let y = vec![2.0, 4.0, 6.0];
        Model::new(
            ModelMetadata::new("save-test"),
            Estimator::Linear(
                LinearRegression::fit(&x, &y, Default::default()).expect("fit should succeed"),
            ),
        )
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let model = sample_model();
        let config = SaveConfig::new(ModelFormat::Json);
        let result = save_model(&model, "no_such_dir/model.json", &config);
        assert!(matches!(result, Err(Error::Persistence { .. })));
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let model = sample_model();
        let dir = tempfile::tempdir().expect("tempdir creation should succeed");
        let path = dir.path().join("model.json");

        let config = SaveConfig::new(ModelFormat::Json).with_pretty(true);
        save_model(&model, &path, &config).expect("save should succeed");

        let content = fs::read_to_string(&path).expect("read should succeed");
        assert!(content.lines().count() > 1);
        assert!(content.contains("save-test"));
    }
}
