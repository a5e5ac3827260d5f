//! Model structure for serialization

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::elastic_net::ElasticNet;
use smartcore::linear::lasso::Lasso;
use smartcore::linear::linear_regression::LinearRegression;
use smartcore::linear::ridge_regression::RidgeRegression;
use std::collections::HashMap;

/// Narrow prediction interface
///
/// Evaluation code depends only on this capability, never on a concrete
/// estimator type.
pub trait Predictor {
    /// Produce one prediction per feature-matrix row
    fn predict(&self, features: &DenseMatrix<f64>) -> Result<Vec<f64>>;
}

/// Model metadata recorded alongside the estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier
    pub name: String,

    /// Model version
    #[serde(default = "default_version")]
    pub version: String,

    /// Custom metadata fields
    #[serde(default)]
    pub custom: HashMap<String, serde_json::Value>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl ModelMetadata {
    /// Create new metadata with minimal fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            custom: HashMap::new(),
        }
    }

    /// Add a custom metadata field
    #[must_use]
    pub fn with_custom(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }
}

/// The linear-family regressors the training stage produces
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>),
    Ridge(RidgeRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>),
    Lasso(Lasso<f64, f64, DenseMatrix<f64>, Vec<f64>>),
    ElasticNet(ElasticNet<f64, f64, DenseMatrix<f64>, Vec<f64>>),
}

impl Estimator {
    /// Architecture name for display and metadata
    #[must_use]
    pub fn architecture(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Ridge(_) => "ridge",
            Self::Lasso(_) => "lasso",
            Self::ElasticNet(_) => "elastic_net",
        }
    }
}

impl Predictor for Estimator {
    fn predict(&self, features: &DenseMatrix<f64>) -> Result<Vec<f64>> {
        let predictions = match self {
            Self::Linear(m) => m.predict(features),
            Self::Ridge(m) => m.predict(features),
            Self::Lasso(m) => m.predict(features),
            Self::ElasticNet(m) => m.predict(features),
        };
        predictions.map_err(|e| Error::Prediction(e.to_string()))
    }
}

/// A serialized regression model: metadata plus the fitted estimator
#[derive(Debug, Serialize, Deserialize)]
pub struct Model {
    /// Model metadata
    pub metadata: ModelMetadata,

    /// The fitted estimator
    pub estimator: Estimator,
}

impl Model {
    /// Create a new model from metadata and a fitted estimator
    pub fn new(metadata: ModelMetadata, estimator: Estimator) -> Self {
        Self {
            metadata,
            estimator,
        }
    }
}

impl Predictor for Model {
    fn predict(&self, features: &DenseMatrix<f64>) -> Result<Vec<f64>> {
        self.estimator.predict(features)
    }
}
