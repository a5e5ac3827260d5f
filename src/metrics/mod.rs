//! Regression metrics and their persistence
//!
//! The metric formulas delegate to `smartcore::metrics`; this module wraps
//! them in the fixed three-metric report the evaluation stage records.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use smartcore::metrics::{mean_absolute_error, mean_squared_error, r2};
use std::fmt;
use std::fs;
use std::path::Path;

/// The metrics record for one evaluation run
///
/// Always contains exactly these three metrics:
/// - `rmse`: root mean squared error, sqrt(mean((y - y_pred)²))
/// - `mae`: mean absolute error, mean(|y - y_pred|)
/// - `r2`: coefficient of determination, 1 - SS_res / SS_tot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

/// Compute the regression metrics for a prediction set
///
/// Inputs must have equal, positive length and contain only finite values.
/// Zero variance in `actual` is not guarded: the standard R² formula result
/// is returned as-is.
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<RegressionReport> {
    if actual.is_empty() {
        return Err(Error::MetricComputation(
            "cannot score an empty prediction set".to_string(),
        ));
    }

    if actual.len() != predicted.len() {
        return Err(Error::MetricComputation(format!(
            "actual and predicted lengths differ: {} vs {}",
            actual.len(),
            predicted.len()
        )));
    }

    if actual.iter().chain(predicted.iter()).any(|v| !v.is_finite()) {
        return Err(Error::MetricComputation(
            "inputs contain non-finite values".to_string(),
        ));
    }

    let y_true = actual.to_vec();
    let y_pred = predicted.to_vec();

    let mse = mean_squared_error(&y_true, &y_pred);

    Ok(RegressionReport {
        rmse: mse.sqrt(),
        mae: mean_absolute_error(&y_true, &y_pred),
        r2: r2(&y_true, &y_pred),
    })
}

impl RegressionReport {
    /// The metrics as (name, value) pairs, in reporting order
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [("rmse", self.rmse), ("mae", self.mae), ("r2", self.r2)]
    }

    /// Persist the record as JSON, overwriting any existing file
    ///
    /// The parent directory must already exist; a missing directory is a
    /// persistence error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?;
        fs::write(path, json).map_err(|e| Error::Persistence {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load a previously persisted record
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let report: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?;
        Ok(report)
    }
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.entries() {
            writeln!(f, "  {name}: {value:.4}")?;
        }
        Ok(())
    }
}
