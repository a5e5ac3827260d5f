//! Test dataset loading
//!
//! Loads a CSV file with a header row into an in-memory table and splits it
//! into a feature matrix and a target vector for evaluation.

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// An in-memory tabular dataset with named columns
///
/// Loaded once from CSV; `split` produces derived views and never mutates
/// the underlying cells.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    /// Load a dataset from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::DataLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_csv_reader(file, path)
    }

    /// Load a dataset from any CSV reader
    ///
    /// `origin` labels the source in error messages.
    pub fn from_csv_reader(reader: impl Read, origin: impl AsRef<Path>) -> Result<Self> {
        let origin = origin.as_ref();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()
            .map_err(|e| Error::DataLoad {
                path: origin.to_path_buf(),
                message: format!("failed to read CSV header: {e}"),
            })?
            .iter()
            .map(ToString::to_string)
            .collect();

        if columns.is_empty() {
            return Err(Error::InvalidData("CSV has no columns".to_string()));
        }

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| Error::DataLoad {
                path: origin.to_path_buf(),
                message: format!("failed to read row {}: {e}", idx + 1),
            })?;

            if record.len() != columns.len() {
                return Err(Error::InvalidData(format!(
                    "row {} has {} columns, expected {}",
                    idx + 1,
                    record.len(),
                    columns.len()
                )));
            }

            let row: Vec<f64> = record
                .iter()
                .enumerate()
                .map(|(col, val)| {
                    val.parse::<f64>().map_err(|_| {
                        Error::InvalidData(format!(
                            "value '{}' in column '{}' (row {}) is not numeric",
                            val,
                            columns[col],
                            idx + 1
                        ))
                    })
                })
                .collect::<Result<_>>()?;
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(Error::InvalidData("CSV contains no data rows".to_string()));
        }

        Ok(Self { columns, rows })
    }

    /// Column names, in file order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Split into a feature matrix (target column dropped) and target vector
    ///
    /// Fails with a schema error when the target column is absent.
    pub fn split(&self, target_column: &str) -> Result<(DenseMatrix<f64>, Vec<f64>)> {
        let target_idx = self
            .columns
            .iter()
            .position(|c| c == target_column)
            .ok_or_else(|| Error::Schema {
                column: target_column.to_string(),
                available: self.columns.clone(),
            })?;

        if self.columns.len() < 2 {
            return Err(Error::InvalidData(
                "dataset has no feature columns besides the target".to_string(),
            ));
        }

        let mut features: Vec<Vec<f64>> = Vec::with_capacity(self.rows.len());
        let mut target: Vec<f64> = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut feature_row = Vec::with_capacity(self.columns.len() - 1);
            for (col, value) in row.iter().enumerate() {
                if col == target_idx {
                    target.push(*value);
                } else {
                    feature_row.push(*value);
                }
            }
            features.push(feature_row);
        }

        let matrix = DenseMatrix::from_2d_vec(&features);

        Ok((matrix, target))
    }
}
