//! Evaluar: regression model evaluation with experiment tracking
//!
//! Loads a serialized regression model and a held-out CSV test set, computes
//! the standard regression metrics (RMSE, MAE, R²), persists them locally as
//! JSON, and reports parameters, metrics, and the model artifact to an
//! experiment-tracking service inside a scoped run.
//!
//! # Example
//!
//! ```no_run
//! use evaluar::config::load_config;
//! use evaluar::eval::Evaluator;
//!
//! # fn main() -> evaluar::Result<()> {
//! let config = load_config("evaluation.yaml")?;
//! let mut evaluator = Evaluator::from_config(config)?;
//! let report = evaluator.run()?;
//! println!("rmse = {:.4}", report.rmse);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod io;
pub mod metrics;
pub mod tracking;

pub use error::{Error, Result};
