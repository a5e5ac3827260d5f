//! Evaluation orchestration
//!
//! Wires the dataset, the model artifact, the metrics, and the tracking
//! client into one evaluation run.

mod evaluator;

pub use evaluator::{Evaluator, MODEL_ARTIFACT_FILE};
