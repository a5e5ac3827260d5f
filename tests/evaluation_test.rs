//! End-to-end evaluation tests
//!
//! Exercise the full pipeline: CSV test set + serialized model in, metrics
//! record + tracked run out.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use evaluar::config::EvaluationConfig;
use evaluar::eval::{Evaluator, MODEL_ARTIFACT_FILE};
use evaluar::io::{save_model, Estimator, Model, ModelFormat, ModelMetadata, SaveConfig};
use evaluar::metrics::RegressionReport;
use evaluar::tracking::{InMemoryBackend, JsonFileBackend, RunStatus};
use evaluar::Error;

use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;

const TEST_CSV: &str = "\
alcohol,ph,quality
1.0,0.5,4.0
2.0,1.2,7.0
3.0,1.4,10.0
4.0,2.3,13.0
";

/// Fit and save a model on the exact relationship in TEST_CSV
/// (quality = 3*alcohol + 1, ph carries no signal)
fn write_model(path: &Path) {
    let x = DenseMatrix::from_2d_vec(&vec![
        vec![1.0, 0.5],
        vec![2.0, 1.2],
        vec![3.0, 1.4],
        vec![4.0, 2.3],
    ]);
    let y = vec![4.0, 7.0, 10.0, 13.0];
    let model = Model::new(
        ModelMetadata::new("wine-quality"),
        Estimator::Linear(
            LinearRegression::fit(&x, &y, Default::default()).expect("fit should succeed"),
        ),
    );
    save_model(&model, path, &SaveConfig::new(ModelFormat::Json).with_pretty(true))
        .expect("save should succeed");
}

fn config_in(dir: &Path, tracking_uri: &str) -> EvaluationConfig {
    EvaluationConfig {
        test_data_path: dir.join("test.csv"),
        model_path: dir.join("model.json"),
        target_column: "quality".to_string(),
        metrics_path: dir.join("metrics.json"),
        tracking_uri: tracking_uri.to_string(),
        experiment_name: "wine-quality".to_string(),
        run_name: Some("integration".to_string()),
        params: HashMap::from([
            ("alpha".to_string(), serde_json::json!(0.2)),
            ("l1_ratio".to_string(), serde_json::json!(0.1)),
        ]),
        artifact_dir: dir.join("artifacts").join("model_evaluation"),
    }
}

#[test]
fn evaluation_with_in_memory_backend_records_full_run() {
    let dir = tempfile::tempdir().expect("tempdir creation should succeed");
    fs::write(dir.path().join("test.csv"), TEST_CSV).unwrap();
    write_model(&dir.path().join("model.json"));

    let config = config_in(dir.path(), "unused");
    let mut evaluator = Evaluator::with_backend(config, InMemoryBackend::new());
    let report = evaluator.run().expect("evaluation should succeed");

    // Exact fit: perfect metrics
    assert!(report.rmse < 1e-8);
    assert!(report.mae < 1e-8);
    assert!((report.r2 - 1.0).abs() < 1e-8);

    // Metrics record persisted and re-loadable with the same values
    let metrics_path = evaluator.config().metrics_path.clone();
    let persisted = RegressionReport::load(&metrics_path).expect("metrics should round-trip");
    assert!((persisted.rmse - report.rmse).abs() < 1e-12);
    assert!((persisted.mae - report.mae).abs() < 1e-12);
    assert!((persisted.r2 - report.r2).abs() < 1e-12);

    // The persisted document carries exactly the three metric keys
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metrics_path).unwrap()).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    for key in ["rmse", "mae", "r2"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }

    // Model copy re-serialized under the artifact directory
    let artifact = evaluator.config().artifact_dir.join(MODEL_ARTIFACT_FILE);
    assert!(artifact.exists());

    // Tracked run finalized with params, all three metrics, and the artifact
    let runs = evaluator.tracker().backend().runs();
    assert_eq!(runs.len(), 1);
    let run = runs[0];
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.experiment_name, "wine-quality");
    assert_eq!(run.run_name.as_deref(), Some("integration"));
    assert_eq!(run.params["alpha"], "0.2");
    assert_eq!(run.params["l1_ratio"], "0.1");
    assert_eq!(run.metrics.len(), 3);
    assert_eq!(run.artifacts.len(), 1);
}

#[test]
fn evaluation_with_file_store_tracking_uri() {
    let dir = tempfile::tempdir().expect("tempdir creation should succeed");
    fs::write(dir.path().join("test.csv"), TEST_CSV).unwrap();
    write_model(&dir.path().join("model.json"));

    let store = dir.path().join("mlruns");
    let config = config_in(dir.path(), store.to_str().unwrap());

    // A bare directory path as tracking URI selects the JSON file store
    let mut evaluator = Evaluator::from_config(config).expect("backend should resolve");
    evaluator.run().expect("evaluation should succeed");

    let backend = JsonFileBackend::new(&store);
    let runs = backend.list_runs().expect("run records should be readable");
    assert_eq!(runs.len(), 1);
    let run = &runs[0];
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.metrics.len(), 3);
    assert!(run.metrics["rmse"] < 1e-8);
    assert_eq!(run.artifacts, vec![MODEL_ARTIFACT_FILE.to_string()]);

    // Artifact copied into the store
    let copied = store
        .join(&run.run_id)
        .join("artifacts")
        .join(MODEL_ARTIFACT_FILE);
    assert!(copied.exists());
}

#[test]
fn missing_target_column_aborts_before_any_run() {
    let dir = tempfile::tempdir().expect("tempdir creation should succeed");
    fs::write(
        dir.path().join("test.csv"),
        "alcohol,ph,density\n1.0,0.5,0.99\n2.0,1.0,0.98\n",
    )
    .unwrap();
    write_model(&dir.path().join("model.json"));

    let config = config_in(dir.path(), "unused");
    let mut evaluator = Evaluator::with_backend(config, InMemoryBackend::new());
    let result = evaluator.run();

    match result {
        Err(Error::Schema { column, .. }) => assert_eq!(column, "quality"),
        other => panic!("expected schema error, got {other:?}"),
    }
    assert!(evaluator.tracker().backend().is_empty());
    assert!(!evaluator.config().metrics_path.exists());
}

#[test]
fn malformed_model_leaves_no_metrics_file() {
    let dir = tempfile::tempdir().expect("tempdir creation should succeed");
    fs::write(dir.path().join("test.csv"), TEST_CSV).unwrap();
    fs::write(dir.path().join("model.json"), "definitely not a model").unwrap();

    let config = config_in(dir.path(), "unused");
    let mut evaluator = Evaluator::with_backend(config, InMemoryBackend::new());

    assert!(matches!(evaluator.run(), Err(Error::ModelLoad { .. })));
    assert!(evaluator.tracker().backend().is_empty());
    assert!(!evaluator.config().metrics_path.exists());
}

#[test]
fn failure_inside_run_still_finalizes_it() {
    let dir = tempfile::tempdir().expect("tempdir creation should succeed");
    fs::write(dir.path().join("test.csv"), TEST_CSV).unwrap();
    write_model(&dir.path().join("model.json"));

    let mut config = config_in(dir.path(), "unused");
    // Metrics persistence fails: parent directory does not exist
    config.metrics_path = dir.path().join("missing_dir").join("metrics.json");

    let mut evaluator = Evaluator::with_backend(config, InMemoryBackend::new());
    assert!(matches!(evaluator.run(), Err(Error::Persistence { .. })));

    let runs = evaluator.tracker().backend().runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].status, RunStatus::Failed);
    assert!(runs[0].end_time_ms.is_some());
}
