use super::fixture::{leaf_png, Fixture, ANTHRACNOSE_PROBABILITIES, HEALTHY_PROBABILITIES};
use crate::error::DiagnosisError;
use crate::label_table::TreatmentTable;
use crate::model::contract::ModelContract;

#[test]
fn test_healthy_leaf() {
    let f = Fixture::new(&HEALTHY_PROBABILITIES, &["p2"]);

    let diagnosis = f.service.diagnose_bytes(&leaf_png()).unwrap();

    let result = diagnosis.result;
    assert!(result.healthy);
    assert_eq!(result.prediction, "healthy");
    assert_eq!(result.confidence, 0.85);
    assert!(result.message.contains("healthy"));
    assert_eq!(result.treatment, None);
}

#[test]
fn test_diseased_leaf() {
    let f = Fixture::new(&ANTHRACNOSE_PROBABILITIES, &["p2"]);

    let diagnosis = f.service.diagnose_bytes(&leaf_png()).unwrap();

    let result = diagnosis.result;
    assert!(!result.healthy);
    assert_eq!(result.prediction, "Anthracnose");
    assert_eq!(result.confidence, 0.70);
    assert_eq!(
        result.treatment.as_deref(),
        Some(TreatmentTable::tea_leaf().lookup("Anthracnose"))
    );
    assert!(result.message.contains("Anthracnose"));
    assert!(result.message.contains("70.0%"));
    assert_eq!(result.all_predictions.len(), 8);
}

#[test]
fn test_resolves_second_candidate_when_first_missing() {
    let f = Fixture::new(&HEALTHY_PROBABILITIES, &["p2"]);

    let diagnosis = f.service.diagnose_bytes(&leaf_png()).unwrap();

    assert_eq!(diagnosis.model_path, f.path("p2"));
    assert_eq!(diagnosis.contract_id, ModelContract::TEA_LEAF_128_RAW);
    assert_eq!(f.loader.loaded_paths(), vec![f.path("p2")]);
}

#[test]
fn test_first_candidate_wins_when_both_exist() {
    let f = Fixture::new(&HEALTHY_PROBABILITIES, &["p1", "p2"]);

    let diagnosis = f.service.diagnose_bytes(&leaf_png()).unwrap();

    assert_eq!(diagnosis.model_path, f.path("p1"));
    // The 224 contract uses title-case labels.
    assert_eq!(diagnosis.result.prediction, "Healthy");
}

#[test]
fn test_no_candidate_exists() {
    let f = Fixture::new(&HEALTHY_PROBABILITIES, &[]);

    let error = f.service.diagnose_bytes(&leaf_png()).unwrap_err();

    match error {
        DiagnosisError::ModelNotFound { candidates } => {
            let configured: Vec<_> = f
                .config
                .model_candidates
                .iter()
                .map(|c| c.path.clone())
                .collect();
            assert_eq!(candidates, configured);
            assert_eq!(candidates, vec![f.path("p1"), f.path("p2")]);
        }
        other => panic!("expected ModelNotFound, got {:?}", other),
    }
    assert_eq!(f.loader.load_count(), 0);
    assert!(!f.logger.errors().is_empty());
}

#[test]
fn test_undecodable_image_never_reaches_inference() {
    let f = Fixture::new(&HEALTHY_PROBABILITIES, &["p2"]);

    let error = f.service.diagnose_bytes(b"GIF89a? no, just text").unwrap_err();

    assert!(matches!(error, DiagnosisError::ImageDecode(_)));
    assert_eq!(f.loader.infer_count(), 0);
    assert!(f
        .logger
        .errors()
        .iter()
        .any(|line| line.contains("preprocess")));
}

#[test]
fn test_sequential_runs_reuse_cached_model() {
    let f = Fixture::new(&ANTHRACNOSE_PROBABILITIES, &["p1", "p2"]);

    let first = f.service.diagnose_bytes(&leaf_png()).unwrap();
    let second = f.service.diagnose_bytes(&leaf_png()).unwrap();

    assert_eq!(f.loader.load_count(), 1);
    assert_eq!(f.loader.infer_count(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_load_failure_is_terminal_without_fallback() {
    let f = Fixture::build(&HEALTHY_PROBABILITIES, &["p2"], &["p1"], false);

    let error = f.service.diagnose_bytes(&leaf_png()).unwrap_err();

    assert!(matches!(error, DiagnosisError::ModelLoad { ref path, .. } if *path == f.path("p1")));
    assert!(error.to_string().contains("unsupported opset version"));
    assert!(!f.cache.is_loaded());
    assert_eq!(f.loader.load_count(), 1);
    assert!(f.logger.errors().iter().any(|line| line.contains("p1")));
}

#[test]
fn test_load_failure_falls_back_when_enabled() {
    let f = Fixture::build(&ANTHRACNOSE_PROBABILITIES, &["p2"], &["p1"], true);

    let diagnosis = f.service.diagnose_bytes(&leaf_png()).unwrap();

    assert_eq!(diagnosis.model_path, f.path("p2"));
    assert_eq!(diagnosis.contract_id, ModelContract::TEA_LEAF_128_RAW);
    assert_eq!(f.loader.load_count(), 2);
}

#[test]
fn test_fallback_returns_last_load_error_when_all_fail() {
    let f = Fixture::build(&HEALTHY_PROBABILITIES, &[], &["p1", "p2"], true);

    let error = f.service.diagnose_bytes(&leaf_png()).unwrap_err();

    assert!(matches!(error, DiagnosisError::ModelLoad { ref path, .. } if *path == f.path("p2")));
    assert_eq!(f.loader.load_count(), 2);
}

#[test]
fn test_cached_contract_survives_fallback() {
    let f = Fixture::build(&HEALTHY_PROBABILITIES, &["p2"], &["p1"], true);

    f.service.diagnose_bytes(&leaf_png()).unwrap();
    let second = f.service.diagnose_bytes(&leaf_png()).unwrap();

    assert_eq!(second.contract_id, ModelContract::TEA_LEAF_128_RAW);
    assert_eq!(second.result.prediction, "healthy");
    assert_eq!(f.loader.load_count(), 2);
}

#[test]
fn test_wrong_class_count_is_inference_error() {
    let f = Fixture::new(&[0.5, 0.5], &["p2"]);

    let error = f.service.diagnose_bytes(&leaf_png()).unwrap_err();

    assert!(matches!(error, DiagnosisError::Inference(_)));
    assert!(error.to_string().contains("expected 8 classes"));
    assert!(f.logger.errors().iter().any(|l| l.contains("inference")));
}

#[test]
fn test_empty_output_is_inference_error() {
    let f = Fixture::new(&[], &["p2"]);

    let error = f.service.diagnose_bytes(&leaf_png()).unwrap_err();

    assert!(matches!(error, DiagnosisError::Inference(_)));
    assert!(error.to_string().contains("received 0 values"));
}

#[test]
fn test_non_finite_output_is_inference_error() {
    let mut probabilities = HEALTHY_PROBABILITIES;
    probabilities[3] = f32::NAN;
    let f = Fixture::new(&probabilities, &["p2"]);

    let error = f.service.diagnose_bytes(&leaf_png()).unwrap_err();

    assert!(matches!(error, DiagnosisError::Inference(_)));
}

#[test]
fn test_diagnose_file_reads_image() {
    let f = Fixture::new(&ANTHRACNOSE_PROBABILITIES, &["p2"]);
    let image_path = f.path("leaf.png");
    std::fs::write(&image_path, leaf_png()).unwrap();

    let diagnosis = f.service.diagnose_file(&image_path).unwrap();

    assert_eq!(diagnosis.result.prediction, "Anthracnose");
}

#[test]
fn test_diagnose_file_missing_image() {
    let f = Fixture::new(&ANTHRACNOSE_PROBABILITIES, &["p2"]);

    let error = f.service.diagnose_file(&f.path("nope.jpg")).unwrap_err();

    assert!(matches!(error, DiagnosisError::ImageRead { .. }));
    assert_eq!(f.loader.load_count(), 0);
}
