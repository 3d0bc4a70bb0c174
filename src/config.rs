use crate::model::contract::ModelContract;
use chrono::{Offset, Utc};
use std::path::PathBuf;

/// A model artifact location pinned to the contract it was trained with.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCandidate {
    pub path: PathBuf,
    pub contract: ModelContract,
}

impl ModelCandidate {
    pub fn new(path: impl Into<PathBuf>, contract: ModelContract) -> Self {
        Self {
            path: path.into(),
            contract,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    /// Resolution order; earlier entries are preferred.
    pub model_candidates: Vec<ModelCandidate>,
    /// Try the next existing candidate when the resolved one fails to load.
    pub fallback_on_load_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: Utc.fix(),
            model_candidates: vec![
                ModelCandidate::new(
                    "models/tea_disease_model.onnx",
                    ModelContract::tea_leaf_224_unit(),
                ),
                ModelCandidate::new(
                    "models/trained_model.onnx",
                    ModelContract::tea_leaf_128_raw(),
                ),
                ModelCandidate::new(
                    "models/tea_disease_mobilenet.onnx",
                    ModelContract::tea_leaf_224_mobilenet(),
                ),
            ],
            fallback_on_load_error: false,
        }
    }
}
