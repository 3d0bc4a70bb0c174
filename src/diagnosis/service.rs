use crate::config::{Config, ModelCandidate};
use crate::error::DiagnosisError;
use crate::library::logger::interface::Logger;
use crate::model::cache::{LoadedModel, ModelCache};
use crate::model_locator;
use crate::preprocess::image::ImagePreprocessor;
use crate::result_formatter::{self, DiagnosticResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of one successful run: the result plus the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub model_path: PathBuf,
    pub contract_id: String,
    pub result: DiagnosticResult,
}

/// Runs resolve, load, preprocess, infer and format for one image.
pub struct InferenceService {
    candidates: Vec<ModelCandidate>,
    fallback_on_load_error: bool,
    cache: Arc<ModelCache>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceService {
    pub fn new(
        config: &Config,
        cache: Arc<ModelCache>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            candidates: config.model_candidates.clone(),
            fallback_on_load_error: config.fallback_on_load_error,
            cache,
            logger: logger.with_namespace("diagnosis"),
        }
    }

    pub fn diagnose_file(&self, image_path: &Path) -> Result<Diagnosis, DiagnosisError> {
        let _ = self
            .logger
            .info(&format!("Processing image from {}", image_path.display()));

        let image_bytes = std::fs::read(image_path).map_err(|source| {
            let _ = self.logger.error(&format!(
                "Image file not readable {}: {}",
                image_path.display(),
                source
            ));
            DiagnosisError::ImageRead {
                path: image_path.to_path_buf(),
                source,
            }
        })?;

        self.diagnose_bytes(&image_bytes)
    }

    pub fn diagnose_bytes(&self, image_bytes: &[u8]) -> Result<Diagnosis, DiagnosisError> {
        let loaded = self.load_model()?;
        let contract = &loaded.contract;

        let _ = self.logger.info(&format!(
            "Preprocessing image to {}x{}x{} ({:?})",
            contract.input_height, contract.input_width, contract.channels, contract.value_range
        ));
        let tensor = ImagePreprocessor::for_contract(contract)
            .prepare(image_bytes)
            .map_err(|e| self.log_failure("preprocess", e))?;

        let _ = self.logger.info("Running inference");
        let result = loaded
            .model
            .infer(&tensor)
            .map_err(|e| DiagnosisError::Inference(e.to_string()))
            .and_then(|probabilities| {
                result_formatter::format(
                    &probabilities,
                    &contract.labels,
                    &contract.treatments,
                    contract.healthy_threshold,
                )
            })
            .map_err(|e| self.log_failure("inference", e))?;

        let _ = self.logger.info(&format!(
            "Top prediction {} at {:.4} (healthy: {})",
            result.prediction, result.confidence, result.healthy
        ));

        Ok(Diagnosis {
            model_path: loaded.path.clone(),
            contract_id: contract.id.clone(),
            result,
        })
    }

    /// Reuses the cached model, or resolves and loads the first usable
    /// candidate. With fallback enabled, a load failure moves resolution on
    /// to the candidates after the one that failed.
    fn load_model(&self) -> Result<LoadedModel, DiagnosisError> {
        if let Some(loaded) = self.cache.current() {
            let _ = self
                .logger
                .info(&format!("Using cached model {}", loaded.path.display()));
            return Ok(loaded);
        }

        let mut start = 0;
        let mut last_load_error = None;

        loop {
            let remaining: Vec<&Path> = self.candidates[start..]
                .iter()
                .map(|c| c.path.as_path())
                .collect();

            let index = match model_locator::resolve_index(&remaining) {
                Ok(offset) => start + offset,
                Err(_) => {
                    if let Some(load_error) = last_load_error {
                        return Err(self.log_failure("load", load_error));
                    }
                    // Report the full list, not just the tail searched last.
                    let error = DiagnosisError::ModelNotFound {
                        candidates: self.candidates.iter().map(|c| c.path.clone()).collect(),
                    };
                    return Err(self.log_failure("resolve", error));
                }
            };

            let candidate = &self.candidates[index];
            let _ = self
                .logger
                .info(&format!("Found model at: {}", candidate.path.display()));

            match self.cache.get_or_load(&candidate.path, &candidate.contract) {
                Ok(loaded) => return Ok(loaded),
                Err(error) if self.fallback_on_load_error => {
                    let _ = self.logger.error(&format!(
                        "Falling back past {}: {}",
                        candidate.path.display(),
                        error
                    ));
                    last_load_error = Some(error);
                    start = index + 1;
                }
                Err(error) => return Err(self.log_failure("load", error)),
            }
        }
    }

    fn log_failure(&self, step: &str, error: DiagnosisError) -> DiagnosisError {
        let _ = self
            .logger
            .error(&format!("Step {} failed ({}): {}", step, error.kind(), error));
        error
    }
}
