use crate::error::DiagnosisError;
use crate::library::logger::interface::Logger;
use crate::model::contract::ModelContract;
use crate::model::interface::{Model, ModelLoader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub contract: ModelContract,
    pub model: Arc<dyn Model>,
}

/// Single slot holding the process' classifier. Populated at most once by
/// the first successful load; never reloaded afterwards.
pub struct ModelCache {
    loader: Arc<dyn ModelLoader>,
    slot: Mutex<Option<LoadedModel>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelCache {
    pub fn new(loader: Arc<dyn ModelLoader>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            loader,
            slot: Mutex::new(None),
            logger: logger.with_namespace("model_cache"),
        }
    }

    pub fn get_or_load(
        &self,
        path: &Path,
        contract: &ModelContract,
    ) -> Result<LoadedModel, DiagnosisError> {
        // The slot only ever goes from None to Some, so a poisoned lock still
        // holds a consistent value.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(loaded) = slot.as_ref() {
            if loaded.path != path {
                let _ = self.logger.info(&format!(
                    "Model already loaded from {}; ignoring request for {}",
                    loaded.path.display(),
                    path.display()
                ));
            }
            return Ok(loaded.clone());
        }

        let _ = self.logger.info(&format!(
            "Loading model from {} (contract {})",
            path.display(),
            contract.id
        ));

        let model = self.loader.load(path, contract).map_err(|source| {
            let _ = self.logger.error(&format!(
                "Error loading model {}: {}",
                path.display(),
                source
            ));
            DiagnosisError::ModelLoad {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let loaded = LoadedModel {
            path: path.to_path_buf(),
            contract: contract.clone(),
            model,
        };
        *slot = Some(loaded.clone());

        let _ = self.logger.info("Model loaded successfully");

        Ok(loaded)
    }

    pub fn current(&self) -> Option<LoadedModel> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn loaded_path(&self) -> Option<PathBuf> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|l| l.path.clone())
    }
}
