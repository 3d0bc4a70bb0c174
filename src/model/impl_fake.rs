use crate::error::BoxError;
use crate::model::contract::ModelContract;
use crate::model::interface::{Model, ModelLoader};
use crate::preprocess::image::ImageTensor;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Returns fixed probabilities and counts forward passes.
pub struct ModelFake {
    probabilities: Vec<f32>,
    infer_count: Arc<AtomicUsize>,
}

impl Model for ModelFake {
    fn infer(&self, _tensor: &ImageTensor) -> Result<Vec<f32>, BoxError> {
        self.infer_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.probabilities.clone())
    }
}

/// Loader that never touches the artifact content. Paths registered with
/// `fail_on` fail to load; every `load` call is counted.
#[derive(Clone)]
pub struct ModelLoaderFake {
    probabilities: Vec<f32>,
    failing: Arc<Mutex<HashMap<PathBuf, String>>>,
    loaded: Arc<Mutex<Vec<PathBuf>>>,
    load_count: Arc<AtomicUsize>,
    infer_count: Arc<AtomicUsize>,
}

impl ModelLoaderFake {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self {
            probabilities,
            failing: Arc::new(Mutex::new(HashMap::new())),
            loaded: Arc::new(Mutex::new(Vec::new())),
            load_count: Arc::new(AtomicUsize::new(0)),
            infer_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fail_on(self, path: &Path, reason: &str) -> Self {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(path.to_path_buf(), reason.to_string());
        }
        self
    }

    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    pub fn infer_count(&self) -> usize {
        self.infer_count.load(Ordering::SeqCst)
    }

    /// Paths whose load succeeded, in call order.
    pub fn loaded_paths(&self) -> Vec<PathBuf> {
        self.loaded.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(&self, path: &Path, _contract: &ModelContract) -> Result<Arc<dyn Model>, BoxError> {
        self.load_count.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.failing.lock().map_err(|e| e.to_string())?.get(path) {
            return Err(reason.clone().into());
        }

        self.loaded
            .lock()
            .map_err(|e| e.to_string())?
            .push(path.to_path_buf());

        Ok(Arc::new(ModelFake {
            probabilities: self.probabilities.clone(),
            infer_count: self.infer_count.clone(),
        }))
    }
}
