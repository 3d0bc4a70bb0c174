use crate::error::BoxError;
use crate::model::contract::ModelContract;
use crate::preprocess::image::ImageTensor;
use std::path::Path;
use std::sync::Arc;

/// A deserialized classifier ready for forward passes.
pub trait Model: Send + Sync {
    /// Runs one forward pass and returns the raw class probabilities.
    fn infer(&self, tensor: &ImageTensor) -> Result<Vec<f32>, BoxError>;
}

pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &Path, contract: &ModelContract) -> Result<Arc<dyn Model>, BoxError>;
}
