use crate::error::BoxError;
use crate::model::contract::ModelContract;
use crate::model::interface::{Model, ModelLoader};
use crate::preprocess::image::ImageTensor;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ModelTractOnnx {
    model: TypedRunnableModel<TypedModel>,
    input_shape: [usize; 4],
}

impl ModelTractOnnx {
    pub fn new(path: &Path, contract: &ModelContract) -> Result<Self, BoxError> {
        let input_shape = contract.input_shape();

        let model = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(0, f32::fact(input_shape).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, input_shape })
    }
}

impl Model for ModelTractOnnx {
    fn infer(&self, tensor: &ImageTensor) -> Result<Vec<f32>, BoxError> {
        if tensor.shape() != &self.input_shape[..] {
            return Err(format!(
                "input shape {:?} does not match model input {:?}",
                tensor.shape(),
                self.input_shape
            )
            .into());
        }

        let input = tensor.clone().into_tensor();
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;

        let output = outputs
            .first()
            .ok_or("model produced no outputs")?
            .to_array_view::<f32>()?;

        // Expect [1, classes] or [classes]; a larger batch means a bad export.
        let shape = output.shape();
        if shape.len() > 1 && shape[0] != 1 {
            return Err(format!("unexpected output shape {:?}", shape).into());
        }

        Ok(output.iter().copied().collect())
    }
}

pub struct ModelLoaderTractOnnx;

impl ModelLoader for ModelLoaderTractOnnx {
    fn load(&self, path: &Path, contract: &ModelContract) -> Result<Arc<dyn Model>, BoxError> {
        Ok(Arc::new(ModelTractOnnx::new(path, contract)?))
    }
}
