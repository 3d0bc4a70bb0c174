use crate::error::DiagnosisError;
use crate::model::contract::{ModelContract, ValueRange};
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Resampling used for every resize. Bilinear, matching how the training
/// images were produced.
pub const RESIZE_FILTER: imageops::FilterType = imageops::FilterType::Triangle;

/// A single image laid out as (1, H, W, C).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: tract_ndarray::Array4<f32>,
}

impl ImageTensor {
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn values(&self) -> &tract_ndarray::Array4<f32> {
        &self.data
    }

    pub fn into_tensor(self) -> Tensor {
        self.data.into_tensor()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePreprocessor {
    pub height: u32,
    pub width: u32,
    pub channels: u32,
    pub value_range: ValueRange,
}

impl ImagePreprocessor {
    pub fn new(height: u32, width: u32, channels: u32, value_range: ValueRange) -> Self {
        Self {
            height,
            width,
            channels,
            value_range,
        }
    }

    pub fn for_contract(contract: &ModelContract) -> Self {
        Self::new(
            contract.input_height,
            contract.input_width,
            contract.channels,
            contract.value_range,
        )
    }

    pub fn prepare(&self, image_bytes: &[u8]) -> Result<ImageTensor, DiagnosisError> {
        let image = image::load_from_memory(image_bytes)
            .map_err(|e| DiagnosisError::ImageDecode(e.to_string()))?;
        self.prepare_image(&image)
    }

    pub fn prepare_image(&self, image: &DynamicImage) -> Result<ImageTensor, DiagnosisError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DiagnosisError::ImagePreprocess(format!(
                "degenerate image of size {}x{}",
                image.width(),
                image.height()
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(DiagnosisError::ImagePreprocess(format!(
                "invalid target size {}x{}",
                self.width, self.height
            )));
        }

        // Row-major HWC bytes after color conversion and resize.
        let pixels = match self.channels {
            3 => imageops::resize(&image.to_rgb8(), self.width, self.height, RESIZE_FILTER)
                .into_raw(),
            1 => imageops::resize(&image.to_luma8(), self.width, self.height, RESIZE_FILTER)
                .into_raw(),
            other => {
                return Err(DiagnosisError::ImagePreprocess(format!(
                    "unsupported channel count: {}",
                    other
                )))
            }
        };

        let values: Vec<f32> = pixels
            .into_iter()
            .map(|v| self.value_range.apply(v))
            .collect();

        let shape = (
            1,
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        );
        let data = tract_ndarray::Array4::from_shape_vec(shape, values)
            .map_err(|e| DiagnosisError::ImagePreprocess(e.to_string()))?;

        Ok(ImageTensor { data })
    }
}
