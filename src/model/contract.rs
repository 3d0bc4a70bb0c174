use crate::error::DiagnosisError;
use crate::label_table::{ClassLabelTable, TreatmentTable};
use std::path::Path;

/// Pixel encoding the model was trained on. Never auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRange {
    /// 0..=255 as f32.
    Raw,
    /// 0..=1, pixel / 255.
    UnitInterval,
    /// -1..=1, pixel / 127.5 - 1 (MobileNetV2 scaling).
    SymmetricUnit,
}

impl ValueRange {
    pub fn apply(self, value: u8) -> f32 {
        let value = value as f32;
        match self {
            ValueRange::Raw => value,
            ValueRange::UnitInterval => value / 255.0,
            ValueRange::SymmetricUnit => value / 127.5 - 1.0,
        }
    }
}

/// Everything a model artifact was trained with: input shape, pixel
/// encoding and taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelContract {
    pub id: String,
    pub input_height: u32,
    pub input_width: u32,
    pub channels: u32,
    pub value_range: ValueRange,
    pub labels: ClassLabelTable,
    pub treatments: TreatmentTable,
    /// When set, "healthy" is only reported at or above this confidence.
    pub healthy_threshold: Option<f32>,
}

impl ModelContract {
    pub const TEA_LEAF_128_RAW: &'static str = "tea-leaf-128-raw";
    pub const TEA_LEAF_224_UNIT: &'static str = "tea-leaf-224-unit";
    pub const TEA_LEAF_224_MOBILENET: &'static str = "tea-leaf-224-mobilenet";

    pub fn tea_leaf_128_raw() -> Self {
        Self {
            id: Self::TEA_LEAF_128_RAW.to_string(),
            input_height: 128,
            input_width: 128,
            channels: 3,
            value_range: ValueRange::Raw,
            labels: ClassLabelTable::tea_leaf(),
            treatments: TreatmentTable::tea_leaf(),
            healthy_threshold: None,
        }
    }

    pub fn tea_leaf_224_unit() -> Self {
        Self {
            id: Self::TEA_LEAF_224_UNIT.to_string(),
            input_height: 224,
            input_width: 224,
            channels: 3,
            value_range: ValueRange::UnitInterval,
            labels: ClassLabelTable::tea_leaf_title_case(),
            treatments: TreatmentTable::tea_leaf_title_case(),
            healthy_threshold: Some(0.5),
        }
    }

    pub fn tea_leaf_224_mobilenet() -> Self {
        Self {
            id: Self::TEA_LEAF_224_MOBILENET.to_string(),
            input_height: 224,
            input_width: 224,
            channels: 3,
            value_range: ValueRange::SymmetricUnit,
            labels: ClassLabelTable::tea_leaf_snake_case(),
            treatments: TreatmentTable::tea_leaf_snake_case(),
            healthy_threshold: None,
        }
    }

    pub fn by_id(id: &str) -> Result<Self, DiagnosisError> {
        match id {
            Self::TEA_LEAF_128_RAW => Ok(Self::tea_leaf_128_raw()),
            Self::TEA_LEAF_224_UNIT => Ok(Self::tea_leaf_224_unit()),
            Self::TEA_LEAF_224_MOBILENET => Ok(Self::tea_leaf_224_mobilenet()),
            other => Err(DiagnosisError::InvalidConfiguration(format!(
                "unknown model contract: {}",
                other
            ))),
        }
    }

    /// Looks up the contract pinned to a model artifact by its file stem.
    pub fn for_model_path(path: &Path) -> Result<Self, DiagnosisError> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        match stem {
            "trained_model" => Ok(Self::tea_leaf_128_raw()),
            "tea_disease_model" => Ok(Self::tea_leaf_224_unit()),
            "tea_disease_mobilenet" => Ok(Self::tea_leaf_224_mobilenet()),
            _ => Err(DiagnosisError::InvalidConfiguration(format!(
                "no model contract registered for {}; pass one explicitly",
                path.display()
            ))),
        }
    }

    /// Input shape as fed to the model: (batch, height, width, channels).
    pub fn input_shape(&self) -> [usize; 4] {
        [
            1,
            self.input_height as usize,
            self.input_width as usize,
            self.channels as usize,
        ]
    }
}
