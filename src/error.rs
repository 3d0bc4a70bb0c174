use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("No model file found in any of the expected locations: {}", display_paths(.candidates))]
    ModelNotFound { candidates: Vec<PathBuf> },

    #[error("Failed to load model {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Image file not found or unreadable {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Failed to process image: {0}")]
    ImagePreprocess(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid arguments: {0}")]
    Usage(String),
}

impl DiagnosisError {
    pub fn kind(&self) -> &'static str {
        match self {
            DiagnosisError::ModelNotFound { .. } => "model_not_found",
            DiagnosisError::ModelLoad { .. } => "model_load",
            DiagnosisError::ImageRead { .. } => "image_read",
            DiagnosisError::ImageDecode(_) => "image_decode",
            DiagnosisError::ImagePreprocess(_) => "image_preprocess",
            DiagnosisError::Inference(_) => "inference",
            DiagnosisError::InvalidConfiguration(_) => "invalid_configuration",
            DiagnosisError::Usage(_) => "usage",
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    let joined = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}
