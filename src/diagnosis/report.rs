use crate::diagnosis::service::Diagnosis;
use crate::error::DiagnosisError;
use crate::result_formatter::RankedPrediction;
use serde::Serialize;
use std::time::Duration;

/// Flat record printed for the calling process. `success` is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiagnosticReport {
    Success(SuccessReport),
    Failure(FailureReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessReport {
    pub success: bool,
    pub model: String,
    pub prediction: String,
    /// Same as `prediction`; older consumers read this name.
    pub disease: String,
    pub confidence: f32,
    pub all_predictions: Vec<RankedPrediction>,
    pub healthy: bool,
    /// Same as `healthy`.
    pub is_healthy: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    pub processing_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
    pub error_kind: String,
}

impl DiagnosticReport {
    pub fn success(diagnosis: Diagnosis, elapsed: Duration) -> Self {
        let result = diagnosis.result;
        DiagnosticReport::Success(SuccessReport {
            success: true,
            model: diagnosis.contract_id,
            disease: result.prediction.clone(),
            prediction: result.prediction,
            confidence: result.confidence,
            all_predictions: result.all_predictions,
            healthy: result.healthy,
            is_healthy: result.healthy,
            message: result.message,
            treatment: result.treatment,
            processing_time: elapsed.as_secs_f64(),
        })
    }

    pub fn failure(error: &DiagnosisError) -> Self {
        DiagnosticReport::Failure(FailureReport {
            success: false,
            error: error.to_string(),
            error_kind: error.kind().to_string(),
        })
    }

    pub fn from_outcome(outcome: Result<Diagnosis, DiagnosisError>, elapsed: Duration) -> Self {
        match outcome {
            Ok(diagnosis) => Self::success(diagnosis, elapsed),
            Err(error) => Self::failure(&error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DiagnosticReport::Success(_))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
