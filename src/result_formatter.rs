use crate::error::DiagnosisError;
use crate::label_table::{ClassLabelTable, TreatmentTable, FALLBACK_TREATMENT};
use serde::Serialize;
use std::cmp::Ordering;

pub const HEALTHY_MESSAGE: &str = "Good news! The tea leaves appear to be healthy.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    pub disease: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticResult {
    pub prediction: String,
    pub confidence: f32,
    pub all_predictions: Vec<RankedPrediction>,
    pub healthy: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
}

/// Ranks raw probabilities and annotates the top class.
///
/// Ties keep the lower class index first. With `healthy_threshold` set, a
/// top-ranked healthy class must exceed it to be reported as healthy.
///
/// Fails when there is not exactly one finite probability per label.
pub fn format(
    raw_probabilities: &[f32],
    labels: &ClassLabelTable,
    treatments: &TreatmentTable,
    healthy_threshold: Option<f32>,
) -> Result<DiagnosticResult, DiagnosisError> {
    if raw_probabilities.len() != labels.len() {
        return Err(DiagnosisError::Inference(format!(
            "received {} values, expected {} classes",
            raw_probabilities.len(),
            labels.len()
        )));
    }
    if let Some(index) = raw_probabilities.iter().position(|p| !p.is_finite()) {
        return Err(DiagnosisError::Inference(format!(
            "non-finite confidence for class {}",
            index
        )));
    }

    let mut ranked: Vec<(usize, f32)> = raw_probabilities.iter().copied().enumerate().collect();
    // Values are finite here. sort_by is stable, so equal confidences
    // (including -0.0 and 0.0) stay in index order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let all_predictions: Vec<RankedPrediction> = ranked
        .iter()
        .map(|&(index, confidence)| RankedPrediction {
            disease: label_name(labels, index),
            confidence,
        })
        .collect();

    let (top_index, confidence) = ranked
        .first()
        .copied()
        .ok_or_else(|| DiagnosisError::Inference("no class probabilities".to_string()))?;
    let prediction = label_name(labels, top_index);
    let percent = f64::from(confidence) * 100.0;

    let top_is_healthy = labels.get(top_index).is_some_and(|l| l.is_healthy());
    let confident_enough = healthy_threshold.map_or(true, |t| confidence > t);
    let healthy = top_is_healthy && confident_enough;

    let (message, treatment) = if healthy {
        (HEALTHY_MESSAGE.to_string(), None)
    } else if top_is_healthy {
        (
            format!(
                "The tea leaves may be healthy, but confidence is too low ({:.1}%) to be sure.",
                percent
            ),
            Some(FALLBACK_TREATMENT.to_string()),
        )
    } else {
        (
            format!(
                "The analysis detected {} disease with {:.1}% confidence.",
                prediction, percent
            ),
            Some(treatments.lookup(&prediction).to_string()),
        )
    };

    Ok(DiagnosticResult {
        prediction,
        confidence,
        all_predictions,
        healthy,
        message,
        treatment,
    })
}

fn label_name(labels: &ClassLabelTable, index: usize) -> String {
    labels
        .get(index)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| format!("class {}", index))
}
