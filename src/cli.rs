use crate::config::{Config, ModelCandidate};
use crate::diagnosis::report::DiagnosticReport;
use crate::error::DiagnosisError;
use crate::model::contract::ModelContract;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Classifies a tea-leaf photograph and prints a JSON diagnostic report.
#[derive(Debug, Parser)]
#[command(name = "tea-leaf-diagnosis", version)]
pub struct Cli {
    /// Image file to diagnose.
    pub image: PathBuf,

    /// Candidate model file, tried in the order given. Replaces the default
    /// candidate list.
    #[arg(long = "model", value_name = "PATH")]
    pub models: Vec<PathBuf>,

    /// Contract every `--model` was trained with. Defaults to the contract
    /// registered for each model's file name.
    #[arg(long, value_name = "ID")]
    pub contract: Option<String>,

    /// When the resolved model fails to load, try the next existing one.
    #[arg(long)]
    pub fallback_on_load_error: bool,

    /// Pretty-print the report.
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn apply(&self, mut config: Config) -> Result<Config, DiagnosisError> {
        if !self.models.is_empty() {
            config.model_candidates = self
                .models
                .iter()
                .map(|path| -> Result<ModelCandidate, DiagnosisError> {
                    let contract = match &self.contract {
                        Some(id) => ModelContract::by_id(id)?,
                        None => ModelContract::for_model_path(path)?,
                    };
                    Ok(ModelCandidate::new(path.clone(), contract))
                })
                .collect::<Result<Vec<_>, _>>()?;
        } else if self.contract.is_some() {
            return Err(DiagnosisError::InvalidConfiguration(
                "--contract requires at least one --model".to_string(),
            ));
        }

        config.fallback_on_load_error |= self.fallback_on_load_error;

        Ok(config)
    }
}

/// Failure report for a command line clap rejected. `None` for `--help` and
/// `--version`, which clap prints itself.
pub fn usage_failure(error: &clap::Error) -> Option<DiagnosticReport> {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        _ => {
            // Keep the reason, drop the usage block and the `--help` hint.
            let rendered = error.render().to_string();
            let reason = rendered
                .split("\n\n")
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            Some(DiagnosticReport::failure(&DiagnosisError::Usage(reason)))
        }
    }
}
