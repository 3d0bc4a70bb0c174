use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tea_leaf_diagnosis::cli::{self, Cli};
use tea_leaf_diagnosis::config::Config;
use tea_leaf_diagnosis::diagnosis::report::DiagnosticReport;
use tea_leaf_diagnosis::diagnosis::service::InferenceService;
use tea_leaf_diagnosis::library::logger::{impl_console::LoggerConsole, interface::Logger};
use tea_leaf_diagnosis::model::cache::ModelCache;
use tea_leaf_diagnosis::model::impl_tract_onnx::ModelLoaderTractOnnx;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return exit_on_usage_error(e),
    };
    let start = Instant::now();

    let defaults = Config::default();
    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(defaults.logger_timezone));

    let outcome = cli.apply(defaults).and_then(|config| {
        let cache = Arc::new(ModelCache::new(
            Arc::new(ModelLoaderTractOnnx),
            logger.clone(),
        ));
        let service = InferenceService::new(&config, cache, logger.clone());
        service.diagnose_file(&cli.image)
    });

    let report = DiagnosticReport::from_outcome(outcome, start.elapsed());

    match report.to_json(cli.pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            let _ = logger.error(&format!("Failed to serialize report: {}", e));
            return ExitCode::FAILURE;
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Help and version go to stdout with status 0. Any other parse error is
/// reported as a JSON failure record with status 1.
fn exit_on_usage_error(error: clap::Error) -> ExitCode {
    match cli::usage_failure(&error) {
        None => {
            let _ = error.print();
            ExitCode::SUCCESS
        }
        Some(report) => {
            match report.to_json(false) {
                Ok(json) => println!("{}", json),
                Err(_) => eprintln!("{}", error),
            }
            ExitCode::FAILURE
        }
    }
}
