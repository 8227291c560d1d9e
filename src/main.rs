//! Sales Prep - command line entry point
//!
//! Runs the preparation once with the settings found in the working
//! directory (or the built-in defaults).

use std::process::ExitCode;
use tracing::{error, info, warn};

use sales_prep::logger::init_logger;
use sales_prep::{create_features, PipelineOutcome, PipelineSettings};

fn main() -> ExitCode {
    let settings = match PipelineSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logger(&settings.log);
    info!("sales_prep {} starting", sales_prep::VERSION);

    match create_features(&settings) {
        Ok(PipelineOutcome::Persisted { rows, .. }) => {
            info!("Feature table ready with {} rows", rows);
            ExitCode::SUCCESS
        }
        Ok(PipelineOutcome::PersistFailed { .. }) if settings.strict_persist => ExitCode::from(2),
        Ok(PipelineOutcome::PersistFailed { path, .. }) => {
            warn!("continuing without {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
