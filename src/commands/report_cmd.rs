use std::process::ExitCode;

use tracing::error;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_cost_report;
use crate::commands::resolve_model::build_datasets;
use crate::services::cost_report::build_cost_report;

pub fn report_command(cmd: Commands) -> ExitCode {
    if let Commands::Report { model } = cmd {
        match build_datasets(&model) {
            Ok((_, datasets)) => println!("{}", format_cost_report(&build_cost_report(&datasets))),
            Err(e) => {
                error!(error = %e, "dataset generation failed");
                eprintln!("Failed to build report: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
