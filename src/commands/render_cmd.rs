use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use crate::commands::base_commands::Commands;
use crate::commands::resolve_model::build_datasets;
use crate::services::dashboard::write_dashboard;

pub fn render_command(cmd: Commands) -> ExitCode {
    if let Commands::Render { output, model } = cmd {
        let (parameters, datasets) = match build_datasets(&model) {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "dataset generation failed");
                eprintln!("Failed to generate datasets: {e}");
                return ExitCode::FAILURE;
            }
        };
        info!(seed = parameters.seed, output = %output, "rendering charts");

        match write_dashboard(Path::new(&output), &datasets, &parameters.page) {
            Ok(page_path) => {
                println!("Dashboard written to {output}");
                info!(page = %page_path.display(), "dashboard page written");
            }
            Err(e) => {
                error!(error = %e, "dashboard rendering failed");
                eprintln!("Failed to render dashboard: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
