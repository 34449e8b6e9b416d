use std::process::ExitCode;

use chrono::Local;
use tracing::{error, info};

use crate::commands::base_commands::Commands;
use crate::commands::resolve_model::build_datasets;
use crate::services::dataset_export::serialize_datasets;

pub fn generate_command(cmd: Commands) -> ExitCode {
    if let Commands::Generate {
        output,
        format,
        model,
    } = cmd
    {
        let (parameters, datasets) = match build_datasets(&model) {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "dataset generation failed");
                eprintln!("Failed to generate datasets: {e}");
                return ExitCode::FAILURE;
            }
        };
        info!(seed = parameters.seed, ?format, output = %output, "exporting datasets");

        let mut buffer = Vec::new();
        if let Err(e) = serialize_datasets(&mut buffer, &datasets, format, Local::now().date_naive()) {
            error!(error = %e, "dataset serialization failed");
            eprintln!("Failed to serialize datasets: {e}");
            return ExitCode::FAILURE;
        }
        if let Err(e) = std::fs::write(&output, buffer) {
            error!(error = %e, output = %output, "writing datasets failed");
            eprintln!("Failed to write output file: {e}");
            return ExitCode::FAILURE;
        }
        println!("Datasets written to {output}");
    }
    ExitCode::SUCCESS
}
