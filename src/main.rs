mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::io;
use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::generate_cmd::generate_command;
use crate::commands::render_cmd::render_command;
use crate::commands::report_cmd::report_command;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        cmd @ Commands::Generate { .. } => generate_command(cmd),
        cmd @ Commands::Render { .. } => render_command(cmd),
        cmd @ Commands::Report { .. } => report_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut io::stdout());
            ExitCode::SUCCESS
        }
    }
}
