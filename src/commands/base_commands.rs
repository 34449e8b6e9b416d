use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::services::dataset_export::ExportFormat;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Model inputs shared by every command that computes datasets. Flags win over
/// values from the config file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ModelArgs {
    /// Optional model config YAML
    #[arg(short, long)]
    pub config: Option<String>,
    /// Seed for the simulated per-patient costs
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of simulated patients per treatment
    #[arg(long)]
    pub samples: Option<usize>,
    /// First year of the timeline
    #[arg(long)]
    pub start_year: Option<i32>,
    /// Number of years in the timeline
    #[arg(long)]
    pub years: Option<u32>,
    /// Yearly cost growth of the recurring treatment
    #[arg(long)]
    pub annual_increment: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate all datasets and write them to a YAML or JSON file
    Generate {
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Render every chart and a Markdown dashboard page into a directory
    Render {
        /// Output directory
        #[arg(short, long)]
        output: String,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Print a text report of the cost comparison
    Report {
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
