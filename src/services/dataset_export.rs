use std::io::{self, Write};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::domain::datasets::Datasets;

#[derive(Error, Debug)]
pub enum DatasetExportError {
    #[error("failed to write datasets: {0}")]
    Write(#[from] io::Error),
    #[error("failed to serialize datasets to yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize datasets to json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Json,
}

#[derive(Serialize)]
struct ExportMetadata {
    generator: &'static str,
    version: &'static str,
    generated_on: String,
}

#[derive(Serialize)]
struct DatasetsRecord<'a> {
    metadata: ExportMetadata,
    #[serde(flatten)]
    datasets: &'a Datasets,
}

pub fn serialize_datasets<W: Write>(
    writer: &mut W,
    datasets: &Datasets,
    format: ExportFormat,
    generated_on: NaiveDate,
) -> Result<(), DatasetExportError> {
    let record = DatasetsRecord {
        metadata: ExportMetadata {
            generator: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_on: generated_on.format("%Y-%m-%d").to_string(),
        },
        datasets,
    };

    let contents = match format {
        ExportFormat::Yaml => serde_yaml::to_string(&record)?,
        ExportFormat::Json => serde_json::to_string_pretty(&record)?,
    };
    writer.write_all(contents.as_bytes())?;
    Ok(())
}
