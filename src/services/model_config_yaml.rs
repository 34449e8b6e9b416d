use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::model_parameters::{ModelParameters, PageCopy, TimelineParameters};
use crate::domain::treatment::{CategoryCosts, CostDistribution};

#[derive(Error, Debug)]
pub enum ModelConfigError {
    #[error("failed to read model config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse model config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid cost distribution for {treatment}: mean {mean}, std_dev {std_dev}")]
    InvalidDistribution {
        treatment: String,
        mean: f64,
        std_dev: f64,
    },
    #[error("invalid cost for {treatment} {field}: {value}")]
    InvalidCost {
        treatment: String,
        field: &'static str,
        value: f64,
    },
    #[error("{treatment} treatment name must not be empty")]
    EmptyTreatmentName { treatment: &'static str },
    #[error("both treatments are named {0}")]
    DuplicateTreatmentName(String),
    #[error("samples per treatment must be greater than zero")]
    InvalidSampleCount,
    #[error("annual increment must be a finite, non-negative number: {0}")]
    InvalidAnnualIncrement(f64),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelConfigRecord {
    seed: Option<u64>,
    samples_per_treatment: Option<usize>,
    one_time: Option<OneTimeRecord>,
    recurring: Option<RecurringRecord>,
    timeline: Option<TimelineRecord>,
    page: Option<PageRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OneTimeRecord {
    name: Option<String>,
    chart_label: Option<String>,
    sample_mean: Option<f64>,
    sample_std_dev: Option<f64>,
    initial_cost: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecurringRecord {
    name: Option<String>,
    chart_label: Option<String>,
    sample_mean: Option<f64>,
    sample_std_dev: Option<f64>,
    costs: Option<CategoryCostsRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryCostsRecord {
    initial_implant: Option<f64>,
    follow_up_maintenance: Option<f64>,
    surgical_revision: Option<f64>,
    rehospitalization: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimelineRecord {
    start_year: Option<i32>,
    years: Option<u32>,
    annual_increment: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PageRecord {
    title: Option<String>,
    heading: Option<String>,
    introduction: Option<String>,
    conclusion: Option<String>,
    credit: Option<String>,
}

/// Loads a model config file and applies it on top of the canonical
/// [`ModelParameters`]. Fields missing from the file keep their default.
///
/// # Errors
/// - Returns an error on I/O or parse failures.
/// - Returns an error when a distribution, cost, sample count or increment is
///   invalid.
pub fn load_model_config_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<ModelParameters, ModelConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ModelConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_model_config_from_yaml_str(&contents)
}

pub fn deserialize_model_config_from_yaml_str(
    yaml: &str,
) -> Result<ModelParameters, ModelConfigError> {
    // An empty document deserializes to unit, not to an empty mapping.
    let record: ModelConfigRecord = if yaml.trim().is_empty() {
        ModelConfigRecord::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    apply_record(ModelParameters::default(), record)
}

fn apply_record(
    mut parameters: ModelParameters,
    record: ModelConfigRecord,
) -> Result<ModelParameters, ModelConfigError> {
    if let Some(seed) = record.seed {
        parameters.seed = seed;
    }
    if let Some(samples) = record.samples_per_treatment {
        parameters.samples_per_treatment = samples;
    }

    if let Some(one_time) = record.one_time {
        let profile = &mut parameters.one_time;
        if let Some(name) = one_time.name {
            profile.name = name;
        }
        if let Some(chart_label) = one_time.chart_label {
            profile.chart_label = chart_label;
        }
        profile.distribution = resolve_distribution(
            &profile.name,
            profile.distribution,
            one_time.sample_mean,
            one_time.sample_std_dev,
        )?;
        if let Some(initial_cost) = one_time.initial_cost {
            profile.initial_cost = initial_cost;
        }
    }

    if let Some(recurring) = record.recurring {
        let profile = &mut parameters.recurring;
        if let Some(name) = recurring.name {
            profile.name = name;
        }
        if let Some(chart_label) = recurring.chart_label {
            profile.chart_label = chart_label;
        }
        profile.distribution = resolve_distribution(
            &profile.name,
            profile.distribution,
            recurring.sample_mean,
            recurring.sample_std_dev,
        )?;
        if let Some(costs) = recurring.costs {
            profile.costs = apply_costs(profile.costs, costs);
        }
    }

    if let Some(timeline) = record.timeline {
        parameters.timeline = apply_timeline(parameters.timeline, timeline);
    }

    if let Some(page) = record.page {
        parameters.page = apply_page(parameters.page, page);
    }

    validate_parameters(&parameters)?;
    Ok(parameters)
}

fn resolve_distribution(
    treatment: &str,
    current: CostDistribution,
    mean: Option<f64>,
    std_dev: Option<f64>,
) -> Result<CostDistribution, ModelConfigError> {
    if mean.is_none() && std_dev.is_none() {
        return Ok(current);
    }
    let mean = mean.unwrap_or(current.mean());
    let std_dev = std_dev.unwrap_or(current.std_dev());
    CostDistribution::new(mean, std_dev).ok_or_else(|| ModelConfigError::InvalidDistribution {
        treatment: treatment.to_string(),
        mean,
        std_dev,
    })
}

fn apply_costs(mut costs: CategoryCosts, record: CategoryCostsRecord) -> CategoryCosts {
    if let Some(value) = record.initial_implant {
        costs.initial_implant = value;
    }
    if let Some(value) = record.follow_up_maintenance {
        costs.follow_up_maintenance = value;
    }
    if let Some(value) = record.surgical_revision {
        costs.surgical_revision = value;
    }
    if let Some(value) = record.rehospitalization {
        costs.rehospitalization = value;
    }
    costs
}

fn apply_timeline(mut timeline: TimelineParameters, record: TimelineRecord) -> TimelineParameters {
    if let Some(start_year) = record.start_year {
        timeline.start_year = start_year;
    }
    if let Some(years) = record.years {
        timeline.years = years;
    }
    if let Some(annual_increment) = record.annual_increment {
        timeline.annual_increment = annual_increment;
    }
    timeline
}

fn apply_page(mut page: PageCopy, record: PageRecord) -> PageCopy {
    if let Some(title) = record.title {
        page.title = title;
    }
    if let Some(heading) = record.heading {
        page.heading = heading;
    }
    if let Some(introduction) = record.introduction {
        page.introduction = introduction;
    }
    if let Some(conclusion) = record.conclusion {
        page.conclusion = conclusion;
    }
    if record.credit.is_some() {
        page.credit = record.credit;
    }
    page
}

/// Checks the invariants that hold no matter where the parameters came from.
/// The timeline horizon itself is checked by the cost model.
pub fn validate_parameters(parameters: &ModelParameters) -> Result<(), ModelConfigError> {
    if parameters.samples_per_treatment == 0 {
        return Err(ModelConfigError::InvalidSampleCount);
    }
    let one_time_name = parameters.one_time.name.trim();
    let recurring_name = parameters.recurring.name.trim();
    if one_time_name.is_empty() {
        return Err(ModelConfigError::EmptyTreatmentName { treatment: "one-time" });
    }
    if recurring_name.is_empty() {
        return Err(ModelConfigError::EmptyTreatmentName { treatment: "recurring" });
    }
    if one_time_name == recurring_name {
        return Err(ModelConfigError::DuplicateTreatmentName(recurring_name.to_string()));
    }
    let increment = parameters.timeline.annual_increment;
    if !increment.is_finite() || increment < 0.0 {
        return Err(ModelConfigError::InvalidAnnualIncrement(increment));
    }

    validate_cost(
        &parameters.one_time.name,
        "initial_cost",
        parameters.one_time.initial_cost,
    )?;
    let costs = &parameters.recurring.costs;
    let name = &parameters.recurring.name;
    validate_cost(name, "initial_implant", costs.initial_implant)?;
    validate_cost(name, "follow_up_maintenance", costs.follow_up_maintenance)?;
    validate_cost(name, "surgical_revision", costs.surgical_revision)?;
    validate_cost(name, "rehospitalization", costs.rehospitalization)?;
    Ok(())
}

fn validate_cost(treatment: &str, field: &'static str, value: f64) -> Result<(), ModelConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelConfigError::InvalidCost {
            treatment: treatment.to_string(),
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn empty_config_yields_canonical_parameters() {
        let parameters = deserialize_model_config_from_yaml_str("").unwrap();
        assert_eq!(parameters, ModelParameters::default());
    }

    #[test]
    fn config_overrides_only_named_fields() {
        let yaml = r#"
seed: 7
one_time:
  name: Gene Therapy
  sample_std_dev: 250
recurring:
  costs:
    surgical_revision: 15000
timeline:
  years: 10
page:
  title: Alternate Dashboard
  credit: Created by the research team
"#;
        let parameters = deserialize_model_config_from_yaml_str(yaml).unwrap();

        assert_eq!(parameters.seed, 7);
        assert_eq!(parameters.samples_per_treatment, 100);
        assert_eq!(parameters.one_time.name, "Gene Therapy");
        assert_eq!(parameters.one_time.chart_label, "NEUROWEAVE");
        assert_eq!(parameters.one_time.distribution.mean(), 12000.0);
        assert_eq!(parameters.one_time.distribution.std_dev(), 250.0);
        assert_eq!(parameters.recurring.name, "VP Shunt");
        assert_eq!(parameters.recurring.costs.surgical_revision, 15000.0);
        assert_eq!(parameters.recurring.costs.initial_implant, 10000.0);
        assert_eq!(parameters.recurring.costs.total(), 45000.0);
        assert_eq!(parameters.timeline.start_year, 2023);
        assert_eq!(parameters.timeline.years, 10);
        assert_eq!(parameters.page.title, "Alternate Dashboard");
        assert_eq!(
            parameters.page.credit.as_deref(),
            Some("Created by the research team")
        );
    }

    #[test]
    fn config_rejects_invalid_distribution() {
        let yaml = "recurring:\n  sample_std_dev: -3\n";
        let error = deserialize_model_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            ModelConfigError::InvalidDistribution { ref treatment, .. } if treatment == "VP Shunt"
        ));
    }

    #[test]
    fn config_rejects_distribution_reaching_zero() {
        let yaml = "one_time:\n  sample_mean: 10\n  sample_std_dev: 1000\n";
        let error = deserialize_model_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            ModelConfigError::InvalidDistribution { ref treatment, .. } if treatment == "NEUROWEAVE"
        ));
    }

    #[test]
    fn config_rejects_empty_treatment_name() {
        let error = deserialize_model_config_from_yaml_str("recurring:\n  name: \"\"\n").unwrap_err();
        assert!(matches!(
            error,
            ModelConfigError::EmptyTreatmentName { treatment: "recurring" }
        ));

        let error = deserialize_model_config_from_yaml_str("one_time:\n  name: \"  \"\n").unwrap_err();
        assert!(matches!(
            error,
            ModelConfigError::EmptyTreatmentName { treatment: "one-time" }
        ));
    }

    #[test]
    fn config_rejects_duplicate_treatment_names() {
        let error = deserialize_model_config_from_yaml_str("one_time:\n  name: VP Shunt\n").unwrap_err();
        assert!(matches!(
            error,
            ModelConfigError::DuplicateTreatmentName(ref name) if name == "VP Shunt"
        ));
    }

    #[test]
    fn config_rejects_negative_cost() {
        let yaml = "one_time:\n  initial_cost: -1\n";
        let error = deserialize_model_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            ModelConfigError::InvalidCost {
                field: "initial_cost",
                ..
            }
        ));
    }

    #[test]
    fn config_rejects_zero_samples_and_negative_increment() {
        let error = deserialize_model_config_from_yaml_str("samples_per_treatment: 0\n").unwrap_err();
        assert!(matches!(error, ModelConfigError::InvalidSampleCount));

        let error =
            deserialize_model_config_from_yaml_str("timeline:\n  annual_increment: -5\n").unwrap_err();
        assert!(matches!(error, ModelConfigError::InvalidAnnualIncrement(_)));
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let error = deserialize_model_config_from_yaml_str("sed: 3\n").unwrap_err();
        assert!(matches!(error, ModelConfigError::Parse(_)));
    }

    #[test]
    fn load_model_config_from_yaml_file_reads_file() {
        let file = assert_fs::NamedTempFile::new("model.yaml").unwrap();
        file.write_str("seed: 99\n").unwrap();

        let parameters = load_model_config_from_yaml_file(file.path()).unwrap();
        assert_eq!(parameters.seed, 99);
    }

    #[test]
    fn load_model_config_from_yaml_file_reports_missing_file() {
        let error = load_model_config_from_yaml_file("does-not-exist.yaml").unwrap_err();
        assert!(matches!(error, ModelConfigError::Read { .. }));
    }
}
