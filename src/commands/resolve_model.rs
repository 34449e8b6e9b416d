use thiserror::Error;
use tracing::debug;

use crate::commands::base_commands::ModelArgs;
use crate::domain::datasets::Datasets;
use crate::domain::model_parameters::ModelParameters;
use crate::services::cost_model::{CostModel, CostModelError};
use crate::services::model_config_yaml::{
    ModelConfigError, load_model_config_from_yaml_file, validate_parameters,
};

#[derive(Error, Debug)]
pub enum ResolveModelError {
    #[error(transparent)]
    Config(#[from] ModelConfigError),
    #[error(transparent)]
    Model(#[from] CostModelError),
}

/// Canonical defaults, then the config file, then command line flags.
pub fn resolve_model_parameters(args: &ModelArgs) -> Result<ModelParameters, ModelConfigError> {
    let mut parameters = match args.config.as_deref() {
        Some(path) => {
            debug!(path, "loading model config");
            load_model_config_from_yaml_file(path)?
        }
        None => ModelParameters::default(),
    };

    if let Some(seed) = args.seed {
        parameters.seed = seed;
    }
    if let Some(samples) = args.samples {
        parameters.samples_per_treatment = samples;
    }
    if let Some(start_year) = args.start_year {
        parameters.timeline.start_year = start_year;
    }
    if let Some(years) = args.years {
        parameters.timeline.years = years;
    }
    if let Some(annual_increment) = args.annual_increment {
        parameters.timeline.annual_increment = annual_increment;
    }

    validate_parameters(&parameters)?;
    Ok(parameters)
}

pub fn build_datasets(args: &ModelArgs) -> Result<(ModelParameters, Datasets), ResolveModelError> {
    let parameters = resolve_model_parameters(args)?;
    let model = CostModel::from_parameters(&parameters);
    let datasets = model.datasets(parameters.seed, &parameters.timeline)?;
    debug!(
        seed = parameters.seed,
        samples = datasets.sample_set.len(),
        years = parameters.timeline.years,
        "datasets computed"
    );
    Ok((parameters, datasets))
}
