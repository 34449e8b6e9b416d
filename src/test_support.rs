use crate::domain::datasets::Datasets;
use crate::domain::model_parameters::TimelineParameters;
use crate::domain::treatment::CostDistribution;
use crate::services::cost_model::CostModel;
use crate::services::normal_sampler::CostSampler;

// A CostSampler that always returns the distribution mean
pub struct MeanSampler;
impl CostSampler for MeanSampler {
    fn sample(&mut self, distribution: &CostDistribution) -> f64 {
        distribution.mean()
    }
}

pub fn on_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn canonical_datasets() -> Datasets {
    CostModel::default()
        .datasets(42, &TimelineParameters::default())
        .unwrap()
}

pub fn output_path(dir: &assert_fs::TempDir, file_name: &str) -> String {
    dir.path().join(file_name).to_str().unwrap().to_string()
}
