use thiserror::Error;

use crate::domain::category_breakdown::{BreakdownSeries, CategoryBreakdown};
use crate::domain::cost_tree::{CostNode, CostTree};
use crate::domain::datasets::Datasets;
use crate::domain::flow_graph::{FlowGraph, FlowLink};
use crate::domain::model_parameters::{
    DEFAULT_SAMPLES_PER_TREATMENT, ModelParameters, TimelineParameters,
};
use crate::domain::sample_set::{CostSample, SampleSet};
use crate::domain::timeline::{Timeline, TimelineRow};
use crate::domain::treatment::{
    CategoryCosts, CostCategory, CostDistribution, OneTimeProfile, RecurringProfile,
    TOTAL_CATEGORY_NAME, Treatment,
};
use crate::services::normal_sampler::{CostSampler, NormalSampler};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostModelError {
    #[error("invalid timeline range: {years} years starting {start_year}")]
    InvalidRange { start_year: i32, years: u32 },
}

/// Produces every dataset of the comparison. Holds only immutable profiles, so
/// each operation is a pure function of its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    one_time: OneTimeProfile,
    recurring: RecurringProfile,
    samples_per_treatment: usize,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(
            OneTimeProfile::default(),
            RecurringProfile::default(),
            DEFAULT_SAMPLES_PER_TREATMENT,
        )
    }
}

impl CostModel {
    pub fn new(
        one_time: OneTimeProfile,
        recurring: RecurringProfile,
        samples_per_treatment: usize,
    ) -> Self {
        Self {
            one_time,
            recurring,
            samples_per_treatment,
        }
    }

    pub fn from_parameters(parameters: &ModelParameters) -> Self {
        Self::new(
            parameters.one_time.clone(),
            parameters.recurring.clone(),
            parameters.samples_per_treatment,
        )
    }

    pub fn treatment_name(&self, treatment: Treatment) -> &str {
        match treatment {
            Treatment::OneTime => &self.one_time.name,
            Treatment::Recurring => &self.recurring.name,
        }
    }

    pub fn distribution(&self, treatment: Treatment) -> &CostDistribution {
        match treatment {
            Treatment::OneTime => &self.one_time.distribution,
            Treatment::Recurring => &self.recurring.distribution,
        }
    }

    pub fn generate_sample_set(&self, seed: u64) -> SampleSet {
        let mut sampler = NormalSampler::seeded(seed);
        self.generate_sample_set_with(&mut sampler, seed)
    }

    /// Draws all one-time samples first, then all recurring samples.
    pub fn generate_sample_set_with<S: CostSampler>(&self, sampler: &mut S, seed: u64) -> SampleSet {
        let mut samples = Vec::with_capacity(self.samples_per_treatment * Treatment::ALL.len());
        for treatment in Treatment::ALL {
            let name = self.treatment_name(treatment);
            let distribution = self.distribution(treatment);
            samples.extend((0..self.samples_per_treatment).map(|_| CostSample {
                treatment: name.to_string(),
                cost: sampler.sample(distribution),
            }));
        }
        SampleSet { seed, samples }
    }

    pub fn category_breakdown(&self) -> CategoryBreakdown {
        let mut categories: Vec<String> = CostCategory::ALL
            .iter()
            .map(|category| category.name().to_string())
            .collect();
        categories.push(TOTAL_CATEGORY_NAME.to_string());

        CategoryBreakdown {
            categories,
            series: vec![
                breakdown_series(
                    &self.one_time.name,
                    &self.one_time.chart_label,
                    &self.one_time.costs(),
                ),
                breakdown_series(
                    &self.recurring.name,
                    &self.recurring.chart_label,
                    &self.recurring.costs,
                ),
            ],
        }
    }

    /// The one-time root stands alone; the recurring root has one child per
    /// cost category.
    pub fn cost_tree(&self) -> CostTree {
        let mut nodes = vec![
            CostNode {
                label: self.one_time.name.clone(),
                parent: String::new(),
                value: self.one_time.initial_cost,
            },
            CostNode {
                label: self.recurring.name.clone(),
                parent: String::new(),
                value: self.recurring.costs.total(),
            },
        ];
        nodes.extend(CostCategory::ALL.iter().map(|category| CostNode {
            label: category.short_label().to_string(),
            parent: self.recurring.name.clone(),
            value: self.recurring.costs.get(*category),
        }));
        CostTree { nodes }
    }

    pub fn timeline(
        &self,
        start_year: i32,
        years: u32,
        annual_increment: f64,
    ) -> Result<Timeline, CostModelError> {
        let invalid = CostModelError::InvalidRange { start_year, years };
        if years < 1 {
            return Err(invalid);
        }
        let last_offset = i32::try_from(years - 1).map_err(|_| invalid.clone())?;
        start_year.checked_add(last_offset).ok_or(invalid)?;

        let one_time_cost = self.one_time.initial_cost;
        let recurring_base = self.recurring.costs.total();

        let mut rows = Vec::with_capacity(years as usize * 2);
        for offset in 0..years as i32 {
            rows.push(TimelineRow {
                year: start_year + offset,
                treatment: self.one_time.name.clone(),
                cost: one_time_cost,
            });
        }
        for offset in 0..years as i32 {
            rows.push(TimelineRow {
                year: start_year + offset,
                treatment: self.recurring.name.clone(),
                cost: recurring_base + annual_increment * offset as f64,
            });
        }
        Ok(Timeline { rows })
    }

    pub fn flow_graph(&self) -> FlowGraph {
        let mut nodes = vec![format!("Total {}", self.recurring.name)];
        nodes.extend(
            CostCategory::ALL
                .iter()
                .map(|category| category.short_label().to_string()),
        );
        let links = CostCategory::ALL
            .iter()
            .enumerate()
            .map(|(index, category)| FlowLink {
                source: 0,
                target: index + 1,
                value: self.recurring.costs.get(*category),
            })
            .collect();
        FlowGraph { nodes, links }
    }

    pub fn datasets(
        &self,
        seed: u64,
        timeline: &TimelineParameters,
    ) -> Result<Datasets, CostModelError> {
        Ok(Datasets {
            sample_set: self.generate_sample_set(seed),
            category_breakdown: self.category_breakdown(),
            cost_tree: self.cost_tree(),
            timeline: self.timeline(
                timeline.start_year,
                timeline.years,
                timeline.annual_increment,
            )?,
            flow_graph: self.flow_graph(),
        })
    }
}

fn breakdown_series(treatment: &str, chart_label: &str, costs: &CategoryCosts) -> BreakdownSeries {
    let mut values: Vec<f64> = CostCategory::ALL
        .iter()
        .map(|category| costs.get(*category))
        .collect();
    values.push(costs.total());
    BreakdownSeries {
        treatment: treatment.to_string(),
        chart_label: chart_label.to_string(),
        values,
    }
}
