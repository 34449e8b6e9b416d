use serde::Serialize;

use crate::domain::datasets::Datasets;
use crate::services::percentiles::{SampleSummary, summarize};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TreatmentSummary {
    pub treatment: String,
    pub samples: SampleSummary,
    /// Accumulated cost in the last timeline year.
    pub final_cost: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostReport {
    pub seed: u64,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub treatments: Vec<TreatmentSummary>,
    pub categories: Vec<String>,
    /// One row per category, one value per entry of `treatments`.
    pub breakdown: Vec<Vec<f64>>,
    pub years: Vec<i32>,
    /// One row per year, one value per entry of `treatments`.
    pub yearly_costs: Vec<Vec<f64>>,
    /// Final cost of the last treatment minus that of the first.
    pub final_difference: f64,
}

pub fn build_cost_report(datasets: &Datasets) -> CostReport {
    let timeline = &datasets.timeline;
    let years = timeline.years();

    let treatments: Vec<TreatmentSummary> = datasets
        .sample_set
        .treatments()
        .into_iter()
        .filter_map(|treatment| {
            let samples = summarize(&datasets.sample_set.costs_for(treatment))?;
            let final_cost = timeline
                .series(treatment)
                .last()
                .map(|(_, cost)| *cost)
                .unwrap_or(0.0);
            Some(TreatmentSummary {
                treatment: treatment.to_string(),
                samples,
                final_cost,
            })
        })
        .collect();

    let breakdown = datasets
        .category_breakdown
        .categories
        .iter()
        .map(|category| {
            treatments
                .iter()
                .map(|summary| {
                    datasets
                        .category_breakdown
                        .value(&summary.treatment, category)
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    let yearly_costs = years
        .iter()
        .map(|year| {
            treatments
                .iter()
                .map(|summary| timeline.cost(&summary.treatment, *year).unwrap_or(0.0))
                .collect()
        })
        .collect();

    let final_difference = match (treatments.first(), treatments.last()) {
        (Some(first), Some(last)) => last.final_cost - first.final_cost,
        _ => 0.0,
    };

    CostReport {
        seed: datasets.sample_set.seed,
        start_year: years.first().copied(),
        end_year: years.last().copied(),
        categories: datasets.category_breakdown.categories.clone(),
        breakdown,
        years,
        yearly_costs,
        final_difference,
        treatments,
    }
}
