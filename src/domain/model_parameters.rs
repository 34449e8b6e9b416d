use crate::domain::treatment::{OneTimeProfile, RecurringProfile};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SAMPLES_PER_TREATMENT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineParameters {
    pub start_year: i32,
    pub years: u32,
    pub annual_increment: f64,
}

impl Default for TimelineParameters {
    fn default() -> Self {
        Self {
            start_year: 2023,
            years: 5,
            annual_increment: 1000.0,
        }
    }
}

/// Text shown around the charts on the dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCopy {
    pub title: String,
    pub heading: String,
    pub introduction: String,
    pub conclusion: String,
    pub credit: Option<String>,
}

impl Default for PageCopy {
    fn default() -> Self {
        Self {
            title: "NEUROWEAVE Cost Comparison".to_string(),
            heading: "NEUROWEAVE vs Traditional Ventriculoperitoneal (VP) Shunt".to_string(),
            introduction: "### Advanced Economic & Clinical Cost Comparison\n\
This dashboard compares **NEUROWEAVE nanobot therapy** vs. the **standard Ventriculoperitoneal Shunt (VP Shunt)** commonly used for hydrocephalus treatment.\n\n\
**VP Shunts** currently dominate global protocols, including **Medtronic Strata II** and **Codman Hakim valves**, with associated high long-term costs due to surgical replacement and complications."
                .to_string(),
            conclusion: "NEUROWEAVE offers a single-intervention, zero-maintenance solution. VP Shunts, while widespread, often require revisions and frequent follow-up surgeries."
                .to_string(),
            credit: None,
        }
    }
}

/// Every tunable input of a run. `Default` yields the canonical comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    pub seed: u64,
    pub samples_per_treatment: usize,
    pub one_time: OneTimeProfile,
    pub recurring: RecurringProfile,
    pub timeline: TimelineParameters,
    pub page: PageCopy,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            samples_per_treatment: DEFAULT_SAMPLES_PER_TREATMENT,
            one_time: OneTimeProfile::default(),
            recurring: RecurringProfile::default(),
            timeline: TimelineParameters::default(),
            page: PageCopy::default(),
        }
    }
}
