use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSample {
    pub treatment: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSet {
    pub seed: u64,
    pub samples: Vec<CostSample>,
}

impl SampleSet {
    /// Costs drawn for one treatment label, in draw order.
    pub fn costs_for(&self, treatment: &str) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|sample| sample.treatment == treatment)
            .map(|sample| sample.cost)
            .collect()
    }

    /// Treatment labels in order of first appearance.
    pub fn treatments(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for sample in &self.samples {
            if !labels.contains(&sample.treatment.as_str()) {
                labels.push(&sample.treatment);
            }
        }
        labels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
