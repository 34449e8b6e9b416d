use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSeries {
    pub treatment: String,
    pub chart_label: String,
    pub values: Vec<f64>,
}

/// Cost per category for each treatment. `values[i]` of every series belongs to
/// `categories[i]`; the last category is the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<String>,
    pub series: Vec<BreakdownSeries>,
}

impl CategoryBreakdown {
    pub fn value(&self, treatment: &str, category: &str) -> Option<f64> {
        let index = self.categories.iter().position(|name| name == category)?;
        self.series
            .iter()
            .find(|series| series.treatment == treatment)
            .and_then(|series| series.values.get(index).copied())
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .fold(0.0, f64::max)
    }
}
