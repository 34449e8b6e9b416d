use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub year: i32,
    pub treatment: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    /// Distinct years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|row| row.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Treatment labels in order of first appearance.
    pub fn treatments(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !labels.contains(&row.treatment.as_str()) {
                labels.push(&row.treatment);
            }
        }
        labels
    }

    /// `(year, cost)` points of one treatment, ordered by year.
    pub fn series(&self, treatment: &str) -> Vec<(i32, f64)> {
        let mut points: Vec<(i32, f64)> = self
            .rows
            .iter()
            .filter(|row| row.treatment == treatment)
            .map(|row| (row.year, row.cost))
            .collect();
        points.sort_by_key(|(year, _)| *year);
        points
    }

    pub fn cost(&self, treatment: &str, year: i32) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.treatment == treatment && row.year == year)
            .map(|row| row.cost)
    }

    pub fn max_cost(&self) -> f64 {
        self.rows.iter().map(|row| row.cost).fold(0.0, f64::max)
    }
}
