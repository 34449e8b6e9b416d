//! Percentile helpers for already-sorted slices.
//!
//! - Empty input => `None`.
//! - `percentile <= 0` => first element.
//! - `percentile >= 100` => last element.
//! - Otherwise we compute a position within `[0, len-1]` and round to the
//!   nearest index.

use serde::Serialize;

/// Returns the percentile value from a slice that is already sorted in
/// ascending order.
pub fn value_sorted<T: Copy>(sorted_values: &[T], percentile: f64) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let index = if percentile <= 0.0 {
        0
    } else if percentile >= 100.0 {
        sorted_values.len() - 1
    } else {
        let position = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
        position.round() as usize
    };

    sorted_values.get(index).copied()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub p5: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub p95: f64,
    pub max: f64,
}

/// Summarizes unsorted values. Non-finite values are ignored.
pub fn summarize(values: &[f64]) -> Option<SampleSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    Some(SampleSummary {
        count: sorted.len(),
        mean,
        min: sorted[0],
        p5: value_sorted(&sorted, 5.0)?,
        q1: value_sorted(&sorted, 25.0)?,
        median: value_sorted(&sorted, 50.0)?,
        q3: value_sorted(&sorted, 75.0)?,
        p95: value_sorted(&sorted, 95.0)?,
        max: sorted[sorted.len() - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_sorted_returns_none_for_empty_input() {
        let values: [i32; 0] = [];
        assert_eq!(value_sorted(&values, 50.0), None);
    }

    #[test]
    fn value_sorted_clamps_to_first_and_last() {
        let values = [10, 20, 30];
        assert_eq!(value_sorted(&values, -1.0), Some(10));
        assert_eq!(value_sorted(&values, 0.0), Some(10));
        assert_eq!(value_sorted(&values, 100.0), Some(30));
        assert_eq!(value_sorted(&values, 1000.0), Some(30));
    }

    #[test]
    fn value_sorted_uses_rounded_position() {
        // len=5 => indices 0..=4
        // p25 => position=1.0 => idx=1
        // p50 => position=2.0 => idx=2
        // p75 => position=3.0 => idx=3
        let values = [0, 1, 2, 3, 4];
        assert_eq!(value_sorted(&values, 25.0), Some(1));
        assert_eq!(value_sorted(&values, 50.0), Some(2));
        assert_eq!(value_sorted(&values, 75.0), Some(3));
    }

    #[test]
    fn summarize_sorts_and_skips_non_finite_values() {
        let summary = summarize(&[4.0, f64::NAN, 0.0, 2.0, 1.0, 3.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.q1, 1.0);
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.q3, 3.0);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn summarize_returns_none_without_finite_values() {
        assert_eq!(summarize(&[]), None);
        assert_eq!(summarize(&[f64::INFINITY]), None);
    }
}
