use std::f64::consts::PI;

/// Silverman's rule-of-thumb bandwidth. Falls back to `1.0` when the spread is
/// zero so that a constant sample still yields a finite density.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 1.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let bandwidth = 1.06 * variance.sqrt() * n.powf(-0.2);
    if bandwidth > 0.0 && bandwidth.is_finite() {
        bandwidth
    } else {
        1.0
    }
}

/// Gaussian kernel density of `values`, evaluated at `steps` evenly spaced
/// points from `min` to `max` (inclusive). Returns `(x, density)` pairs.
pub fn gaussian_kde(values: &[f64], min: f64, max: f64, steps: usize) -> Vec<(f64, f64)> {
    if values.is_empty() || steps == 0 {
        return Vec::new();
    }
    let bandwidth = silverman_bandwidth(values);
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    let step = if steps > 1 {
        (max - min) / (steps - 1) as f64
    } else {
        0.0
    };

    (0..steps)
        .map(|i| {
            let x = min + step * i as f64;
            let density = values
                .iter()
                .map(|v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}
