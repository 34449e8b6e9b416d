use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::domain::treatment::CostDistribution;

pub trait CostSampler {
    fn sample(&mut self, distribution: &CostDistribution) -> f64;
}

/// Draws `mean + std_dev * z` with `z` from the standard normal distribution,
/// the same transform `rand_distr::Normal` applies. Non-positive draws are
/// redrawn.
pub struct NormalSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> NormalSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl NormalSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CostSampler for NormalSampler<R> {
    fn sample(&mut self, distribution: &CostDistribution) -> f64 {
        loop {
            let z: f64 = self.rng.sample(StandardNormal);
            let cost = distribution.mean() + distribution.std_dev() * z;
            if cost > 0.0 {
                return cost;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn seeded_sampler_matches_rand_distr_normal() {
        let distribution = CostDistribution::new(40000.0, 3000.0).unwrap();
        let normal = Normal::new(40000.0, 3000.0).unwrap();
        let mut sampler = NormalSampler::seeded(7);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            assert_eq!(sampler.sample(&distribution), normal.sample(&mut rng));
        }
    }

    #[test]
    fn zero_std_dev_returns_mean() {
        let distribution = CostDistribution::new(12000.0, 0.0).unwrap();
        let mut sampler = NormalSampler::seeded(1);
        assert_eq!(sampler.sample(&distribution), 12000.0);
    }

    #[test]
    fn non_positive_draws_are_redrawn() {
        let distribution = CostDistribution::from_constants(10.0, 1000.0);
        let mut sampler = NormalSampler::seeded(3);
        let costs: Vec<f64> = (0..100).map(|_| sampler.sample(&distribution)).collect();
        assert!(costs.iter().all(|cost| *cost > 0.0));
    }
}
