//! Flat Thompson sampling over per-arm KT posteriors.
//!
//! The stationary baseline of the Bayesian family: one KT estimator per arm
//! for the whole run, select by sampling each arm's Beta posterior and playing
//! the argmax. Seedable, so selection is reproducible in tests.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::kt::KtEstimator;
use crate::policy::BanditPolicy;
use crate::sample::beta_sample;

/// Seedable Thompson sampling with lifetime per-arm posteriors.
#[derive(Debug, Clone)]
pub struct FlatThompson {
    rng: StdRng,
    model: Vec<KtEstimator>,
}

impl FlatThompson {
    pub fn new(seed: u64, arms: usize) -> Self {
        assert!(arms >= 1, "thompson sampling needs at least one arm");
        Self {
            rng: StdRng::seed_from_u64(seed),
            model: vec![KtEstimator::new(); arms],
        }
    }

    /// Posterior mean of one arm (useful for inspection and tests).
    pub fn posterior_mean(&self, arm: usize) -> f64 {
        self.model[arm].posterior().mean()
    }
}

impl BanditPolicy for FlatThompson {
    fn select(&mut self) -> usize {
        let mut best = f64::NEG_INFINITY;
        let mut best_idx = 0;
        for arm in 0..self.model.len() {
            let post = self.model[arm].posterior();
            let draw = beta_sample(&mut self.rng, post.alpha, post.beta);
            if draw > best {
                best = draw;
                best_idx = arm;
            }
        }
        best_idx
    }

    fn update(&mut self, arm: usize, reward: bool) {
        self.model[arm].update(reward);
    }

    fn name(&self) -> &'static str {
        "TS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_seeds_produce_identical_choices() {
        let mut a = FlatThompson::new(42, 3);
        let mut b = FlatThompson::new(42, 3);
        for t in 0..60u32 {
            let (x, y) = (a.select(), b.select());
            assert_eq!(x, y);
            a.update(x, t % 2 == 0);
            b.update(y, t % 2 == 0);
        }
    }

    #[test]
    fn rewarded_arm_dominates_selection() {
        let mut ts = FlatThompson::new(7, 2);
        for _ in 0..60 {
            ts.update(0, true);
            ts.update(1, false);
        }
        let picks_of_zero = (0..100).filter(|_| ts.select() == 0).count();
        assert!(picks_of_zero > 90, "arm 0 picked only {picks_of_zero}/100");
    }

    #[test]
    fn update_moves_posterior_mean() {
        let mut ts = FlatThompson::new(0, 2);
        let before = ts.posterior_mean(0);
        for _ in 0..10 {
            ts.update(0, true);
        }
        assert!(ts.posterior_mean(0) > before);
    }
}
