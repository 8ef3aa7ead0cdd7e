//! Thompson sampling over the Active PTW model.
//!
//! Instead of one lifetime posterior per arm, this policy asks the partition
//! tree which temporal resolution currently explains the stream: it samples a
//! segmentation level from the level posterior, then runs posterior-argmax
//! Thompson sampling using each arm's Beta posterior *conditioned on that
//! level's current segment*. After an abrupt change the posterior mass slides
//! to deeper (shorter) segments on its own, so the policy forgets stale
//! evidence without an explicit restart schedule.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::policy::BanditPolicy;
use crate::ptw::ActivePtw;
use crate::sample::{beta_sample, weighted_index_sample};

/// Time horizon exponent for the policy-owned model: supports `2^30` pulls.
const PTW_DEPTH: usize = 30;

/// Thompson sampling driven by the Active PTW segmentation posterior.
#[derive(Debug, Clone)]
pub struct ActivePtwPolicy {
    rng: StdRng,
    model: ActivePtw,
    arms: usize,
}

impl ActivePtwPolicy {
    pub fn new(seed: u64, arms: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            model: ActivePtw::new(PTW_DEPTH, arms),
            arms,
        }
    }

    /// Posterior over segmentation levels of the underlying model.
    pub fn level_posterior(&self) -> Vec<f64> {
        self.model.level_posterior()
    }

    /// Sample a segmentation level according to its posterior weight.
    pub fn sample_level(&mut self) -> usize {
        let posterior = self.model.level_posterior();
        weighted_index_sample(&mut self.rng, &posterior)
    }

    /// The underlying model (read-only; used by wrappers and tests).
    pub fn model(&self) -> &ActivePtw {
        &self.model
    }
}

impl BanditPolicy for ActivePtwPolicy {
    fn select(&mut self) -> usize {
        let level = self.sample_level();

        let mut best = f64::NEG_INFINITY;
        let mut best_idx = 0;
        for arm in 0..self.arms {
            let post = self.model.posterior(level, arm);
            let draw = beta_sample(&mut self.rng, post.alpha, post.beta);
            if draw > best {
                best = draw;
                best_idx = arm;
            }
        }
        best_idx
    }

    fn update(&mut self, arm: usize, reward: bool) {
        self.model.update(reward, arm);
    }

    fn name(&self) -> &'static str {
        "ActivePTW"
    }
}
