//! Active PTW Thompson sampling with forced exploration.
//!
//! Posterior sampling can starve an arm whose payoff silently improved: once
//! an arm looks bad at every plausible segmentation, nothing pulls it again.
//! This wrapper hedges against that by occasionally forcing an exploratory
//! pull, at a rate tied to the segment size the model currently believes in:
//!
//! ```text
//!   explore(k) = min(1, 2^(-k) · (2^(k/2) - k·ln 2))      segment size 2^k
//! ```
//!
//! Long believed-stationary segments get vanishingly little forced
//! exploration (the posterior is trusted); short segments right after a
//! suspected change get a lot. Early in a run the sampled segment size is
//! capped at `ln(τ+1) + 1` so the schedule cannot act as if it had already
//! observed a horizon it has not.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::active::ActivePtwPolicy;
use crate::policy::BanditPolicy;
use crate::sample::beta_sample;

/// How a forced exploration step picks its arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplorationMode {
    /// Uniformly random arm.
    #[default]
    Uniform,
    /// The arm with the lightest posterior (smallest `α + β`) at the sampled
    /// segmentation level.
    LeastExplored,
}

/// Forced exploration rate for a segment of size `2^k`, clamped into `[0, 1]`.
fn explore_prob(log2_segment_size: usize) -> f64 {
    let k = log2_segment_size as f64;
    let prob = 2f64.powf(-k) * (2f64.powf(k / 2.0) - k * std::f64::consts::LN_2);
    prob.clamp(0.0, 1.0)
}

/// Active PTW Thompson sampling hardened with forced exploration.
#[derive(Debug, Clone)]
pub struct ParanoidPtwPolicy {
    rng: StdRng,
    arms: usize,
    inner: ActivePtwPolicy,
    trials: u64,
    mode: ExplorationMode,
}

impl ParanoidPtwPolicy {
    pub fn new(seed: u64, arms: usize) -> Self {
        Self::with_mode(seed, arms, ExplorationMode::default())
    }

    pub fn with_mode(seed: u64, arms: usize, mode: ExplorationMode) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            arms,
            inner: ActivePtwPolicy::new(seed, arms),
            trials: 0,
            mode,
        }
    }

    fn least_explored_arm(&self, level: usize) -> usize {
        let mut best_weight = f64::INFINITY;
        let mut best_idx = 0;
        for arm in 0..self.arms {
            let weight = self.inner.model().posterior(level, arm).weight();
            if weight < best_weight {
                best_weight = weight;
                best_idx = arm;
            }
        }
        best_idx
    }
}

impl BanditPolicy for ParanoidPtwPolicy {
    fn select(&mut self) -> usize {
        let level = self.inner.sample_level();

        // log2 of the sampled segment size, capped so early rounds cannot
        // behave as if a long horizon had already been observed.
        let mut k = self.inner.model().depth() - level;
        let cap = ((self.trials + 1) as f64).ln() + 1.0;
        while k as f64 > cap {
            k -= 1;
        }

        if self.rng.random::<f64>() < explore_prob(k) {
            return match self.mode {
                ExplorationMode::Uniform => self.rng.random_range(0..self.arms),
                ExplorationMode::LeastExplored => self.least_explored_arm(level),
            };
        }

        let mut best = f64::NEG_INFINITY;
        let mut best_idx = 0;
        for arm in 0..self.arms {
            let post = self.inner.model().posterior(level, arm);
            let draw = beta_sample(&mut self.rng, post.alpha, post.beta);
            if draw > best {
                best = draw;
                best_idx = arm;
            }
        }
        best_idx
    }

    fn update(&mut self, arm: usize, reward: bool) {
        self.inner.update(arm, reward);
        self.trials += 1;
    }

    fn name(&self) -> &'static str {
        "ParanoidPTW"
    }
}
