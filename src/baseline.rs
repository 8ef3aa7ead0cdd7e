//! Non-adaptive reference policies.
//!
//! `Constant` and `Uniform` anchor the two ends of the exploration spectrum
//! in experiments: no exploration at all, and nothing but exploration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::policy::BanditPolicy;

/// Always plays the same arm.
#[derive(Debug, Clone)]
pub struct ConstantPolicy {
    action: usize,
}

impl ConstantPolicy {
    pub fn new(action: usize) -> Self {
        Self { action }
    }
}

impl BanditPolicy for ConstantPolicy {
    fn select(&mut self) -> usize {
        self.action
    }

    fn update(&mut self, _arm: usize, _reward: bool) {}

    fn name(&self) -> &'static str {
        "Constant"
    }
}

/// Plays a uniformly random arm each step.
#[derive(Debug, Clone)]
pub struct UniformPolicy {
    rng: StdRng,
    arms: usize,
}

impl UniformPolicy {
    pub fn new(seed: u64, arms: usize) -> Self {
        assert!(arms >= 1, "uniform policy needs at least one arm");
        Self {
            rng: StdRng::seed_from_u64(seed),
            arms,
        }
    }
}

impl BanditPolicy for UniformPolicy {
    fn select(&mut self) -> usize {
        self.rng.random_range(0..self.arms)
    }

    fn update(&mut self, _arm: usize, _reward: bool) {}

    fn name(&self) -> &'static str {
        "Uniform"
    }
}
