//! Sliding-window UCB.
//!
//! UCB1 computed over only the last `window` pulls: a bounded FIFO of
//! `(arm, reward)` pairs backs incrementally maintained windowed sums, so
//! evidence older than the window simply stops existing. This is the
//! passive-forgetting counterpart to the restart-based and Bayesian policies
//! in this crate (Garivier & Moulines 2008, arXiv:0805.3415).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::policy::BanditPolicy;

/// Seedable sliding-window UCB. A `window` of `u64::MAX` never evicts and
/// behaves exactly like plain UCB1.
#[derive(Debug, Clone)]
pub struct SlidingWindowUcb {
    rng: StdRng,
    window: u64,
    history: VecDeque<(usize, bool)>,
    arm_reward: Vec<f64>,
    arm_visits: Vec<f64>,
}

impl SlidingWindowUcb {
    pub fn new(seed: u64, arms: usize, window: u64) -> Self {
        assert!(arms >= 1, "sliding-window ucb needs at least one arm");
        assert!(window >= 1, "window must hold at least one pull");
        Self {
            rng: StdRng::seed_from_u64(seed),
            window,
            history: VecDeque::new(),
            arm_reward: vec![0.0; arms],
            arm_visits: vec![0.0; arms],
        }
    }

    /// Windowed visit count of one arm.
    pub fn windowed_visits(&self, arm: usize) -> f64 {
        self.arm_visits[arm]
    }

    /// Windowed reward sum of one arm.
    pub fn windowed_reward(&self, arm: usize) -> f64 {
        self.arm_reward[arm]
    }

    /// Drop all retained pulls.
    pub fn reset(&mut self) {
        self.history.clear();
        self.arm_reward.fill(0.0);
        self.arm_visits.fill(0.0);
    }

    fn unvisited_arms(&self) -> Vec<usize> {
        (0..self.arm_visits.len())
            .filter(|&arm| self.arm_visits[arm] == 0.0)
            .collect()
    }

    fn score(&self, arm: usize) -> f64 {
        let mean = self.arm_reward[arm] / self.arm_visits[arm];
        mean + (2.0 * (self.history.len() as f64).ln() / self.arm_visits[arm]).sqrt()
    }
}

impl BanditPolicy for SlidingWindowUcb {
    fn select(&mut self) -> usize {
        let unvisited = self.unvisited_arms();
        if !unvisited.is_empty() {
            return unvisited[self.rng.random_range(0..unvisited.len())];
        }

        let mut best = f64::NEG_INFINITY;
        let mut best_idx = 0;
        for arm in 0..self.arm_visits.len() {
            let score = self.score(arm);
            if score > best {
                best = score;
                best_idx = arm;
            }
        }
        best_idx
    }

    fn update(&mut self, arm: usize, reward: bool) {
        self.history.push_back((arm, reward));
        if reward {
            self.arm_reward[arm] += 1.0;
        }
        self.arm_visits[arm] += 1.0;

        if self.history.len() as u64 > self.window {
            if let Some((old_arm, old_reward)) = self.history.pop_front() {
                self.arm_visits[old_arm] -= 1.0;
                if old_reward {
                    self.arm_reward[old_arm] -= 1.0;
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "SWUCB"
    }
}
