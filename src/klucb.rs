//! KL-UCB for Bernoulli rewards.
//!
//! The index of arm `k` is the largest mean `q ≥ p̂` still statistically
//! compatible with the observations:
//!
//! ```text
//!   score(k) = max { q ∈ [p̂, 1] : KL(p̂, q) ≤ ln f(V + 1) / v_k }
//! ```
//!
//! with `f(x) = 1 + x·(ln x)²`, following the tuned form in Lattimore &
//! Szepesvári's *Bandit Algorithms* (the original KL-UCB of Garivier & Cappé,
//! arXiv:1102.2490, carries an extra free constant). `KL(p̂, ·)` is strictly
//! increasing on `[p̂, 1]`, so the maximizer is found by bisection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::logmath::bernoulli_kl;
use crate::policy::BanditPolicy;

/// Bisection tolerance for the index computation.
const KLUCB_EPS: f64 = 1e-8;

/// Largest `q ∈ [p, 1]` with `KL(p, q) ≤ bound`. The initial bracket is
/// always feasible since `KL(p, p) = 0`.
fn max_compatible_mean(p: f64, bound: f64) -> f64 {
    let mut low = p;
    let mut high = 1.0;
    while high - low > KLUCB_EPS {
        let q = low + (high - low) / 2.0;
        if bernoulli_kl(p, q) > bound {
            high = q;
        } else {
            low = q;
        }
    }
    low
}

/// Seedable KL-UCB.
#[derive(Debug, Clone)]
pub struct KlUcb {
    rng: StdRng,
    arm_successes: Vec<f64>,
    arm_visits: Vec<f64>,
    visits: f64,
}

impl KlUcb {
    pub fn new(seed: u64, arms: usize) -> Self {
        assert!(arms >= 1, "kl-ucb needs at least one arm");
        Self {
            rng: StdRng::seed_from_u64(seed),
            arm_successes: vec![0.0; arms],
            arm_visits: vec![0.0; arms],
            visits: 0.0,
        }
    }

    /// Zero all statistics, keeping the RNG stream.
    pub fn reset(&mut self) {
        self.visits = 0.0;
        self.arm_successes.fill(0.0);
        self.arm_visits.fill(0.0);
    }

    fn unvisited_arms(&self) -> Vec<usize> {
        (0..self.arm_visits.len())
            .filter(|&arm| self.arm_visits[arm] == 0.0)
            .collect()
    }

    fn score(&self, arm: usize) -> f64 {
        debug_assert!(self.arm_visits[arm] >= 1.0);
        let t = self.visits + 1.0;
        let f = 1.0 + t * t.ln() * t.ln();
        let bound = f.ln() / self.arm_visits[arm];
        let p_hat = self.arm_successes[arm] / self.arm_visits[arm];
        max_compatible_mean(p_hat, bound)
    }
}

impl BanditPolicy for KlUcb {
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
        if reward {
            self.arm_successes[arm] += 1.0;
        }
        self.arm_visits[arm] += 1.0;
        self.visits += 1.0;
    }

    fn name(&self) -> &'static str {
        "KLUCB"
    }
}
