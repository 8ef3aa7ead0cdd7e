//! UCB1 with lifetime statistics.
//!
//! The classical optimism-in-the-face-of-uncertainty index of Auer, Cesa-
//! Bianchi & Fischer (2002): empirical mean plus `sqrt(2·ln V / v)`. The only
//! randomness is the initial sweep, which visits unvisited arms in a random
//! order rather than index order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::policy::BanditPolicy;

/// Seedable UCB1.
#[derive(Debug, Clone)]
pub struct Ucb1 {
    rng: StdRng,
    arm_reward: Vec<f64>,
    arm_visits: Vec<f64>,
    visits: f64,
}

impl Ucb1 {
    pub fn new(seed: u64, arms: usize) -> Self {
        assert!(arms >= 1, "ucb needs at least one arm");
        Self {
            rng: StdRng::seed_from_u64(seed),
            arm_reward: vec![0.0; arms],
            arm_visits: vec![0.0; arms],
            visits: 0.0,
        }
    }

    /// Zero all statistics, keeping the RNG stream. Used by restart
    /// schedulers that reuse one instance across windows.
    pub fn reset(&mut self) {
        self.visits = 0.0;
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
        mean + (2.0 * self.visits.ln() / self.arm_visits[arm]).sqrt()
    }
}

impl BanditPolicy for Ucb1 {
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
            self.arm_reward[arm] += 1.0;
        }
        self.arm_visits[arm] += 1.0;
        self.visits += 1.0;
    }

    fn name(&self) -> &'static str {
        "UCB"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sweep_visits_every_arm_exactly_once() {
        let mut ucb = Ucb1::new(17, 3);
        let mut pulls = [0u32; 3];
        for _ in 0..3 {
            let arm = ucb.select();
            pulls[arm] += 1;
            ucb.update(arm, false);
        }
        assert_eq!(pulls, [1, 1, 1]);
    }

    #[test]
    fn exploits_the_better_arm_after_burn_in() {
        let mut ucb = Ucb1::new(0, 2);
        for _ in 0..50 {
            ucb.update(0, true);
            ucb.update(1, false);
        }
        assert_eq!(ucb.select(), 0);
    }

    #[test]
    fn reset_restarts_the_initial_sweep() {
        let mut ucb = Ucb1::new(1, 2);
        for t in 0..10u32 {
            let arm = ucb.select();
            ucb.update(arm, t % 2 == 0);
        }
        ucb.reset();
        let mut pulls = [0u32; 2];
        for _ in 0..2 {
            let arm = ucb.select();
            pulls[arm] += 1;
            ucb.update(arm, false);
        }
        assert_eq!(pulls, [1, 1]);
    }

    #[test]
    fn identical_seeds_produce_identical_choices() {
        let mut a = Ucb1::new(33, 5);
        let mut b = Ucb1::new(33, 5);
        for t in 0..100u32 {
            let (x, y) = (a.select(), b.select());
            assert_eq!(x, y);
            a.update(x, t % 3 != 0);
            b.update(y, t % 3 != 0);
        }
    }
}
