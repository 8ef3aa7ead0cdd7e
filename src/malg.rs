//! MALG: a randomized restart scheduler over UCB1 instances.
//!
//! MALG runs a bank of UCB1 learners, one per dyadic horizon `2^m` for
//! `m ∈ [0, depth]`. Whenever the step counter τ hits a multiple of `2^m`,
//! the level-`m` learner is (re)started over the window `[τ, τ + 2^m - 1]`
//! with probability
//!
//! ```text
//!   ρ(2^depth) / ρ(2^m),        ρ(t) = sqrt(K/t) + K/t
//! ```
//!
//! so short-horizon learners restart often but only run with small
//! probability, while the full-horizon learner always exists. Each step is
//! served by the *shortest* installed window covering τ. The schedule
//! realizes the MALG non-stationary regret guarantee of Wei & Luo
//! (arXiv:2102.05406) with UCB1 as the base algorithm.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::policy::BanditPolicy;
use crate::ucb::Ucb1;

#[derive(Debug, Clone)]
struct SubInstance {
    alg: Ucb1,
    start: u64,
    end: u64,
}

impl SubInstance {
    fn window_len(&self) -> u64 {
        self.end - self.start + 1
    }

    fn covers(&self, tau: u64) -> bool {
        (self.start..=self.end).contains(&tau)
    }
}

/// The MALG meta-policy over UCB1 sub-instances.
#[derive(Debug, Clone)]
pub struct MalgUcb {
    rng: StdRng,
    seed: u64,
    arms: usize,
    depth: usize,
    tau: u64,
    /// One lazily created slot per level; level `m` windows span `2^m` steps.
    instances: Vec<Option<SubInstance>>,
}

impl MalgUcb {
    pub fn new(seed: u64, arms: usize, depth: usize) -> Self {
        assert!(arms >= 1, "malg needs at least one arm");
        assert!(depth < 63, "depth must fit dyadic windows in u64");
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            arms,
            depth,
            tau: 1,
            instances: (0..=depth).map(|_| None).collect(),
        }
    }

    /// The average-regret proxy that prices horizons against each other.
    fn rho(&self, t: f64) -> f64 {
        let k = self.arms as f64;
        (k / t).sqrt() + k / t
    }

    fn maybe_install(&mut self, level: usize) {
        let threshold =
            self.rho(2f64.powi(self.depth as i32)) / self.rho(2f64.powi(level as i32));
        if self.rng.random::<f64>() >= threshold {
            return;
        }

        let start = self.tau;
        let end = self.tau + (1u64 << level) - 1;
        // Distinct seeds per level keep the sub-streams uncorrelated.
        let seed = self.seed + level as u64;
        let arms = self.arms;
        let slot = &mut self.instances[level];
        match slot {
            Some(instance) => {
                instance.start = start;
                instance.end = end;
                instance.alg.reset();
            }
            None => {
                *slot = Some(SubInstance {
                    alg: Ucb1::new(seed, arms),
                    start,
                    end,
                });
            }
        }
    }

    /// Index of the installed instance with the shortest window covering τ.
    /// The full-horizon level reinstalls with probability one on its own
    /// boundaries, so some instance always covers τ.
    fn active_instance(&self) -> usize {
        let mut best_len = u64::MAX;
        let mut best_idx = None;
        for (idx, slot) in self.instances.iter().enumerate() {
            if let Some(instance) = slot {
                if instance.covers(self.tau) && instance.window_len() < best_len {
                    best_len = instance.window_len();
                    best_idx = Some(idx);
                }
            }
        }
        best_idx.expect("the full-horizon instance covers every step")
    }
}

impl BanditPolicy for MalgUcb {
    fn select(&mut self) -> usize {
        // Run the restart lottery top level first, exactly once per step.
        for off in 0..=self.depth {
            let level = self.depth - off;
            if (self.tau - 1) % (1u64 << level) == 0 {
                self.maybe_install(level);
            }
        }

        let active = self.active_instance();
        self.instances[active]
            .as_mut()
            .expect("active_instance returns installed slots")
            .alg
            .select()
    }

    fn update(&mut self, arm: usize, reward: bool) {
        let active = self.active_instance();
        self.instances[active]
            .as_mut()
            .expect("active_instance returns installed slots")
            .alg
            .update(arm, reward);
        self.tau += 1;
    }

    fn name(&self) -> &'static str {
        "MALG"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_horizon_instance_installs_on_the_first_step() {
        let mut malg = MalgUcb::new(0, 2, 2);
        let arm = malg.select();
        assert!(arm < 2);

        // Threshold ρ(4)/ρ(4) = 1: level 2 installs with certainty over [1, 4].
        let top = malg.instances[2].as_ref().expect("level 2 must install");
        assert_eq!((top.start, top.end), (1, 4));
        assert_eq!(top.window_len(), 4);

        malg.update(arm, true);
        assert_eq!(malg.tau, 2);
    }

    #[test]
    fn active_instance_prefers_the_shortest_covering_window() {
        let mut malg = MalgUcb::new(0, 2, 3);
        malg.select();
        let active = malg.active_instance();
        let active_len = malg.instances[active].as_ref().unwrap().window_len();
        for slot in malg.instances.iter().flatten() {
            if slot.covers(malg.tau) {
                assert!(slot.window_len() >= active_len);
            }
        }
    }

    #[test]
    fn some_instance_covers_every_step() {
        let mut malg = MalgUcb::new(7, 3, 4);
        for t in 0..200u32 {
            let arm = malg.select();
            assert!(arm < 3);
            // active_instance panics if coverage ever lapses.
            malg.update(arm, t % 2 == 0);
        }
    }

    #[test]
    fn restart_lottery_only_fires_on_dyadic_boundaries() {
        let mut malg = MalgUcb::new(5, 2, 3);
        malg.select();
        let top_window = {
            let top = malg.instances[3].as_ref().expect("top level installs");
            (top.start, top.end)
        };
        malg.update(0, false);

        // τ = 2 is not a multiple of 8: the top window must be untouched.
        malg.select();
        let top = malg.instances[3].as_ref().expect("still installed");
        assert_eq!((top.start, top.end), top_window);
    }

    #[test]
    fn identical_seeds_produce_identical_choices() {
        let mut a = MalgUcb::new(13, 4, 5);
        let mut b = MalgUcb::new(13, 4, 5);
        for t in 0..150u32 {
            let (x, y) = (a.select(), b.select());
            assert_eq!(x, y);
            a.update(x, t % 4 == 0);
            b.update(y, t % 4 == 0);
        }
    }
}
