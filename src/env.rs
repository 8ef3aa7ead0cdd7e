//! Bernoulli bandit environments with latent changepoints.
//!
//! The environment owns the true per-arm means θ and a [`ChangeSchedule`]
//! that decides *when* they are replaced (and optionally *with what*). It
//! also keeps the regret bookkeeping: realized cumulative reward and the
//! expected return of an oracle that plays the best current arm every step.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Geometric};

/// When (and to what) the latent arm means change.
pub trait ChangeSchedule {
    /// Does the environment change right after trial `t`?
    fn changepoint(&self, t: u64) -> bool;

    /// Explicit replacement means for the change at trial `t`; `None` means
    /// the environment re-randomizes uniformly.
    fn arm_overrides(&self, _t: u64) -> Option<Vec<f64>> {
        None
    }
}

/// A stationary problem: no changepoints, ever.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChange;

impl ChangeSchedule for NoChange {
    fn changepoint(&self, _t: u64) -> bool {
        false
    }
}

/// Changepoints at pre-sampled, geometrically spaced trials.
#[derive(Debug, Clone)]
pub struct GeometricSchedule {
    points: BTreeSet<u64>,
}

impl GeometricSchedule {
    /// Sum Geometric(`p`) gaps until `max_trials` is passed. A rate outside
    /// `(0, 1)` produces an empty (stationary) schedule.
    pub fn new(p: f64, max_trials: u64, seed: u64) -> Self {
        let mut points = BTreeSet::new();
        if p > 0.0 && p < 1.0 {
            if let Ok(gaps) = Geometric::new(p) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut upto = 0u64;
                loop {
                    upto = upto.saturating_add(gaps.sample(&mut rng));
                    if upto >= max_trials {
                        break;
                    }
                    points.insert(upto);
                }
            }
        }
        Self { points }
    }

    /// Number of distinct changepoints in the schedule.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ChangeSchedule for GeometricSchedule {
    fn changepoint(&self, t: u64) -> bool {
        self.points.contains(&t)
    }
}

/// Changepoints at an explicit set of trials.
#[derive(Debug, Clone)]
pub struct VectorSchedule {
    points: BTreeSet<u64>,
}

impl VectorSchedule {
    pub fn new(times: impl IntoIterator<Item = u64>) -> Self {
        Self {
            points: times.into_iter().collect(),
        }
    }
}

impl ChangeSchedule for VectorSchedule {
    fn changepoint(&self, t: u64) -> bool {
        self.points.contains(&t)
    }
}

/// Two equal phases with fixed means, switching halfway through the run.
///
/// The construction is adversarial toward stationary-optimal algorithms: pick
/// the phases so the first phase's best arm keeps its value in the second
/// phase but stops being optimal (after Theorem 31.2 of Lattimore &
/// Szepesvári, *Bandit Algorithms*).
#[derive(Debug, Clone)]
pub struct TwoPhaseSchedule {
    halfway: u64,
    phase_one: Vec<f64>,
    phase_two: Vec<f64>,
}

impl TwoPhaseSchedule {
    pub fn new(max_trials: u64, phase_one: Vec<f64>, phase_two: Vec<f64>) -> Self {
        assert_eq!(
            phase_one.len(),
            phase_two.len(),
            "both phases must configure the same arms"
        );
        Self {
            halfway: max_trials / 2,
            phase_one,
            phase_two,
        }
    }
}

impl ChangeSchedule for TwoPhaseSchedule {
    fn changepoint(&self, t: u64) -> bool {
        t == 1 || t == self.halfway
    }

    fn arm_overrides(&self, t: u64) -> Option<Vec<f64>> {
        if t < self.halfway {
            Some(self.phase_one.clone())
        } else {
            Some(self.phase_two.clone())
        }
    }
}

/// Arm index handed to [`BernoulliBandit::pull`] was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmOutOfRange {
    pub arm: usize,
    pub arms: usize,
}

impl fmt::Display for ArmOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arm index {} out of range for a {}-armed bandit",
            self.arm, self.arms
        )
    }
}

impl Error for ArmOutOfRange {}

/// A Bernoulli stochastic bandit whose means follow a change schedule.
pub struct BernoulliBandit {
    rng: StdRng,
    schedule: Box<dyn ChangeSchedule>,
    trials: u64,
    cumulative_reward: f64,
    thetas: Vec<f64>,
    best_expected: f64,
}

impl BernoulliBandit {
    pub fn new(arms: usize, seed: u64, schedule: Box<dyn ChangeSchedule>) -> Self {
        assert!(arms >= 1, "a bandit needs at least one arm");
        let mut env = Self {
            rng: StdRng::seed_from_u64(seed),
            schedule,
            trials: 0,
            cumulative_reward: 0.0,
            thetas: vec![0.0; arms],
            best_expected: 0.0,
        };
        env.reset();
        env
    }

    /// A stationary bandit with uniformly drawn means.
    pub fn stationary(arms: usize, seed: u64) -> Self {
        Self::new(arms, seed, Box::new(NoChange))
    }

    /// Pull `arm`: draw a Bernoulli reward, account for it, and apply any
    /// scheduled change of the latent means.
    pub fn pull(&mut self, arm: usize) -> Result<bool, ArmOutOfRange> {
        if arm >= self.thetas.len() {
            return Err(ArmOutOfRange {
                arm,
                arms: self.thetas.len(),
            });
        }

        self.trials += 1;

        let reward = self.rng.random::<f64>() < self.thetas[arm];
        if reward {
            self.cumulative_reward += 1.0;
        }
        self.best_expected += self.thetas[self.best_arm()];

        if self.schedule.changepoint(self.trials) {
            match self.schedule.arm_overrides(self.trials) {
                Some(thetas) => {
                    debug_assert_eq!(thetas.len(), self.thetas.len());
                    self.thetas = thetas;
                }
                None => self.reset(),
            }
        }

        Ok(reward)
    }

    /// Re-randomize the latent means i.i.d. Uniform(0, 1).
    pub fn reset(&mut self) {
        for theta in &mut self.thetas {
            *theta = self.rng.random::<f64>();
        }
    }

    /// Number of pulls so far.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of arms.
    pub fn arms(&self) -> usize {
        self.thetas.len()
    }

    /// Realized cumulative reward.
    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Index of the currently best arm (ties go to the lowest index).
    pub fn best_arm(&self) -> usize {
        let mut best = f64::NEG_INFINITY;
        let mut best_idx = 0;
        for (idx, &theta) in self.thetas.iter().enumerate() {
            if theta > best {
                best = theta;
                best_idx = idx;
            }
        }
        best_idx
    }

    /// Expected return of an oracle playing the best current arm every step.
    pub fn best_hindsight_expected_return(&self) -> f64 {
        self.best_expected
    }

    /// Did a change occur at the current trial?
    pub fn changepoint(&self) -> bool {
        self.schedule.changepoint(self.trials)
    }
}

impl fmt::Debug for BernoulliBandit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BernoulliBandit")
            .field("trials", &self.trials)
            .field("thetas", &self.thetas)
            .field("cumulative_reward", &self.cumulative_reward)
            .finish_non_exhaustive()
    }
}
