//! `regime`: seedable bandit policies for piecewise-stationary Bernoulli rewards.
//!
//! This crate targets the non-stationary stochastic multi-armed bandit
//! problem: a learner repeatedly picks one of `K` arms, observes a 0/1
//! reward, and competes against an oracle that always plays the best current
//! arm, while the latent per-arm means are silently replaced at unknown
//! changepoints.
//!
//! Goals:
//! - **Deterministic by construction**: every policy and environment owns one
//!   seeded PRNG; same seeds + same reward stream → same actions.
//! - **Non-stationarity as a first-class concern**: the interesting policies
//!   either *forget* (sliding windows), *restart* (MALG), or *infer the
//!   segmentation* (Active Partition Tree Weighting).
//! - **Harness-friendly**: one small [`BanditPolicy`] trait, an environment
//!   with built-in regret bookkeeping, and driver glue that keeps episode
//!   semantics identical between the CLI, tests, and external callers.
//!
//! Included policies:
//! - [`ActivePtwPolicy`]: Thompson sampling over an Active Partition Tree
//!   Weighting posterior, a Bayesian mixture over all dyadic segmentations
//!   of time, with O(log T) work per step.
//! - [`ParanoidPtwPolicy`]: the same, hardened with forced exploration at a
//!   rate tied to the believed segment length.
//! - [`FlatThompson`]: stationary Thompson sampling over KT posteriors.
//! - [`Ucb1`], [`KlUcb`], [`SlidingWindowUcb`]: the confidence-bound family.
//! - [`MalgUcb`]: the MALG meta-algorithm scheduling restarting UCB1
//!   instances over dyadic windows.
//! - [`ConstantPolicy`], [`UniformPolicy`]: non-adaptive baselines.
//!
//! Non-goals: persistence, concurrent learners, non-binary rewards, and
//! contextual features are all out of scope.

#![forbid(unsafe_code)]

mod logmath;
pub use logmath::*;

mod kt;
pub use kt::*;

mod ptw;
pub use ptw::*;

mod sample;
pub use sample::*;

mod policy;
pub use policy::*;

mod baseline;
pub use baseline::*;

mod thompson;
pub use thompson::*;

mod active;
pub use active::*;

mod paranoid;
pub use paranoid::*;

mod ucb;
pub use ucb::*;

mod klucb;
pub use klucb::*;

mod sliding;
pub use sliding::*;

mod util;
pub use util::*;

mod malg;
pub use malg::*;

mod env;
pub use env::*;

mod config;
pub use config::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

pub const REGIME_VERSION: &str = env!("CARGO_PKG_VERSION");
