//! Driver glue: building agents and environments from a config, running the
//! agent/environment loop, and aggregating regret curves across repeats.
//!
//! These helpers are intentionally lightweight so external drivers and tests
//! share exact loop semantics (changepoint recording happens *before* the
//! pull; regret is sampled *after* the update) instead of re-implementing the
//! episode loop and drifting apart.

use crate::active::ActivePtwPolicy;
use crate::baseline::{ConstantPolicy, UniformPolicy};
use crate::config::{AgentKind, ScheduleKind, SimConfig};
use crate::env::{ArmOutOfRange, BernoulliBandit, GeometricSchedule, TwoPhaseSchedule};
use crate::klucb::KlUcb;
use crate::malg::MalgUcb;
use crate::paranoid::ParanoidPtwPolicy;
use crate::policy::BanditPolicy;
use crate::sliding::SlidingWindowUcb;
use crate::thompson::FlatThompson;
use crate::ucb::Ucb1;

/// Dyadic horizon exponent handed to MALG by the driver: windows up to 2^20.
pub const MALG_HORIZON_EXP: usize = 20;

/// Seed offset separating the environment stream from its schedule stream.
const SCHEDULE_SEED_OFFSET: u64 = 10_007;

/// Per-episode record: the regret curve and the trials where the latent
/// means changed.
#[derive(Debug, Clone)]
pub struct EpisodeRecord {
    /// `regret[t]` = oracle return minus realized return after trial `t + 1`.
    pub regret: Vec<f64>,
    /// 1-based trials at which a changepoint fired.
    pub changepoints: Vec<u64>,
}

/// Instantiate the configured agent with an explicit seed (plot mode varies
/// the seed per repeat).
pub fn policy_for(agent: AgentKind, seed: u64, cfg: &SimConfig) -> Box<dyn BanditPolicy> {
    match agent {
        AgentKind::Ucb => Box::new(Ucb1::new(seed, cfg.arms)),
        AgentKind::KlUcb => Box::new(KlUcb::new(seed, cfg.arms)),
        AgentKind::SwUcb => Box::new(SlidingWindowUcb::new(seed, cfg.arms, cfg.swucb_window)),
        AgentKind::ActivePtw => Box::new(ActivePtwPolicy::new(seed, cfg.arms)),
        AgentKind::ParanoidPtw => Box::new(ParanoidPtwPolicy::new(seed, cfg.arms)),
        AgentKind::Malg => Box::new(MalgUcb::new(seed, cfg.arms, MALG_HORIZON_EXP)),
        AgentKind::Ts => Box::new(FlatThompson::new(seed, cfg.arms)),
        AgentKind::Constant => Box::new(ConstantPolicy::new(0)),
        AgentKind::Uniform => Box::new(UniformPolicy::new(seed, cfg.arms)),
    }
}

/// Instantiate the configured environment.
pub fn environment_for(cfg: &SimConfig) -> BernoulliBandit {
    match cfg.cpt_schedule {
        ScheduleKind::Geometric => BernoulliBandit::new(
            cfg.arms,
            cfg.env_seed,
            Box::new(GeometricSchedule::new(
                cfg.cpt_rate,
                cfg.trials,
                cfg.env_seed + SCHEDULE_SEED_OFFSET,
            )),
        ),
        ScheduleKind::Nasty => {
            // Phase one: arm 0 narrowly leads. Phase two: arm 0 keeps its
            // value but arm 1 now dominates.
            let mut phase_one = vec![0.1; cfg.arms];
            phase_one[0] = 0.2;
            let mut phase_two = vec![0.2; cfg.arms];
            phase_two[1] = 0.8;
            BernoulliBandit::new(
                cfg.arms,
                cfg.env_seed,
                Box::new(TwoPhaseSchedule::new(cfg.trials, phase_one, phase_two)),
            )
        }
    }
}

/// Run one agent/environment episode for `trials` steps.
pub fn run_episode(
    policy: &mut dyn BanditPolicy,
    env: &mut BernoulliBandit,
    trials: u64,
) -> Result<EpisodeRecord, ArmOutOfRange> {
    let mut regret = Vec::with_capacity(trials as usize);
    let mut changepoints = Vec::new();

    for t in 0..trials {
        if env.changepoint() {
            changepoints.push(t + 1);
        }

        let arm = policy.select();
        let reward = env.pull(arm)?;
        policy.update(arm, reward);

        regret.push(env.best_hindsight_expected_return() - env.cumulative_reward());
    }

    Ok(EpisodeRecord {
        regret,
        changepoints,
    })
}

/// Pointwise mean and 1.96·SE half-widths across repeated curves.
#[derive(Debug, Clone)]
pub struct CurveSummary {
    pub mean: Vec<f64>,
    pub half_width: Vec<f64>,
}

/// Aggregate equal-length curves into a mean and a 95% band. With a single
/// curve the band collapses to zero.
pub fn summarize_curves(curves: &[Vec<f64>]) -> CurveSummary {
    let repeats = curves.len();
    let len = curves.first().map_or(0, Vec::len);
    debug_assert!(curves.iter().all(|c| c.len() == len));

    let mut mean = vec![0.0; len];
    for curve in curves {
        for (m, v) in mean.iter_mut().zip(curve) {
            *m += v;
        }
    }
    for m in &mut mean {
        *m /= repeats as f64;
    }

    let mut half_width = vec![0.0; len];
    if repeats >= 2 {
        for t in 0..len {
            let var = curves
                .iter()
                .map(|c| (c[t] - mean[t]).powi(2))
                .sum::<f64>()
                / (repeats as f64 - 1.0);
            half_width[t] = 1.96 * (var / repeats as f64).sqrt();
        }
    }

    CurveSummary { mean, half_width }
}
