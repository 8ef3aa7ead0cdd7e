//! Simulation configuration: defaults, `key=value` parsing, validation.
//!
//! The driver threads a plain [`SimConfig`] value through everything; there
//! is deliberately no global configuration state. Parsing is hand-rolled:
//! the surface is nine keys, and a structured error with a precise message is
//! all the binary needs to print before exiting non-zero.

use std::error::Error;
use std::fmt;

use crate::util::suggested_window_len;

/// A rejected configuration token or value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ConfigError {}

/// Which learner to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    ActivePtw,
    Ucb,
    Ts,
    Malg,
    KlUcb,
    SwUcb,
    ParanoidPtw,
    Constant,
    Uniform,
}

impl AgentKind {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw {
            "ActivePTW" => Ok(Self::ActivePtw),
            "UCB" => Ok(Self::Ucb),
            "TS" => Ok(Self::Ts),
            "MALG" => Ok(Self::Malg),
            "KLUCB" => Ok(Self::KlUcb),
            "SWUCB" => Ok(Self::SwUcb),
            "ParanoidPTW" => Ok(Self::ParanoidPtw),
            "Constant" => Ok(Self::Constant),
            "Uniform" => Ok(Self::Uniform),
            _ => Err(ConfigError::new(format!(
                "invalid Agent '{raw}'; expected one of: ActivePTW, UCB, TS, MALG, KLUCB, SWUCB, ParanoidPTW, Constant, Uniform"
            ))),
        }
    }
}

/// Output mode of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Run one episode and print a summary.
    Text,
    /// Run every adaptive agent repeatedly and emit a plotting script.
    Plot,
}

impl Mode {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw {
            "text" => Ok(Self::Text),
            "plot" => Ok(Self::Plot),
            _ => Err(ConfigError::new(format!(
                "invalid Mode '{raw}'; expected one of: text, plot"
            ))),
        }
    }
}

/// Which changepoint process drives the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleKind {
    /// Geometrically spaced changepoints with uniform redraws.
    Geometric,
    /// The adversarial two-phase construction.
    Nasty,
}

impl ScheduleKind {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw {
            "Geometric" => Ok(Self::Geometric),
            "Nasty" => Ok(Self::Nasty),
            _ => Err(ConfigError::new(format!(
                "invalid CptSchedule '{raw}'; expected one of: Geometric, Nasty"
            ))),
        }
    }
}

/// Everything a simulation run needs, as one plain value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    pub env_seed: u64,
    pub agent_seed: u64,
    pub trials: u64,
    pub arms: usize,
    pub agent: AgentKind,
    pub mode: Mode,
    pub plot_repeats: u64,
    pub cpt_rate: f64,
    pub swucb_window: u64,
    pub cpt_schedule: ScheduleKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        let cpt_rate = 0.002;
        Self {
            env_seed: 666,
            agent_seed: 33,
            trials: 2500,
            arms: 10,
            agent: AgentKind::ActivePtw,
            mode: Mode::Text,
            plot_repeats: 400,
            cpt_rate,
            swucb_window: suggested_window_len(cpt_rate).unwrap_or(u64::MAX),
            cpt_schedule: ScheduleKind::Geometric,
        }
    }
}

impl SimConfig {
    /// Parse `key=value` tokens over the defaults.
    ///
    /// When `SWUCBWindow` is not given explicitly, the sliding window is
    /// derived from the *final* `CptRate` (mean segment length), with
    /// `u64::MAX` (effectively plain UCB1) for a zero rate.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let mut window_given = false;

        for token in args {
            let token = token.as_ref();
            let Some((key, value)) = token.split_once('=') else {
                return Err(ConfigError::new(format!(
                    "malformed argument '{token}'; expected key=value"
                )));
            };

            match key {
                "EnvSeed" => cfg.env_seed = parse_u64(value, key)?,
                "AgentSeed" => cfg.agent_seed = parse_u64(value, key)?,
                "Trials" => {
                    cfg.trials = parse_u64(value, key)?;
                    if cfg.trials < 1 {
                        return Err(ConfigError::new("Trials must be at least 1"));
                    }
                }
                "Arms" => {
                    cfg.arms = parse_u64(value, key)? as usize;
                    if cfg.arms < 2 {
                        return Err(ConfigError::new("Arms must be at least 2"));
                    }
                }
                "Agent" => cfg.agent = AgentKind::parse(value)?,
                "Mode" => cfg.mode = Mode::parse(value)?,
                "PlotRepeats" => {
                    cfg.plot_repeats = parse_u64(value, key)?;
                    if cfg.plot_repeats < 1 {
                        return Err(ConfigError::new("PlotRepeats must be at least 1"));
                    }
                }
                "CptRate" => {
                    cfg.cpt_rate = parse_f64(value, key)?;
                    if !(0.0..1.0).contains(&cfg.cpt_rate) {
                        return Err(ConfigError::new("CptRate must be in [0, 1)"));
                    }
                }
                "SWUCBWindow" => {
                    cfg.swucb_window = parse_u64(value, key)?;
                    if cfg.swucb_window < 1 {
                        return Err(ConfigError::new("SWUCBWindow must be at least 1"));
                    }
                    window_given = true;
                }
                "CptSchedule" => cfg.cpt_schedule = ScheduleKind::parse(value)?,
                _ => {
                    return Err(ConfigError::new(format!("unrecognised argument '{key}'")));
                }
            }
        }

        if !window_given {
            cfg.swucb_window = suggested_window_len(cfg.cpt_rate).unwrap_or(u64::MAX);
        }

        Ok(cfg)
    }
}

fn parse_u64(raw: &str, key: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|_| {
        ConfigError::new(format!("{key} expects a non-negative integer, got '{raw}'"))
    })
}

fn parse_f64(raw: &str, key: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>()
        .map_err(|_| ConfigError::new(format!("{key} expects a number, got '{raw}'")))
}
