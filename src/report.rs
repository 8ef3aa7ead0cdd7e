//! Reporting: text summaries and matplotlib script emission.
//!
//! The library never touches the filesystem; everything is written to a
//! caller-supplied `io::Write`, which the binary points at stdout. The plot
//! output is a self-contained Python script (one line per data point, exactly
//! reproducible) rather than an image, so results can be regenerated and
//! restyled long after the simulation ran.

use std::io::{self, Write};

use crate::config::{ScheduleKind, SimConfig};
use crate::env::BernoulliBandit;
use crate::harness::CurveSummary;

/// Per-agent aggregated regret curves for the plot script.
#[derive(Debug, Clone)]
pub struct AgentCurves {
    pub label: &'static str,
    pub summary: CurveSummary,
}

/// Write the end-of-run summary of a single episode.
pub fn write_text_summary<W: Write>(out: &mut W, env: &BernoulliBandit) -> io::Result<()> {
    let trials = env.trials();
    let regret = env.best_hindsight_expected_return() - env.cumulative_reward();
    writeln!(out, "{trials} trials completed.")?;
    writeln!(out, "Total Reward: {}", env.cumulative_reward())?;
    writeln!(out, "Regret: {regret}")?;
    writeln!(out, "Avg Regret: {}", regret / trials as f64)?;
    Ok(())
}

/// Emit a matplotlib script plotting mean regret ± the 95% band per agent,
/// with vertical dashed lines at the observed changepoints.
pub fn write_plot_script<W: Write>(
    out: &mut W,
    cfg: &SimConfig,
    agents: &[AgentCurves],
    changepoints: &[u64],
) -> io::Result<()> {
    writeln!(out, "import matplotlib.pyplot as plt")?;
    writeln!(out, "import numpy as np")?;
    writeln!(out, "plt.rcParams.update({{'font.size': 50}})")?;
    writeln!(out, "x=np.arange(1,{})", cfg.trials + 1)?;

    for (idx, agent) in agents.iter().enumerate() {
        let mean = &agent.summary.mean;
        let half = &agent.summary.half_width;

        write!(out, "y{idx}=np.asarray([")?;
        for m in mean {
            write!(out, "{m}, ")?;
        }
        writeln!(out, "])")?;

        write!(out, "y{idx}u=np.asarray([")?;
        for (m, h) in mean.iter().zip(half) {
            write!(out, "{}, ", m + h)?;
        }
        writeln!(out, "])")?;

        write!(out, "y{idx}b=np.asarray([")?;
        for (m, h) in mean.iter().zip(half) {
            write!(out, "{}, ", m - h)?;
        }
        writeln!(out, "])")?;
    }

    for (idx, agent) in agents.iter().enumerate() {
        writeln!(out, "plt.plot(x, y{idx}, label='{}')", agent.label)?;
        writeln!(out, "plt.fill_between(x, y{idx}b, y{idx}u, alpha=.15)")?;
    }

    writeln!(out, "plt.plot()")?;
    writeln!(out, "plt.xlabel('Time')")?;
    writeln!(out, "plt.ylabel('Regret')")?;
    match cfg.cpt_schedule {
        ScheduleKind::Nasty => writeln!(
            out,
            "plt.title('Regret vs Time [Actions={}]')",
            cfg.arms
        )?,
        ScheduleKind::Geometric => writeln!(
            out,
            "plt.title('Regret vs Time [Actions={}, CptRate={}]')",
            cfg.arms, cfg.cpt_rate
        )?,
    }
    writeln!(out, "plt.legend()")?;

    for cpt in changepoints {
        writeln!(out, "plt.axvline(x={cpt}, dashes=[0.1,0.5])")?;
    }

    writeln!(out, "plt.show()")?;
    Ok(())
}
