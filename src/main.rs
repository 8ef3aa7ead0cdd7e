//! Simulation driver: `regime key=value ...`
//!
//! Text mode runs the configured agent once and prints a summary; plot mode
//! runs the whole adaptive roster repeatedly and emits a matplotlib script on
//! stdout. Misconfiguration and contract violations print to stderr and exit
//! non-zero.

use std::env;
use std::error::Error;
use std::io;
use std::process;

use regime::{
    environment_for, policy_for, run_episode, summarize_curves, write_plot_script,
    write_text_summary, AgentCurves, AgentKind, Mode, SimConfig,
};

/// The roster compared in plot mode.
const PLOT_AGENTS: [AgentKind; 7] = [
    AgentKind::Ucb,
    AgentKind::ActivePtw,
    AgentKind::Malg,
    AgentKind::Ts,
    AgentKind::KlUcb,
    AgentKind::SwUcb,
    AgentKind::ParanoidPtw,
];

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let cfg = SimConfig::parse(args)?;
    match cfg.mode {
        Mode::Text => text_mode(&cfg),
        Mode::Plot => plot_mode(&cfg),
    }
}

fn text_mode(cfg: &SimConfig) -> Result<(), Box<dyn Error>> {
    let mut env = environment_for(cfg);
    let mut policy = policy_for(cfg.agent, cfg.agent_seed, cfg);
    run_episode(policy.as_mut(), &mut env, cfg.trials)?;
    write_text_summary(&mut io::stdout().lock(), &env)?;
    Ok(())
}

fn plot_mode(cfg: &SimConfig) -> Result<(), Box<dyn Error>> {
    let mut agents = Vec::with_capacity(PLOT_AGENTS.len());
    let mut changepoints = Vec::new();

    for agent in PLOT_AGENTS {
        let mut curves = Vec::with_capacity(cfg.plot_repeats as usize);
        let mut label = "";
        for repeat in 0..cfg.plot_repeats {
            let mut env = environment_for(cfg);
            let mut policy = policy_for(agent, cfg.agent_seed + repeat, cfg);
            label = policy.name();
            let record = run_episode(policy.as_mut(), &mut env, cfg.trials)?;
            curves.push(record.regret);
            changepoints = record.changepoints;
        }
        agents.push(AgentCurves {
            label,
            summary: summarize_curves(&curves),
        });
    }

    write_plot_script(&mut io::stdout().lock(), cfg, &agents, &changepoints)?;
    Ok(())
}
