use regime::{
    environment_for, policy_for, run_episode, AgentKind, BanditPolicy, BernoulliBandit, Mode,
    ScheduleKind, SimConfig, TwoPhaseSchedule, VectorSchedule,
};

fn config(trials: u64, arms: usize) -> SimConfig {
    SimConfig {
        trials,
        arms,
        mode: Mode::Text,
        ..SimConfig::default()
    }
}

const ALL_AGENTS: [AgentKind; 9] = [
    AgentKind::Ucb,
    AgentKind::KlUcb,
    AgentKind::SwUcb,
    AgentKind::ActivePtw,
    AgentKind::ParanoidPtw,
    AgentKind::Malg,
    AgentKind::Ts,
    AgentKind::Constant,
    AgentKind::Uniform,
];

#[test]
fn full_episodes_are_reproducible_under_fixed_seeds() {
    let cfg = config(300, 5);
    for agent in ALL_AGENTS {
        let run = || {
            let mut env = environment_for(&cfg);
            let mut policy = policy_for(agent, cfg.agent_seed, &cfg);
            run_episode(policy.as_mut(), &mut env, cfg.trials).unwrap()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.regret, b.regret, "{agent:?} episode not reproducible");
        assert_eq!(a.changepoints, b.changepoints);
    }
}

#[test]
fn different_agent_seeds_change_stochastic_trajectories() {
    let cfg = config(400, 5);
    let run = |seed: u64| {
        let mut env = environment_for(&cfg);
        let mut policy = policy_for(AgentKind::Ts, seed, &cfg);
        run_episode(policy.as_mut(), &mut env, cfg.trials).unwrap()
    };
    // Not a hard guarantee for any single pair of seeds, but with 400 trials
    // two different Thompson streams coinciding everywhere would mean the
    // seed is being ignored.
    assert_ne!(run(1).regret, run(2).regret);
}

#[test]
fn every_agent_survives_the_nasty_schedule() {
    let cfg = SimConfig {
        cpt_schedule: ScheduleKind::Nasty,
        ..config(200, 4)
    };
    for agent in ALL_AGENTS {
        let mut env = environment_for(&cfg);
        let mut policy = policy_for(agent, 7, &cfg);
        let record = run_episode(policy.as_mut(), &mut env, cfg.trials).unwrap();
        assert_eq!(record.regret.len(), 200);
        assert_eq!(record.changepoints, vec![2, 101], "{agent:?}");
    }
}

#[test]
fn constant_play_of_a_bad_arm_accumulates_large_regret() {
    // Identical phases pin the means for the whole run: arm 1 pays 0.8,
    // the rest pay 0.2. Any policy's realized return is then dominated by
    // the oracle in expectation; with 2000 trials the gap is far beyond
    // noise for the constant-on-arm-0 baseline.
    let schedule = TwoPhaseSchedule::new(2000, vec![0.2, 0.8], vec![0.2, 0.8]);
    let mut env = BernoulliBandit::new(2, 123, Box::new(schedule));
    let cfg = config(2000, 2);
    let mut policy = policy_for(AgentKind::Constant, 0, &cfg);
    let record = run_episode(policy.as_mut(), &mut env, cfg.trials).unwrap();

    let final_regret = *record.regret.last().unwrap();
    assert!(
        final_regret > 500.0,
        "constant play of a 0.2 arm against a 0.8 oracle: regret {final_regret}"
    );
}

#[test]
fn episodes_run_cleanly_across_a_vector_schedule_redraw() {
    let cfg = config(1000, 2);
    let schedule = VectorSchedule::new([500]);
    let mut env = BernoulliBandit::new(2, 5, Box::new(schedule));
    let mut policy = policy_for(AgentKind::SwUcb, 3, &cfg);

    let record = run_episode(policy.as_mut(), &mut env, cfg.trials).unwrap();
    assert_eq!(record.regret.len(), 1000);
    assert_eq!(record.changepoints, vec![501]);
    assert_eq!(env.trials(), 1000);
}

#[test]
fn policy_labels_match_their_cli_names() {
    let cfg = config(1, 2);
    let expected = [
        (AgentKind::Ucb, "UCB"),
        (AgentKind::KlUcb, "KLUCB"),
        (AgentKind::SwUcb, "SWUCB"),
        (AgentKind::ActivePtw, "ActivePTW"),
        (AgentKind::ParanoidPtw, "ParanoidPTW"),
        (AgentKind::Malg, "MALG"),
        (AgentKind::Ts, "TS"),
        (AgentKind::Constant, "Constant"),
        (AgentKind::Uniform, "Uniform"),
    ];
    for (agent, label) in expected {
        assert_eq!(policy_for(agent, 0, &cfg).name(), label);
    }
}

#[test]
fn oracle_return_dominates_realized_return_under_pinned_means() {
    // R* accumulates the best mean; a policy stuck on the worst arm cannot
    // overtake it on any prefix once the gap dwarfs Bernoulli noise.
    let schedule = TwoPhaseSchedule::new(4000, vec![0.05, 0.95], vec![0.05, 0.95]);
    let mut env = BernoulliBandit::new(2, 9, Box::new(schedule));
    let mut policy: Box<dyn BanditPolicy> = policy_for(AgentKind::Constant, 0, &config(4000, 2));
    let record = run_episode(policy.as_mut(), &mut env, 4000).unwrap();
    let violations = record
        .regret
        .iter()
        .skip(50)
        .filter(|r| **r < 0.0)
        .count();
    assert_eq!(violations, 0, "oracle fell behind after the burn-in");
}
