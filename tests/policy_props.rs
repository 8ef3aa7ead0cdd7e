use proptest::prelude::*;

use regime::{
    bernoulli_kl, log_add, suggested_window_len, ActivePtw, BanditPolicy, FlatThompson, KlUcb,
    KtEstimator, MalgUcb, ParanoidPtwPolicy, SlidingWindowUcb, Ucb1, UniformPolicy,
};

fn drive_policy(policy: &mut dyn BanditPolicy, arms: usize, rewards: &[bool]) {
    for &reward in rewards {
        let arm = policy.select();
        assert!(arm < arms, "{} selected arm {arm}/{arms}", policy.name());
        policy.update(arm, reward);
    }
}

proptest! {
    #[test]
    fn all_policies_select_in_range_on_arbitrary_streams(
        seed in 0u64..1_000,
        arms in 2usize..6,
        rewards in proptest::collection::vec(any::<bool>(), 1..120),
    ) {
        let mut policies: Vec<Box<dyn BanditPolicy>> = vec![
            Box::new(Ucb1::new(seed, arms)),
            Box::new(KlUcb::new(seed, arms)),
            Box::new(SlidingWindowUcb::new(seed, arms, 8)),
            Box::new(FlatThompson::new(seed, arms)),
            Box::new(ParanoidPtwPolicy::new(seed, arms)),
            Box::new(MalgUcb::new(seed, arms, 5)),
            Box::new(UniformPolicy::new(seed, arms)),
        ];
        for policy in policies.iter_mut() {
            drive_policy(policy.as_mut(), arms, &rewards);
        }
    }

    #[test]
    fn confidence_bound_policies_try_every_arm_first(
        seed in 0u64..1_000,
        arms in 2usize..8,
    ) {
        let mut policies: Vec<Box<dyn BanditPolicy>> = vec![
            Box::new(Ucb1::new(seed, arms)),
            Box::new(KlUcb::new(seed, arms)),
            Box::new(SlidingWindowUcb::new(seed, arms, 64)),
        ];
        for policy in policies.iter_mut() {
            let mut seen = vec![false; arms];
            for _ in 0..arms {
                let arm = policy.select();
                prop_assert!(!seen[arm], "{} repeated arm {arm} during the sweep", policy.name());
                seen[arm] = true;
                policy.update(arm, false);
            }
            prop_assert!(seen.iter().all(|s| *s));
        }
    }

    #[test]
    fn kt_log_marginal_is_the_sum_of_predictive_logs(
        bits in proptest::collection::vec(any::<bool>(), 0..64),
    ) {
        let mut kt = KtEstimator::new();
        let mut acc = 0.0f64;
        for &bit in &bits {
            acc += kt.prob(bit).ln();
            kt.update(bit);
        }
        prop_assert!((kt.log_marginal() - acc).abs() < 1e-12);

        let post = kt.posterior();
        let ones = bits.iter().filter(|b| **b).count() as f64;
        let zeros = bits.len() as f64 - ones;
        prop_assert_eq!(post.alpha, 0.5 + ones);
        prop_assert_eq!(post.beta, 0.5 + zeros);
    }

    #[test]
    fn ptw_level_posterior_stays_a_subprobability(
        arms in 2usize..5,
        pulls in proptest::collection::vec((0usize..5, any::<bool>()), 1..64),
    ) {
        let mut model = ActivePtw::new(8, arms);
        for &(arm, reward) in &pulls {
            model.update(reward, arm % arms);
            let post = model.level_posterior();
            let total: f64 = post.iter().sum();
            prop_assert!(post.iter().all(|p| (0.0..=1.0).contains(p)));
            prop_assert!(total <= 1.0 + 1e-9, "total {total}");
            prop_assert!(model.log_marginal() <= 1e-12, "positive log probability");
        }
    }

    #[test]
    fn log_add_never_loses_the_dominant_term(a in -700.0f64..0.0, b in -700.0f64..0.0) {
        let out = log_add(a, b);
        prop_assert!(out >= a.max(b));
        prop_assert!(out <= a.max(b) + std::f64::consts::LN_2 + 1e-12);
    }

    #[test]
    fn bernoulli_kl_is_monotone_above_p(p in 0.05f64..0.95, step in 0.001f64..0.2) {
        // Monotonicity on [p, 1] is what guarantees the KL-UCB bisection
        // terminates at the right root.
        let q1 = (p + step).min(0.999);
        let q2 = (q1 + step).min(0.9995);
        prop_assert!(bernoulli_kl(p, q1) <= bernoulli_kl(p, q2) + 1e-15);
    }

    #[test]
    fn suggested_window_is_monotone_in_stability(rate in 0.0005f64..0.5) {
        let w = suggested_window_len(rate).unwrap();
        let w_slower = suggested_window_len(rate / 2.0).unwrap();
        prop_assert!(w_slower >= w, "rarer changes must not shrink the window");
    }
}
