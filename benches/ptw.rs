use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use regime::{ActivePtw, ActivePtwPolicy, BanditPolicy};

fn bench_ptw_update(c: &mut Criterion) {
    c.bench_function("ptw_update_512_steps_depth20_k10", |b| {
        b.iter(|| {
            let mut model = ActivePtw::new(20, 10);
            for t in 0..512u32 {
                model.update(t % 3 != 0, (t % 10) as usize);
            }
            black_box(model.log_marginal())
        })
    });
}

fn bench_level_posterior(c: &mut Criterion) {
    let mut model = ActivePtw::new(20, 10);
    for t in 0..512u32 {
        model.update(t % 3 != 0, (t % 10) as usize);
    }
    c.bench_function("ptw_level_posterior_depth20_k10", |b| {
        b.iter(|| black_box(model.level_posterior()))
    });
}

fn bench_policy_step(c: &mut Criterion) {
    c.bench_function("active_ptw_policy_256_steps_k10", |b| {
        b.iter(|| {
            let mut policy = ActivePtwPolicy::new(1, 10);
            for t in 0..256u32 {
                let arm = policy.select();
                policy.update(arm, t % 2 == 0);
            }
            black_box(policy.level_posterior())
        })
    });
}

criterion_group!(
    benches,
    bench_ptw_update,
    bench_level_posterior,
    bench_policy_step
);
criterion_main!(benches);
