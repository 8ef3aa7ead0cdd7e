//! Log-domain arithmetic and the Bernoulli relative entropy.
//!
//! Everything downstream that mixes probabilities (the partition-tree model,
//! the KL-UCB index) works in log space; these two functions are the entire
//! numeric substrate and their edge-case behavior is load-bearing, so it is
//! pinned down here and in the tests rather than delegated.

/// Given `log(x)` and `log(y)`, compute `log(x + y)`.
///
/// Uses the identity `log(x + y) = log(x) + log1p(exp(log(y) - log(x)))` with
/// the smaller argument anchored. When the arguments are more than 100 nats
/// apart the correction term is below representable precision and the larger
/// argument is returned as-is.
pub fn log_add(log_x: f64, log_y: f64) -> f64 {
    let (lo, hi) = if log_x <= log_y {
        (log_x, log_y)
    } else {
        (log_y, log_x)
    };
    let diff = hi - lo;
    if diff >= 100.0 {
        return hi;
    }
    lo + diff.exp().ln_1p()
}

/// Relative entropy (KL divergence) between `Bernoulli(p)` and `Bernoulli(q)`.
///
/// The singular cases are handled explicitly; the KL-UCB bisection relies on
/// each of them:
///
/// - any input outside `[0, 1]` → NaN
/// - `(0, 0)` and `(1, 1)` → `0`
/// - `p = 0`, `q ∈ (0, 1)` → `-ln(1 - q)`
/// - `p = 1`, `q ∈ (0, 1)` → `-ln(q)`
/// - `q ∈ {0, 1}` with `p` strictly interior → `+∞`
pub fn bernoulli_kl(p: f64, q: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }

    if (p == 0.0 && q == 0.0) || (p == 1.0 && q == 1.0) {
        return 0.0;
    }

    if p == 0.0 {
        return -(1.0 - q).ln();
    }
    if p == 1.0 {
        return -q.ln();
    }

    if q == 0.0 || q == 1.0 {
        return f64::INFINITY;
    }

    p * (p / q).ln() + (1.0 - p) * ((1.0 - p) / (1.0 - q)).ln()
}
