//! Sampling helpers shared by the stochastic policies.
//!
//! Policies own their RNGs (one `StdRng` per policy, seeded by the caller);
//! these free functions borrow whichever generator the caller hands in so the
//! draw order stays attributable to a single component.

use rand::Rng;
use rand_distr::{Distribution, Gamma};

/// Draw from `Beta(alpha, beta)` via the two-gamma construction: if
/// `X ~ Gamma(a, 1)` and `Y ~ Gamma(b, 1)` then `X / (X + Y) ~ Beta(a, b)`.
///
/// For shapes below one both gamma draws can underflow to zero, making the
/// ratio NaN; those draws are rejected and retried. Invalid shapes fall back
/// to ½ rather than panicking.
pub fn beta_sample<R: Rng + ?Sized>(rng: &mut R, alpha: f64, beta: f64) -> f64 {
    let (Ok(x_dist), Ok(y_dist)) = (Gamma::new(alpha, 1.0), Gamma::new(beta, 1.0)) else {
        return 0.5;
    };

    loop {
        let x: f64 = x_dist.sample(rng);
        let y: f64 = y_dist.sample(rng);
        let z = x / (x + y);
        if !z.is_nan() {
            return z;
        }
    }
}

/// Draw an index with probability proportional to its (non-negative) weight.
///
/// The weights need not be normalized; mass that is non-finite or negative is
/// ignored. Falls back to the last index if the CDF walk falls through (all
/// weights zero, or rounding).
pub fn weighted_index_sample<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    let last = weights.len().saturating_sub(1);
    let total: f64 = weights
        .iter()
        .copied()
        .filter(|w| w.is_finite() && *w > 0.0)
        .sum();
    if total <= 0.0 {
        return last;
    }

    let mut u = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if w.is_finite() && w > 0.0 {
            u -= w;
            if u < 0.0 {
                return i;
            }
        }
    }
    last
}
