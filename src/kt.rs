//! Krichevsky–Trofimov estimator for binary memoryless sources.
//!
//! The KT estimator is the Bayesian mixture predictor under a `Beta(½, ½)`
//! prior: after seeing `c0` zeros and `c1` ones it predicts the next one with
//! probability `(c1 + ½) / (c0 + c1 + 1)` and its running log-marginal equals
//! the log probability it assigned to the whole processed sequence. It is the
//! per-arm, per-segment building block of the partition-tree model and of flat
//! Thompson sampling.

const KT_ALPHA: f64 = 0.5;

/// Sufficient statistics of a Beta posterior over a Bernoulli mean.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    /// Posterior mean `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Total pseudo-count `alpha + beta`; grows by one per observation.
    pub fn weight(&self) -> f64 {
        self.alpha + self.beta
    }
}

/// Online KT (Laplace-½) predictor.
#[derive(Debug, Clone, Default)]
pub struct KtEstimator {
    zeros: u64,
    ones: u64,
    log_kt: f64,
}

impl KtEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predictive probability of seeing `bit` next, evaluated *before* the
    /// bit is absorbed.
    pub fn prob(&self, bit: bool) -> f64 {
        let count = if bit { self.ones } else { self.zeros };
        (count as f64 + KT_ALPHA) / ((self.zeros + self.ones) as f64 + 2.0 * KT_ALPHA)
    }

    /// Absorb one bit: accumulate `ln prob(bit)` first, then bump the count.
    pub fn update(&mut self, bit: bool) {
        self.log_kt += self.prob(bit).ln();
        if bit {
            self.ones += 1;
        } else {
            self.zeros += 1;
        }
    }

    /// Log probability of everything absorbed so far.
    pub fn log_marginal(&self) -> f64 {
        self.log_kt
    }

    /// The posterior as Beta sufficient statistics: `Beta(½ + c1, ½ + c0)`.
    pub fn posterior(&self) -> BetaParams {
        BetaParams {
            alpha: KT_ALPHA + self.ones as f64,
            beta: KT_ALPHA + self.zeros as f64,
        }
    }
}
