//! Active Partition Tree Weighting over per-arm KT estimators.
//!
//! The model maintains a Bayesian mixture over **every** recursive binary
//! partition of the time axis `[0, 2^depth)`. Each segment of a partition is
//! modeled as stationary: one independent KT estimator per arm, so a segment's
//! probability is the product of the per-arm KT marginals of the rewards that
//! fell inside it. At each internal node the prior places mass `(K-1)/K` on
//! "stop" (treat the node's whole interval as one segment) and `1/K` on
//! "split" (model the two halves independently):
//!
//! ```text
//!   w(node) = (K-1)/K · kt(node) + 1/K · w(left) · w(right)
//! ```
//!
//! With `K` arms a changepoint has `K - 1` ways to matter (some other arm may
//! now be best), which is what the arm-count-dependent prior encodes; the
//! classical PTW prior is the `K = 2` special case ½/½.
//!
//! The trick that makes this online is that after `t` observations only the
//! `depth + 1` nodes on the path from the root to the current time index have
//! partial (right-incomplete) intervals; everything to their left is summed
//! into per-node staging buffers. One step therefore touches one node per
//! level: find the highest level whose dyadic boundary is crossed (`mscb`),
//! bank the child subtree's weighted probability in that node's buffer, reset
//! everything below, and rebuild the weighted values bottom-up.

use crate::kt::{BetaParams, KtEstimator};
use crate::logmath::log_add;

#[derive(Debug, Clone)]
struct Node {
    /// One KT estimator per arm, covering the node's current segment only.
    model: Vec<KtEstimator>,
    /// Log of the node's weighted (stop + split) probability.
    log_weighted: f64,
    /// Banked weighted probability of completed left siblings below.
    log_buf: f64,
}

impl Node {
    fn new(arms: usize) -> Self {
        Self {
            model: vec![KtEstimator::new(); arms],
            log_weighted: 0.0,
            log_buf: 0.0,
        }
    }

    /// Product over arms of each arm's KT marginal, in log space.
    fn log_marginal(&self) -> f64 {
        self.model.iter().map(KtEstimator::log_marginal).sum()
    }

    fn prob(&self, reward: bool, arm: usize) -> f64 {
        self.model[arm].prob(reward)
    }
}

/// Sequential mixture over all dyadic partitions of `[0, 2^depth)`.
#[derive(Debug, Clone)]
pub struct ActivePtw {
    index: u64,
    nodes: Vec<Node>,
    depth: usize,
    arms: usize,
    log_stop: f64,
    log_split: f64,
}

impl ActivePtw {
    /// Create a model for `t ∈ [0, 2^depth)` over `arms ≥ 2` arms.
    pub fn new(depth: usize, arms: usize) -> Self {
        assert!(arms >= 2, "partition tree weighting requires at least 2 arms");
        assert!(
            (1..=62).contains(&depth),
            "depth must be in [1, 62] to index time with u64"
        );
        let stop = (arms as f64 - 1.0) / arms as f64;
        Self {
            index: 0,
            nodes: (0..=depth).map(|_| Node::new(arms)).collect(),
            depth,
            arms,
            log_stop: stop.ln(),
            log_split: (1.0 - stop).ln(),
        }
    }

    /// Tree depth; level `depth` segments are singletons.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of observations absorbed so far.
    pub fn samples(&self) -> u64 {
        self.index
    }

    /// Predictive probability of observing `reward` if `arm` is pulled next,
    /// marginalized over the segmentation-level posterior.
    pub fn prob(&self, reward: bool, arm: usize) -> f64 {
        self.level_posterior()
            .iter()
            .zip(&self.nodes)
            .map(|(post, node)| post * node.prob(reward, arm))
            .sum()
    }

    /// Log probability of all observations processed so far under the
    /// partition mixture.
    pub fn log_marginal(&self) -> f64 {
        self.nodes[0].log_weighted
    }

    /// Absorb one observation: `arm` was pulled and returned `reward`.
    pub fn update(&mut self, reward: bool, arm: usize) {
        debug_assert!(arm < self.arms);
        debug_assert!(self.index < 1u64 << self.depth, "horizon exhausted");

        // mscb wants the 1-based time of the incoming observation.
        let i = self.mscb(self.index + 1);

        // Bank the weighted probability of the subtree that is about to be
        // reset; the split branch at level i still needs the evidence of the
        // completed sibling segment.
        self.nodes[i].log_buf = self.nodes[i + 1].log_weighted;

        let arms = self.arms;
        for node in self.nodes[i + 1..].iter_mut() {
            *node = Node::new(arms);
        }

        // Leaf level: a singleton segment cannot split.
        let deepest = self.depth;
        self.nodes[deepest].model[arm].update(reward);
        self.nodes[deepest].log_weighted = self.nodes[deepest].log_marginal();

        for level in (0..deepest).rev() {
            self.nodes[level].model[arm].update(reward);
            let stop = self.log_stop + self.nodes[level].log_marginal();
            let split =
                self.log_split + self.nodes[level + 1].log_weighted + self.nodes[level].log_buf;
            self.nodes[level].log_weighted = log_add(stop, split);
        }

        self.index += 1;
    }

    /// Posterior over segmentation levels: entry `i` is the probability that
    /// the observation stream is currently inside a stationary segment of
    /// length `2^(depth - i)`.
    ///
    /// Computed top-down by peeling stop posteriors off the remaining mass;
    /// the result is non-negative and sums to at most one (a sliver of mass
    /// sits below the deepest level's stop weight).
    pub fn level_posterior(&self) -> Vec<f64> {
        let mut remaining = 1.0f64;
        let mut out = Vec::with_capacity(self.depth + 1);

        for node in &self.nodes {
            // The stop branch is one term of the weighted sum, so the ratio
            // is at most 1; clamp the ulp overshoot of the log-space round
            // trip before it can leak out.
            let stop_post = (self.log_stop + node.log_marginal() - node.log_weighted)
                .exp()
                .min(1.0);
            out.push(remaining * stop_post);
            debug_assert!((0.0..=1.0).contains(out.last().expect("just pushed")));

            remaining = (remaining * (1.0 - stop_post)).max(0.0);
        }

        out
    }

    /// Beta posterior of `arm` within the current segment at `level`.
    pub fn posterior(&self, level: usize, arm: usize) -> BetaParams {
        self.nodes[level].model[arm].posterior()
    }

    /// Position, counted from the most significant bit of a `depth`-bit time
    /// index, of the highest bit at which `t - 1` and `t - 2` differ. This is
    /// the shallowest level whose dyadic boundary time `t` crosses, i.e. the
    /// level below which segment statistics must be reset.
    fn mscb(&self, t: u64) -> usize {
        if t == 1 {
            return 0;
        }
        // Consecutive indices differ exactly up to the lowest set bit of t-1.
        self.depth - 1 - (t - 1).trailing_zeros() as usize
    }
}
