//! Common interface for stateful bandit policies.
//!
//! Every learner in this crate is driven through the same three-method
//! contract, which lets harnesses swap policies without code changes and keeps
//! the agent/environment loop generic.

/// A sequential decision policy over `K` arms with binary rewards.
///
/// Policies are stateful and deterministic given their seed and the reward
/// stream they observe.
///
/// # Example
///
/// ```rust
/// use regime::{BanditPolicy, FlatThompson, Ucb1};
///
/// fn step<P: BanditPolicy + ?Sized>(policy: &mut P) {
///     let arm = policy.select();
///     // ... pull the arm, observe a reward ...
///     policy.update(arm, true);
/// }
///
/// step(&mut FlatThompson::new(0, 3));
/// step(&mut Ucb1::new(0, 3));
/// ```
pub trait BanditPolicy {
    /// Choose the next arm to pull; always an index in `[0, arms)`.
    fn select(&mut self) -> usize;

    /// Feed back the binary reward observed after pulling `arm`.
    fn update(&mut self, arm: usize, reward: bool);

    /// Stable display label, e.g. `"UCB"`.
    fn name(&self) -> &'static str;
}
