//! Learning agents.
//!
//! Every agent keeps one value per action and learns it from the rewards it
//! observes. The value-based agents ([`Greedy`], [`EpsilonGreedy`], [`Ucb`])
//! share the incremental estimator in [`crate::estimates`] and differ only in
//! how they pick an action. [`GradientBandit`] learns action preferences
//! instead and samples from their softmax.

mod any;
mod epsilon_greedy;
mod gradient;
mod greedy;
mod ucb;

pub use any::AnyAgent;
pub use epsilon_greedy::EpsilonGreedy;
pub use gradient::{GradientBandit, softmax};
pub use greedy::Greedy;
pub use ucb::Ucb;

use crate::error::Result;

/// Core trait for bandit learning agents
///
/// Note: randomness is passed in as `dyn rand::RngCore` so that the trait stays
/// object-safe and callers control every random stream.
pub trait Agent: Send + Sync {
    /// Number of actions the agent chooses between.
    fn k(&self) -> usize;

    /// Choose an action in `[0, k)` without changing any state.
    fn select_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize>;

    /// Integrate the reward observed after taking `action`.
    fn update(&mut self, action: usize, reward: f64) -> Result<()>;

    /// Return to the cold initial state: zero estimates and counts.
    fn reset(&mut self);

    /// Return to the configured warm-start state.
    ///
    /// Agents without a warm-start configuration fall back to [`Agent::reset`].
    fn reset_warm(&mut self) {
        self.reset();
    }

    /// Current per-action values (estimates, or preferences for gradient agents).
    fn estimates(&self) -> &[f64];

    /// Number of times each action has been updated since the last reset.
    fn counts(&self) -> &[u64];

    /// Number of updates since the last reset.
    fn total_steps(&self) -> u64;
}
