//! Single-run simulation of one agent against one environment.

use serde::Serialize;

use crate::agents::Agent;
use crate::environment::Environment;
use crate::error::{BanditError, Result};

/// Per-step record of one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunResult {
    /// Reward obtained at each step.
    pub rewards: Vec<f64>,
    /// Whether the chosen action was the environment's best action at that step.
    pub optimal_action_flags: Vec<bool>,
    /// Action chosen at each step.
    pub actions: Vec<usize>,
    /// True value of the best action at each step, before that step's drift.
    pub optimal_values: Vec<f64>,
}

impl RunResult {
    fn with_capacity(steps: usize) -> Self {
        Self {
            rewards: Vec::with_capacity(steps),
            optimal_action_flags: Vec::with_capacity(steps),
            actions: Vec::with_capacity(steps),
            optimal_values: Vec::with_capacity(steps),
        }
    }

    pub fn steps(&self) -> usize {
        self.rewards.len()
    }
}

/// Drive `agent` against `environment` for `steps` steps.
///
/// The agent is used as is; callers decide whether it is reset beforehand.
/// Optimality is judged against the best action before the environment
/// drifts on this step. Non-finite agent values abort the run with
/// `NumericalInstability` (run index 0; the experiment runner fills in the
/// actual run).
pub fn run_single<A, E>(
    agent: &mut A,
    environment: &mut E,
    steps: usize,
    rng: &mut dyn rand::RngCore,
) -> Result<RunResult>
where
    A: Agent + ?Sized,
    E: Environment + ?Sized,
{
    if agent.k() != environment.k() {
        return Err(BanditError::DimensionMismatch {
            expected: agent.k(),
            got: environment.k(),
        });
    }

    let mut result = RunResult::with_capacity(steps);
    for step in 0..steps {
        let action = agent.select_action(rng)?;
        let optimal_action = environment.optimal_action();
        let optimal_value = environment.optimal_value();
        let reward = environment.sample(action, rng)?;

        agent.update(action, reward)?;
        if !agent.estimates().iter().all(|v| v.is_finite()) {
            return Err(BanditError::NumericalInstability { run: 0, step });
        }

        result.rewards.push(reward);
        result.optimal_action_flags.push(action == optimal_action);
        result.actions.push(action);
        result.optimal_values.push(optimal_value);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{Greedy, Ucb};
    use crate::environment::{NonStationaryBandit, StationaryBandit};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_run_lengths() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut env = StationaryBandit::new(5, 1.0, &mut rng).unwrap();
        let mut agent = Greedy::new(5, None).unwrap();

        let result = run_single(&mut agent, &mut env, 50, &mut rng).unwrap();
        assert_eq!(result.steps(), 50);
        assert_eq!(result.optimal_action_flags.len(), 50);
        assert_eq!(result.actions.len(), 50);
        assert_eq!(agent.total_steps(), 50);
    }

    #[test]
    fn test_run_rejects_mismatched_k() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut env = StationaryBandit::new(4, 1.0, &mut rng).unwrap();
        let mut agent = Greedy::new(3, None).unwrap();
        assert_eq!(
            run_single(&mut agent, &mut env, 10, &mut rng),
            Err(BanditError::DimensionMismatch {
                expected: 3,
                got: 4
            })
        );
    }

    #[test]
    fn test_greedy_locks_onto_rewarded_action() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut env = StationaryBandit::with_true_values(vec![0.0, 1.0], 0.0).unwrap();
        let mut agent = Greedy::new(2, None).unwrap();

        let result = run_single(&mut agent, &mut env, 3, &mut rng).unwrap();
        if result.actions[0] == 1 {
            assert_eq!(result.rewards, vec![1.0, 1.0, 1.0]);
            assert_eq!(result.optimal_action_flags, vec![true, true, true]);
        } else {
            // A zero reward leaves both estimates tied at zero
            assert_eq!(result.rewards[0], 0.0);
            assert!(!result.optimal_action_flags[0]);
        }
    }

    #[test]
    fn test_ucb_tries_each_action_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut env = StationaryBandit::new(3, 1.0, &mut rng).unwrap();
        let mut agent = Ucb::new(3, 2.0, None).unwrap();

        let result = run_single(&mut agent, &mut env, 3, &mut rng).unwrap();
        let mut actions = result.actions.clone();
        actions.sort_unstable();
        assert_eq!(actions, vec![0, 1, 2]);
    }

    #[test]
    fn test_optimal_flag_uses_values_before_drift() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Every arm starts at zero, so action 0 is optimal until the first walk
            let mut env = NonStationaryBandit::new(3, 0.0, 5.0).unwrap();
            let mut agent = Greedy::new(3, None).unwrap();

            let result = run_single(&mut agent, &mut env, 1, &mut rng).unwrap();
            assert_eq!(result.optimal_action_flags[0], result.actions[0] == 0, "seed {seed}");
            assert_eq!(result.optimal_values[0], 0.0);
            assert_eq!(result.rewards[0], 0.0);
        }
    }

    #[test]
    fn test_non_finite_reward_is_reported() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut env = StationaryBandit::with_true_values(vec![f64::INFINITY], 0.0).unwrap();
        let mut agent = Greedy::new(1, None).unwrap();
        assert_eq!(
            run_single(&mut agent, &mut env, 5, &mut rng),
            Err(BanditError::NumericalInstability { run: 0, step: 0 })
        );
    }
}
