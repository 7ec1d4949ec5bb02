use rand::Rng;

use super::Agent;
use crate::error::{BanditError, Result};
use crate::estimates::{ActionValues, StepSize};

/// Epsilon-greedy agent - explores with probability epsilon, exploits otherwise
#[derive(Clone, Debug, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
    values: ActionValues,
}

impl EpsilonGreedy {
    /// Creates a new epsilon-greedy agent; `alpha = None` selects sample averaging.
    pub fn new(k: usize, epsilon: f64, alpha: Option<f64>) -> Result<Self> {
        Self::with_step_size(k, epsilon, StepSize::from_alpha(alpha)?)
    }

    pub fn with_step_size(k: usize, epsilon: f64, step_size: StepSize) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(BanditError::configuration(format!(
                "epsilon must be between 0 and 1, got {epsilon}"
            )));
        }
        Ok(Self {
            epsilon,
            values: ActionValues::new(k, step_size)?,
        })
    }

    /// Sets the optimistic initial estimate applied by warm resets.
    pub fn with_warm_start(mut self, value: f64) -> Result<Self> {
        self.values = self.values.with_warm_start(value)?;
        Ok(self)
    }

    /// Gets the epsilon value
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn step_size(&self) -> StepSize {
        self.values.step_size()
    }

    pub fn warm_start_value(&self) -> Option<f64> {
        self.values.warm_start_value()
    }
}

impl Agent for EpsilonGreedy {
    fn k(&self) -> usize {
        self.values.k()
    }

    fn select_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        // Explore with probability epsilon
        let r: f64 = rng.random_range(0.0..1.0);
        if r < self.epsilon {
            Ok(rng.random_range(0..self.k()))
        } else {
            self.values.greedy_action(rng)
        }
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        self.values.update(action, reward)
    }

    fn reset(&mut self) {
        self.values.reset();
    }

    fn reset_warm(&mut self) {
        self.values.reset_warm();
    }

    fn estimates(&self) -> &[f64] {
        self.values.estimates()
    }

    fn counts(&self) -> &[u64] {
        self.values.counts()
    }

    fn total_steps(&self) -> u64 {
        self.values.total_steps()
    }
}
