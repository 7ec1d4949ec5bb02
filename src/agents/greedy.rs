use super::Agent;
use crate::error::Result;
use crate::estimates::{ActionValues, StepSize};

/// Greedy agent - always exploits the current estimates
///
/// Ties between equally valued actions are broken uniformly at random, so a
/// fresh agent does not keep picking action 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Greedy {
    values: ActionValues,
}

impl Greedy {
    /// Creates a greedy agent; `alpha = None` selects sample averaging.
    pub fn new(k: usize, alpha: Option<f64>) -> Result<Self> {
        Self::with_step_size(k, StepSize::from_alpha(alpha)?)
    }

    pub fn with_step_size(k: usize, step_size: StepSize) -> Result<Self> {
        Ok(Self {
            values: ActionValues::new(k, step_size)?,
        })
    }

    /// Sets the optimistic initial estimate applied by warm resets.
    pub fn with_warm_start(mut self, value: f64) -> Result<Self> {
        self.values = self.values.with_warm_start(value)?;
        Ok(self)
    }

    pub fn step_size(&self) -> StepSize {
        self.values.step_size()
    }

    pub fn warm_start_value(&self) -> Option<f64> {
        self.values.warm_start_value()
    }
}

impl Agent for Greedy {
    fn k(&self) -> usize {
        self.values.k()
    }

    fn select_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        self.values.greedy_action(rng)
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
