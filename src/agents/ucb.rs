use super::Agent;
use crate::error::{BanditError, Result};
use crate::estimates::{ActionValues, StepSize, argmax_random_tie};

/// Upper Confidence Bound agent
///
/// Picks the action maximizing `Q[i] + c * sqrt(ln(t) / N[i])`, where `t` is
/// the number of selections made so far (at least 1). Untried actions score
/// infinity, so every action is tried once before the bound ranks them.
#[derive(Clone, Debug, PartialEq)]
pub struct Ucb {
    /// Confidence parameter, higher values explore more
    c: f64,
    values: ActionValues,
}

impl Ucb {
    /// Creates a UCB agent; `alpha = None` selects sample averaging.
    pub fn new(k: usize, c: f64, alpha: Option<f64>) -> Result<Self> {
        Self::with_step_size(k, c, StepSize::from_alpha(alpha)?)
    }

    pub fn with_step_size(k: usize, c: f64, step_size: StepSize) -> Result<Self> {
        if !(c > 0.0 && c.is_finite()) {
            return Err(BanditError::configuration(format!(
                "c must be positive, got {c}"
            )));
        }
        Ok(Self {
            c,
            values: ActionValues::new(k, step_size)?,
        })
    }

    /// Sets the optimistic initial estimate applied by warm resets.
    pub fn with_warm_start(mut self, value: f64) -> Result<Self> {
        self.values = self.values.with_warm_start(value)?;
        Ok(self)
    }

    /// Gets the confidence parameter
    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn step_size(&self) -> StepSize {
        self.values.step_size()
    }

    pub fn warm_start_value(&self) -> Option<f64> {
        self.values.warm_start_value()
    }

    /// Upper confidence score of every action.
    pub fn scores(&self) -> Vec<f64> {
        let ln_t = (self.values.total_steps().max(1) as f64).ln();
        self.values
            .estimates()
            .iter()
            .zip(self.values.counts())
            .map(|(&estimate, &count)| {
                if count == 0 {
                    f64::INFINITY
                } else {
                    estimate + self.c * (ln_t / count as f64).sqrt()
                }
            })
            .collect()
    }
}

impl Agent for Ucb {
    fn k(&self) -> usize {
        self.values.k()
    }

    fn select_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        argmax_random_tie(&self.scores(), rng)
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
