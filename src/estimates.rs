//! Incremental action-value estimation shared by the value-based agents.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};

/// Step-size schedule for incremental value updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSize {
    /// `1 / n` where `n` is the number of times the action was selected.
    #[default]
    SampleAverage,
    /// Fixed step size `alpha` in `(0, 1]`, an exponential recency-weighted average.
    Constant(f64),
}

impl StepSize {
    /// Map the conventional `alpha` argument onto a step-size schedule.
    ///
    /// `None` selects sample averaging, `Some(alpha)` a constant step size which
    /// must lie in `(0, 1]`.
    pub fn from_alpha(alpha: Option<f64>) -> Result<Self> {
        match alpha {
            None => Ok(StepSize::SampleAverage),
            Some(alpha) if alpha > 0.0 && alpha <= 1.0 => Ok(StepSize::Constant(alpha)),
            Some(alpha) => Err(BanditError::configuration(format!(
                "alpha must be in (0, 1], got {alpha}"
            ))),
        }
    }

    /// The step size to apply for the `count`-th observation of an action.
    fn rate(self, count: u64) -> f64 {
        match self {
            StepSize::SampleAverage => 1.0 / count.max(1) as f64,
            StepSize::Constant(alpha) => alpha,
        }
    }
}

/// Per-action value estimates, selection counts and the update rule
/// `Q[a] += step * (reward - Q[a])`.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionValues {
    estimates: Vec<f64>,
    counts: Vec<u64>,
    total_steps: u64,
    step_size: StepSize,
    warm_start_value: Option<f64>,
}

impl ActionValues {
    /// Creates zero-initialized estimates for `k` actions.
    pub fn new(k: usize, step_size: StepSize) -> Result<Self> {
        if k == 0 {
            return Err(BanditError::configuration("k must be at least 1"));
        }
        if let StepSize::Constant(alpha) = step_size {
            StepSize::from_alpha(Some(alpha))?;
        }
        Ok(Self {
            estimates: vec![0.0; k],
            counts: vec![0; k],
            total_steps: 0,
            step_size,
            warm_start_value: None,
        })
    }

    /// Sets the initial estimate used by [`ActionValues::reset_warm`].
    pub fn with_warm_start(mut self, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(BanditError::configuration(format!(
                "warm start value must be finite, got {value}"
            )));
        }
        self.warm_start_value = Some(value);
        Ok(self)
    }

    pub fn k(&self) -> usize {
        self.estimates.len()
    }

    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn step_size(&self) -> StepSize {
        self.step_size
    }

    pub fn warm_start_value(&self) -> Option<f64> {
        self.warm_start_value
    }

    /// Fails with `InvalidAction` unless `action` is in `[0, k)`.
    pub fn check_action(&self, action: usize) -> Result<()> {
        if action < self.k() {
            Ok(())
        } else {
            Err(BanditError::InvalidAction {
                action,
                k: self.k(),
            })
        }
    }

    /// Integrates one observed reward for `action`.
    pub fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        self.check_action(action)?;
        self.counts[action] += 1;
        self.total_steps += 1;

        let step = self.step_size.rate(self.counts[action]);
        let estimate = &mut self.estimates[action];
        *estimate += step * (reward - *estimate);
        Ok(())
    }

    /// Greedy choice over the current estimates, ties broken uniformly at random.
    pub fn greedy_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        argmax_random_tie(&self.estimates, rng)
    }

    /// Zero estimates and counts.
    pub fn reset(&mut self) {
        self.reset_to(0.0);
    }

    /// Reset to the configured warm-start estimate, or zero when none is set.
    pub fn reset_warm(&mut self) {
        self.reset_to(self.warm_start_value.unwrap_or(0.0));
    }

    fn reset_to(&mut self, initial: f64) {
        self.estimates.fill(initial);
        self.counts.fill(0);
        self.total_steps = 0;
    }
}

/// Index of the maximum value; ties are broken uniformly at random.
///
/// The generator is only consumed when more than one index attains the maximum.
pub(crate) fn argmax_random_tie(values: &[f64], rng: &mut dyn rand::RngCore) -> Result<usize> {
    if values.is_empty() {
        return Err(BanditError::InvalidState {
            message: "no actions available".to_string(),
        });
    }

    let mut best = f64::NEG_INFINITY;
    let mut ties = Vec::with_capacity(values.len());
    for (idx, &value) in values.iter().enumerate() {
        if value > best {
            best = value;
            ties.clear();
            ties.push(idx);
        } else if value == best {
            ties.push(idx);
        }
    }

    match ties.len() {
        0 => Err(BanditError::InvalidState {
            message: "no comparable action values".to_string(),
        }),
        1 => Ok(ties[0]),
        n => Ok(ties[rng.random_range(0..n)]),
    }
}

/// Index of the maximum value; ties resolve to the lowest index.
pub(crate) fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_step_size_from_alpha() {
        assert_eq!(StepSize::from_alpha(None).unwrap(), StepSize::SampleAverage);
        assert_eq!(
            StepSize::from_alpha(Some(0.1)).unwrap(),
            StepSize::Constant(0.1)
        );
        assert_eq!(StepSize::from_alpha(Some(1.0)).unwrap(), StepSize::Constant(1.0));
        assert!(StepSize::from_alpha(Some(0.0)).is_err());
        assert!(StepSize::from_alpha(Some(1.5)).is_err());
        assert!(StepSize::from_alpha(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_rejects_zero_actions() {
        assert!(ActionValues::new(0, StepSize::SampleAverage).is_err());
        assert!(ActionValues::new(3, StepSize::Constant(2.0)).is_err());
    }

    #[test]
    fn test_sample_average_update() {
        let mut values = ActionValues::new(3, StepSize::SampleAverage).unwrap();
        for reward in [2.0, 4.0, 9.0] {
            values.update(1, reward).unwrap();
        }

        assert_relative_eq!(values.estimates()[1], 5.0, epsilon = 1e-12);
        assert_eq!(values.counts(), &[0, 3, 0]);
        assert_eq!(values.total_steps(), 3);
    }

    #[test]
    fn test_constant_step_update() {
        let alpha = 0.5;
        let mut values = ActionValues::new(2, StepSize::Constant(alpha)).unwrap();
        values.update(0, 1.0).unwrap();
        values.update(0, 3.0).unwrap();

        // (1 - a)^2 * 0 + a(1 - a) * 1 + a * 3
        assert_relative_eq!(values.estimates()[0], 0.25 + 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_update_rejects_out_of_range_action() {
        let mut values = ActionValues::new(2, StepSize::SampleAverage).unwrap();
        assert_eq!(
            values.update(2, 1.0),
            Err(BanditError::InvalidAction { action: 2, k: 2 })
        );
        assert_eq!(values.counts(), &[0, 0]);
    }

    #[test]
    fn test_reset_and_warm_reset() {
        let mut values = ActionValues::new(2, StepSize::SampleAverage)
            .unwrap()
            .with_warm_start(5.0)
            .unwrap();
        values.update(0, 1.0).unwrap();

        values.reset_warm();
        assert_eq!(values.estimates(), &[5.0, 5.0]);
        assert_eq!(values.counts(), &[0, 0]);
        assert_eq!(values.total_steps(), 0);

        values.reset();
        assert_eq!(values.estimates(), &[0.0, 0.0]);
    }

    #[test]
    fn test_argmax_random_tie_covers_all_maxima() {
        let values = [1.0, 3.0, 3.0, 0.0, 3.0];
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[argmax_random_tie(&values, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [false, true, true, false, true]);
    }

    #[test]
    fn test_argmax_random_tie_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            argmax_random_tie(&[], &mut rng),
            Err(BanditError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_argmax_first_prefers_lowest_index() {
        assert_eq!(argmax_first(&[0.5, 2.0, 2.0]), 1);
        assert_eq!(argmax_first(&[1.0, 1.0, 1.0]), 0);
        assert_eq!(argmax_first(&[-3.0]), 0);
    }
}
