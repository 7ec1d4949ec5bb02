use rand::Rng;

use super::Agent;
use crate::error::{BanditError, Result};

/// Softmax of `preferences`, stabilized by subtracting the maximum.
pub fn softmax(preferences: &[f64]) -> Vec<f64> {
    let max = preferences
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let mut probs: Vec<f64> = preferences.iter().map(|&h| (h - max).exp()).collect();
    let total: f64 = probs.iter().sum();
    for p in &mut probs {
        *p /= total;
    }
    probs
}

/// Gradient bandit agent
///
/// Learns unnormalized action preferences `H` by stochastic gradient ascent on
/// expected reward and samples actions from `softmax(H)`. Rewards are compared
/// against a running-average baseline unless baseline tracking is disabled.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientBandit {
    alpha: f64,
    use_baseline: bool,
    preferences: Vec<f64>,
    counts: Vec<u64>,
    total_steps: u64,
    baseline: f64,
}

impl GradientBandit {
    /// Creates a gradient agent with baseline tracking enabled.
    pub fn new(k: usize, alpha: f64) -> Result<Self> {
        Self::with_baseline(k, alpha, true)
    }

    pub fn with_baseline(k: usize, alpha: f64, use_baseline: bool) -> Result<Self> {
        if k == 0 {
            return Err(BanditError::configuration("k must be at least 1"));
        }
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(BanditError::configuration(format!(
                "alpha must be positive, got {alpha}"
            )));
        }
        Ok(Self {
            alpha,
            use_baseline,
            preferences: vec![0.0; k],
            counts: vec![0; k],
            total_steps: 0,
            baseline: 0.0,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn uses_baseline(&self) -> bool {
        self.use_baseline
    }

    /// Current reward baseline; always zero when tracking is disabled.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Action probabilities under the current preferences.
    pub fn probabilities(&self) -> Vec<f64> {
        softmax(&self.preferences)
    }
}

impl Agent for GradientBandit {
    fn k(&self) -> usize {
        self.preferences.len()
    }

    fn select_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        if self.preferences.is_empty() {
            return Err(BanditError::InvalidState {
                message: "no actions available".to_string(),
            });
        }

        let probs = self.probabilities();
        let u: f64 = rng.random_range(0.0..1.0);
        let mut cumulative = 0.0;
        for (action, p) in probs.iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                return Ok(action);
            }
        }
        // Rounding can leave the cumulative sum just below u
        Ok(probs.iter().rposition(|&p| p > 0.0).unwrap_or(probs.len() - 1))
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        if action >= self.k() {
            return Err(BanditError::InvalidAction {
                action,
                k: self.k(),
            });
        }

        // One snapshot of the policy for the whole gradient step
        let probs = self.probabilities();

        self.counts[action] += 1;
        self.total_steps += 1;
        if self.use_baseline {
            self.baseline += (reward - self.baseline) / self.total_steps as f64;
        }

        let advantage = reward - self.baseline;
        for (i, (h, p)) in self.preferences.iter_mut().zip(&probs).enumerate() {
            let indicator = if i == action { 1.0 } else { 0.0 };
            *h += self.alpha * advantage * (indicator - p);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.preferences.fill(0.0);
        self.counts.fill(0);
        self.total_steps = 0;
        self.baseline = 0.0;
    }

    fn estimates(&self) -> &[f64] {
        &self.preferences
    }

    fn counts(&self) -> &[u64] {
        &self.counts
    }

    fn total_steps(&self) -> u64 {
        self.total_steps
    }
}
