//! Reward-generating bandit environments.
//!
//! An environment holds one unobservable true value per action. Pulling an
//! arm returns that value plus Gaussian noise. The non-stationary variant
//! additionally lets every true value drift by an independent Gaussian step
//! after each pull.

use rand_distr::{Distribution, Normal};

use crate::error::{BanditError, Result};
use crate::estimates::argmax_first;

/// A k-armed reward process.
pub trait Environment: Send {
    /// Number of actions.
    fn k(&self) -> usize;

    /// Current true mean reward of every action.
    fn true_values(&self) -> &[f64];

    /// Draw a reward for `action`.
    fn sample(&mut self, action: usize, rng: &mut dyn rand::RngCore) -> Result<f64>;

    /// Reinitialize the true values from the environment's prior.
    fn reset(&mut self, rng: &mut dyn rand::RngCore);

    /// Index of the best action; ties resolve to the lowest index.
    fn optimal_action(&self) -> usize {
        argmax_first(self.true_values())
    }

    /// True value of the best action.
    fn optimal_value(&self) -> f64 {
        self.true_values()[self.optimal_action()]
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn k(&self) -> usize {
        (**self).k()
    }

    fn true_values(&self) -> &[f64] {
        (**self).true_values()
    }

    fn sample(&mut self, action: usize, rng: &mut dyn rand::RngCore) -> Result<f64> {
        (**self).sample(action, rng)
    }

    fn reset(&mut self, rng: &mut dyn rand::RngCore) {
        (**self).reset(rng)
    }

    fn optimal_action(&self) -> usize {
        (**self).optimal_action()
    }

    fn optimal_value(&self) -> f64 {
        (**self).optimal_value()
    }
}

pub(crate) fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(BanditError::configuration("k must be at least 1"));
    }
    Ok(())
}

pub(crate) fn check_std(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BanditError::configuration(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}

fn normal(name: &str, mean: f64, std: f64) -> Result<Normal<f64>> {
    check_std(name, std)?;
    if !mean.is_finite() {
        return Err(BanditError::configuration(format!(
            "{name}: mean must be finite, got {mean}"
        )));
    }
    Normal::new(mean, std)
        .map_err(|err| BanditError::configuration(format!("{name}: {err}")))
}

fn check_action(action: usize, k: usize) -> Result<()> {
    if action >= k {
        return Err(BanditError::InvalidAction { action, k });
    }
    Ok(())
}

/// Bandit whose true values stay fixed for its whole lifetime.
#[derive(Clone, Debug)]
pub struct StationaryBandit {
    true_values: Vec<f64>,
    noise: Normal<f64>,
    prior: Normal<f64>,
}

impl StationaryBandit {
    /// Creates a bandit with true values drawn from a standard normal prior.
    pub fn new(k: usize, reward_std: f64, rng: &mut dyn rand::RngCore) -> Result<Self> {
        Self::with_prior(k, reward_std, 0.0, 1.0, rng)
    }

    /// Creates a bandit with true values drawn from `Normal(prior_mean, prior_std)`.
    pub fn with_prior(
        k: usize,
        reward_std: f64,
        prior_mean: f64,
        prior_std: f64,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Self> {
        check_k(k)?;
        let mut bandit = Self {
            true_values: vec![0.0; k],
            noise: normal("reward_std", 0.0, reward_std)?,
            prior: normal("prior_std", prior_mean, prior_std)?,
        };
        bandit.reset(rng);
        Ok(bandit)
    }

    /// Creates a bandit with explicit true values.
    ///
    /// `reset` still redraws from the standard normal prior.
    pub fn with_true_values(true_values: Vec<f64>, reward_std: f64) -> Result<Self> {
        check_k(true_values.len())?;
        Ok(Self {
            true_values,
            noise: normal("reward_std", 0.0, reward_std)?,
            prior: normal("prior_std", 0.0, 1.0)?,
        })
    }

    pub fn reward_std(&self) -> f64 {
        self.noise.std_dev()
    }
}

impl Environment for StationaryBandit {
    fn k(&self) -> usize {
        self.true_values.len()
    }

    fn true_values(&self) -> &[f64] {
        &self.true_values
    }

    fn sample(&mut self, action: usize, rng: &mut dyn rand::RngCore) -> Result<f64> {
        check_action(action, self.k())?;
        Ok(self.true_values[action] + self.noise.sample(rng))
    }

    fn reset(&mut self, rng: &mut dyn rand::RngCore) {
        for value in &mut self.true_values {
            *value = self.prior.sample(rng);
        }
    }
}

/// Bandit whose true values perform an independent Gaussian random walk.
///
/// Every call to `sample` perturbs all true values once, after the reward has
/// been drawn, so the reward reflects the values before the step.
#[derive(Clone, Debug)]
pub struct NonStationaryBandit {
    true_values: Vec<f64>,
    initial_value: f64,
    noise: Normal<f64>,
    walk: Normal<f64>,
}

impl NonStationaryBandit {
    /// Creates a bandit whose true values all start at zero.
    pub fn new(k: usize, reward_std: f64, walk_std: f64) -> Result<Self> {
        Self::with_initial_value(k, reward_std, walk_std, 0.0)
    }

    /// Creates a bandit whose true values all start at `initial_value`.
    pub fn with_initial_value(
        k: usize,
        reward_std: f64,
        walk_std: f64,
        initial_value: f64,
    ) -> Result<Self> {
        check_k(k)?;
        if !initial_value.is_finite() {
            return Err(BanditError::configuration(format!(
                "initial_value must be finite, got {initial_value}"
            )));
        }
        Ok(Self {
            true_values: vec![initial_value; k],
            initial_value,
            noise: normal("reward_std", 0.0, reward_std)?,
            walk: normal("walk_std", 0.0, walk_std)?,
        })
    }

    /// Creates a bandit starting from explicit true values.
    ///
    /// `reset` returns every action to zero, not to these values.
    pub fn with_true_values(true_values: Vec<f64>, reward_std: f64, walk_std: f64) -> Result<Self> {
        let mut bandit = Self::new(true_values.len(), reward_std, walk_std)?;
        bandit.true_values = true_values;
        Ok(bandit)
    }

    pub fn reward_std(&self) -> f64 {
        self.noise.std_dev()
    }

    pub fn walk_std(&self) -> f64 {
        self.walk.std_dev()
    }
}

impl Environment for NonStationaryBandit {
    fn k(&self) -> usize {
        self.true_values.len()
    }

    fn true_values(&self) -> &[f64] {
        &self.true_values
    }

    fn sample(&mut self, action: usize, rng: &mut dyn rand::RngCore) -> Result<f64> {
        check_action(action, self.k())?;
        let reward = self.true_values[action] + self.noise.sample(rng);
        for value in &mut self.true_values {
            *value += self.walk.sample(rng);
        }
        Ok(reward)
    }

    fn reset(&mut self, _rng: &mut dyn rand::RngCore) {
        self.true_values.fill(self.initial_value);
    }
}
