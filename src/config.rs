//! Typed experiment configuration.
//!
//! These types are the data-driven surface of the crate: an external loader
//! deserializes them (from YAML, JSON or anything serde supports) and hands
//! them to the experiment runner. Validation happens here, before any
//! simulation starts.

use serde::{Deserialize, Serialize};

use crate::agents::{AnyAgent, EpsilonGreedy, GradientBandit, Greedy, Ucb};
use crate::environment::{
    Environment, NonStationaryBandit, StationaryBandit, check_k, check_std,
};
use crate::error::{BanditError, Result};

fn default_prior_std() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Which environment to construct for every run, and with what parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnvironmentConfig {
    /// Fixed true values drawn from `Normal(prior_mean, prior_std)` per run.
    Stationary {
        k: usize,
        reward_std: f64,
        #[serde(default)]
        prior_mean: f64,
        #[serde(default = "default_prior_std")]
        prior_std: f64,
    },
    /// True values starting at `initial_value` and drifting by `Normal(0, walk_std)` per step.
    NonStationary {
        k: usize,
        reward_std: f64,
        walk_std: f64,
        #[serde(default)]
        initial_value: f64,
    },
}

impl EnvironmentConfig {
    /// Stationary environment with a standard normal prior.
    pub fn stationary(k: usize, reward_std: f64) -> Self {
        EnvironmentConfig::Stationary {
            k,
            reward_std,
            prior_mean: 0.0,
            prior_std: default_prior_std(),
        }
    }

    /// Non-stationary environment starting with all true values at zero.
    pub fn non_stationary(k: usize, reward_std: f64, walk_std: f64) -> Self {
        EnvironmentConfig::NonStationary {
            k,
            reward_std,
            walk_std,
            initial_value: 0.0,
        }
    }

    pub fn k(&self) -> usize {
        match self {
            EnvironmentConfig::Stationary { k, .. }
            | EnvironmentConfig::NonStationary { k, .. } => *k,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            EnvironmentConfig::Stationary {
                k,
                reward_std,
                prior_mean,
                prior_std,
            } => {
                check_k(k)?;
                check_std("reward_std", reward_std)?;
                check_std("prior_std", prior_std)?;
                if !prior_mean.is_finite() {
                    return Err(BanditError::configuration("prior_mean must be finite"));
                }
            }
            EnvironmentConfig::NonStationary {
                k,
                reward_std,
                walk_std,
                initial_value,
            } => {
                check_k(k)?;
                check_std("reward_std", reward_std)?;
                check_std("walk_std", walk_std)?;
                if !initial_value.is_finite() {
                    return Err(BanditError::configuration("initial_value must be finite"));
                }
            }
        }
        Ok(())
    }

    /// Construct a fresh environment instance.
    pub fn build(&self, rng: &mut dyn rand::RngCore) -> Result<Box<dyn Environment>> {
        let environment: Box<dyn Environment> = match *self {
            EnvironmentConfig::Stationary {
                k,
                reward_std,
                prior_mean,
                prior_std,
            } => Box::new(StationaryBandit::with_prior(
                k, reward_std, prior_mean, prior_std, rng,
            )?),
            EnvironmentConfig::NonStationary {
                k,
                reward_std,
                walk_std,
                initial_value,
            } => Box::new(NonStationaryBandit::with_initial_value(
                k,
                reward_std,
                walk_std,
                initial_value,
            )?),
        };
        Ok(environment)
    }
}

/// Which agent to build, and with what parameters.
///
/// `alpha = None` means sample-average step sizes for the value-based agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentConfig {
    Greedy {
        k: usize,
        #[serde(default)]
        alpha: Option<f64>,
        #[serde(default)]
        warm_start_value: Option<f64>,
    },
    EpsilonGreedy {
        k: usize,
        epsilon: f64,
        #[serde(default)]
        alpha: Option<f64>,
        #[serde(default)]
        warm_start_value: Option<f64>,
    },
    Ucb {
        k: usize,
        c: f64,
        #[serde(default)]
        alpha: Option<f64>,
        #[serde(default)]
        warm_start_value: Option<f64>,
    },
    GradientBandit {
        k: usize,
        alpha: f64,
        #[serde(default = "default_true")]
        baseline: bool,
    },
}

impl AgentConfig {
    pub fn k(&self) -> usize {
        match self {
            AgentConfig::Greedy { k, .. }
            | AgentConfig::EpsilonGreedy { k, .. }
            | AgentConfig::Ucb { k, .. }
            | AgentConfig::GradientBandit { k, .. } => *k,
        }
    }

    /// Build the agent, validating every parameter.
    pub fn build(&self) -> Result<AnyAgent> {
        Ok(match *self {
            AgentConfig::Greedy {
                k,
                alpha,
                warm_start_value,
            } => {
                let agent = Greedy::new(k, alpha)?;
                let agent = match warm_start_value {
                    Some(value) => agent.with_warm_start(value)?,
                    None => agent,
                };
                agent.into()
            }
            AgentConfig::EpsilonGreedy {
                k,
                epsilon,
                alpha,
                warm_start_value,
            } => {
                let agent = EpsilonGreedy::new(k, epsilon, alpha)?;
                let agent = match warm_start_value {
                    Some(value) => agent.with_warm_start(value)?,
                    None => agent,
                };
                agent.into()
            }
            AgentConfig::Ucb {
                k,
                c,
                alpha,
                warm_start_value,
            } => {
                let agent = Ucb::new(k, c, alpha)?;
                let agent = match warm_start_value {
                    Some(value) => agent.with_warm_start(value)?,
                    None => agent,
                };
                agent.into()
            }
            AgentConfig::GradientBandit { k, alpha, baseline } => {
                GradientBandit::with_baseline(k, alpha, baseline)?.into()
            }
        })
    }
}

/// How many runs of how many steps, and how to seed and schedule them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub steps: usize,
    pub runs: usize,
    /// Reset agents to their warm-start estimates instead of zero before each run.
    #[serde(default)]
    pub warm_start: bool,
    /// Top-level seed; every run derives its own stream from it.
    #[serde(default)]
    pub seed: u64,
    /// Execute runs on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            steps: 1000,
            runs: 200,
            warm_start: false,
            seed: 0,
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    pub fn new(steps: usize, runs: usize) -> Self {
        Self {
            steps,
            runs,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(BanditError::configuration("steps must be at least 1"));
        }
        if self.runs == 0 {
            return Err(BanditError::configuration("runs must be at least 1"));
        }
        Ok(())
    }
}
