//! rlbandits: multi-armed bandit simulation in Rust.
//!
//! This library models k-armed reward processes (stationary and drifting),
//! agents that learn action values from repeated interaction (greedy,
//! epsilon-greedy, UCB and gradient bandits), and an experiment runner that
//! averages many independent runs into per-step performance curves.
//!
//! # Quick Start
//!
//! ```
//! use rlbandits::prelude::*;
//!
//! // Ten-armed testbed with unit reward noise
//! let environment = EnvironmentConfig::stationary(10, 1.0);
//! let agent = EpsilonGreedy::new(10, 0.1, None).unwrap();
//!
//! let config = ExperimentConfig::new(100, 20).with_seed(42);
//! let curves = run_multi_experiment(&environment, &agent, &config).unwrap();
//! assert_eq!(curves.mean_reward_per_step.len(), 100);
//!
//! let summary = summarize(&curves);
//! assert!(summary.final_pct_optimal >= 0.0 && summary.final_pct_optimal <= 1.0);
//! ```

pub mod agents;
pub mod config;
pub mod environment;
mod error;
pub mod estimates;
pub mod experiment;
pub mod report;
pub mod simulation;

// Re-export main types
pub use error::{BanditError, Result};
pub use experiment::{
    AggregatedCurves, run_comparison, run_multi_experiment, run_multi_experiment_with,
};
pub use report::{Summary, summarize};
pub use simulation::{RunResult, run_single};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use rlbandits::prelude::*;
/// ```
pub mod prelude {
    pub use crate::agents::{Agent, AnyAgent, EpsilonGreedy, GradientBandit, Greedy, Ucb};
    pub use crate::config::{AgentConfig, EnvironmentConfig, ExperimentConfig};
    pub use crate::environment::{Environment, NonStationaryBandit, StationaryBandit};
    pub use crate::estimates::StepSize;
    pub use crate::{
        AggregatedCurves, BanditError, Result, RunResult, Summary, run_comparison,
        run_multi_experiment, run_multi_experiment_with, run_single, summarize,
    };
}
