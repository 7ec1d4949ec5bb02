//! Multi-run experiments and per-step aggregation.
//!
//! Every run gets a fresh environment, a clone of the agent template reset to
//! its cold or warm-start state, and its own random stream. Streams come from
//! one `Xoshiro256PlusPlus` seeded with the experiment seed: run `i` uses the
//! generator advanced by `i` jumps of 2^128 draws, so streams never overlap
//! and a run's randomness does not depend on how runs are scheduled.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::agents::Agent;
use crate::config::{EnvironmentConfig, ExperimentConfig};
use crate::environment::Environment;
use crate::error::{BanditError, Result};
use crate::simulation::{RunResult, run_single};

/// Per-step curves averaged over all runs of an experiment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregatedCurves {
    /// Mean reward at each step.
    pub mean_reward_per_step: Vec<f64>,
    /// Fraction of runs that chose the optimal action at each step, in `[0, 1]`.
    pub pct_optimal_per_step: Vec<f64>,
    /// Standard error of the mean reward at each step; zero for a single run.
    pub reward_std_error_per_step: Vec<f64>,
    /// Mean true value of the best action at each step.
    pub mean_optimal_value_per_step: Vec<f64>,
    /// Number of steps per run.
    pub steps: usize,
    /// Number of runs aggregated.
    pub runs: usize,
}

/// Running per-step statistics over run results.
///
/// Rewards are tracked as a running mean and sum of squared deviations
/// (Welford), so the standard error stays accurate when rewards sit far from
/// zero. The runner always pushes runs in run order so results are
/// reproducible bit for bit.
#[derive(Clone, Debug)]
pub struct CurveAccumulator {
    reward_mean: Vec<f64>,
    reward_m2: Vec<f64>,
    optimal_count: Vec<u64>,
    optimal_value_sum: Vec<f64>,
    runs: usize,
}

impl CurveAccumulator {
    pub fn new(steps: usize) -> Self {
        Self {
            reward_mean: vec![0.0; steps],
            reward_m2: vec![0.0; steps],
            optimal_count: vec![0; steps],
            optimal_value_sum: vec![0.0; steps],
            runs: 0,
        }
    }

    pub fn steps(&self) -> usize {
        self.reward_mean.len()
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Add one run.
    pub fn push(&mut self, run: &RunResult) -> Result<()> {
        if run.steps() != self.steps() {
            return Err(BanditError::InvalidState {
                message: format!(
                    "run has {} steps, accumulator expects {}",
                    run.steps(),
                    self.steps()
                ),
            });
        }

        self.runs += 1;
        let n = self.runs as f64;
        for t in 0..self.steps() {
            let reward = run.rewards[t];
            let delta = reward - self.reward_mean[t];
            self.reward_mean[t] += delta / n;
            self.reward_m2[t] += delta * (reward - self.reward_mean[t]);
            self.optimal_count[t] += u64::from(run.optimal_action_flags[t]);
            self.optimal_value_sum[t] += run.optimal_values[t];
        }
        Ok(())
    }

    /// Fold another accumulator's runs into this one.
    pub fn merge(&mut self, other: &CurveAccumulator) -> Result<()> {
        if other.steps() != self.steps() {
            return Err(BanditError::InvalidState {
                message: format!(
                    "cannot merge accumulators of {} and {} steps",
                    self.steps(),
                    other.steps()
                ),
            });
        }
        if other.runs == 0 {
            return Ok(());
        }

        let n_a = self.runs as f64;
        let n_b = other.runs as f64;
        let n = n_a + n_b;
        for t in 0..self.steps() {
            // Chan et al. pairwise combination
            let delta = other.reward_mean[t] - self.reward_mean[t];
            self.reward_mean[t] += delta * n_b / n;
            self.reward_m2[t] += other.reward_m2[t] + delta * delta * n_a * n_b / n;
            self.optimal_count[t] += other.optimal_count[t];
            self.optimal_value_sum[t] += other.optimal_value_sum[t];
        }
        self.runs += other.runs;
        Ok(())
    }

    /// Turn the running statistics into per-step curves.
    pub fn finish(self) -> AggregatedCurves {
        let steps = self.steps();
        let n = self.runs.max(1) as f64;
        let reward_std_error_per_step = if self.runs < 2 {
            vec![0.0; steps]
        } else {
            self.reward_m2
                .iter()
                .map(|m2| (m2 / (n - 1.0) / n).sqrt())
                .collect()
        };

        AggregatedCurves {
            pct_optimal_per_step: self.optimal_count.iter().map(|&c| c as f64 / n).collect(),
            reward_std_error_per_step,
            mean_optimal_value_per_step: self.optimal_value_sum.iter().map(|s| s / n).collect(),
            mean_reward_per_step: self.reward_mean,
            steps,
            runs: self.runs,
        }
    }
}

/// Independent random streams, one per run.
pub fn run_streams(seed: u64, runs: usize) -> Vec<Xoshiro256PlusPlus> {
    let mut generator = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..runs)
        .map(|_| {
            let stream = generator.clone();
            generator.jump();
            stream
        })
        .collect()
}

/// Run an experiment on environments built from `environment`.
///
/// Configuration errors, including an agent whose `k` does not match the
/// environment's, are reported before any run starts.
pub fn run_multi_experiment<A>(
    environment: &EnvironmentConfig,
    agent: &A,
    config: &ExperimentConfig,
) -> Result<AggregatedCurves>
where
    A: Agent + Clone,
{
    environment.validate()?;
    if environment.k() != agent.k() {
        return Err(BanditError::DimensionMismatch {
            expected: agent.k(),
            got: environment.k(),
        });
    }
    run_multi_experiment_with(|rng| environment.build(rng), agent, config)
}

/// Run an experiment on environments produced by `factory`.
///
/// `factory` is called once per run with that run's random stream. Any error
/// in any run aborts the whole experiment.
pub fn run_multi_experiment_with<F, E, A>(
    factory: F,
    agent: &A,
    config: &ExperimentConfig,
) -> Result<AggregatedCurves>
where
    F: Fn(&mut dyn rand::RngCore) -> Result<E> + Sync,
    E: Environment,
    A: Agent + Clone,
{
    config.validate()?;
    info!(
        steps = config.steps,
        runs = config.runs,
        warm_start = config.warm_start,
        seed = config.seed,
        parallel = config.parallel,
        "starting experiment"
    );

    let run_one = |run: usize, mut rng: Xoshiro256PlusPlus| -> Result<RunResult> {
        let mut environment = factory(&mut rng)?;
        let mut agent = agent.clone();
        if config.warm_start {
            agent.reset_warm();
        } else {
            agent.reset();
        }

        let result = run_single(&mut agent, &mut environment, config.steps, &mut rng)
            .map_err(|err| err.in_run(run));
        match &result {
            Ok(_) => debug!(run, "run finished"),
            Err(err) => warn!(run, error = %err, "run aborted"),
        }
        result
    };

    let streams = run_streams(config.seed, config.runs);
    let results: Vec<RunResult> = if config.parallel {
        streams
            .into_par_iter()
            .enumerate()
            .map(|(run, rng)| run_one(run, rng))
            .collect::<Result<_>>()?
    } else {
        streams
            .into_iter()
            .enumerate()
            .map(|(run, rng)| run_one(run, rng))
            .collect::<Result<_>>()?
    };

    let mut accumulator = CurveAccumulator::new(config.steps);
    for result in &results {
        accumulator.push(result)?;
    }
    let curves = accumulator.finish();

    info!(
        runs = curves.runs,
        final_mean_reward = curves.mean_reward_per_step.last().copied().unwrap_or_default(),
        "experiment finished"
    );
    Ok(curves)
}

/// Run several named agents against the same environment configuration.
///
/// All agents share the experiment seed, so run `i` of every agent sees the
/// same initial environment. Results keep the input order.
pub fn run_comparison<I, S, A>(
    environment: &EnvironmentConfig,
    agents: I,
    config: &ExperimentConfig,
) -> Result<Vec<(String, AggregatedCurves)>>
where
    I: IntoIterator<Item = (S, A)>,
    S: Into<String>,
    A: Agent + Clone,
{
    agents
        .into_iter()
        .map(|(name, agent)| -> Result<(String, AggregatedCurves)> {
            let name = name.into();
            debug!(agent = %name, "running comparison entry");
            let curves = run_multi_experiment(environment, &agent, config)?;
            Ok((name, curves))
        })
        .collect()
}
