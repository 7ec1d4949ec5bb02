//! Reproduces the classic ten-armed testbed experiments and prints a summary
//! for each agent.
//!
//! Run with `RUST_LOG=rlbandits=debug` to see per-run progress.

use rlbandits::prelude::*;
use tracing_subscriber::EnvFilter;

fn report(name: &str, curves: &AggregatedCurves) {
    println!("\n{name}");
    println!("{}", "-".repeat(name.len()));
    println!("{}", summarize(curves));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rlbandits=info")),
        )
        .init();

    let stationary = EnvironmentConfig::stationary(10, 1.0);
    let drifting = EnvironmentConfig::non_stationary(10, 1.0, 0.01);
    let warm = ExperimentConfig::new(1000, 200)
        .with_seed(42)
        .with_warm_start(true)
        .with_parallel(true);
    let cold = warm.clone().with_warm_start(false);

    let stationary_agents = vec![
        ("Greedy", AnyAgent::from(Greedy::new(10, None)?)),
        (
            "Optimistic greedy (Q0 = 5, a = 0.1)",
            Greedy::new(10, Some(0.1))?.with_warm_start(5.0)?.into(),
        ),
        ("e-greedy (e = 0.1)", EpsilonGreedy::new(10, 0.1, None)?.into()),
        ("UCB (c = 2)", Ucb::new(10, 2.0, None)?.into()),
    ];
    for (name, curves) in run_comparison(&stationary, stationary_agents, &warm)? {
        report(&format!("{name}, stationary"), &curves);
    }

    let gradient_agents = vec![
        ("Gradient bandit (a = 0.1)", GradientBandit::new(10, 0.1)?),
        (
            "Gradient bandit (a = 0.1, no baseline)",
            GradientBandit::with_baseline(10, 0.1, false)?,
        ),
    ];
    for (name, curves) in run_comparison(&stationary, gradient_agents, &cold)? {
        report(&format!("{name}, stationary"), &curves);
    }

    let drifting_agents = vec![
        ("Greedy (a = 0.1)", AnyAgent::from(Greedy::new(10, Some(0.1))?)),
        (
            "e-greedy (e = 0.1, sample average)",
            EpsilonGreedy::new(10, 0.1, None)?.into(),
        ),
        ("e-greedy (e = 0.1, a = 0.1)", EpsilonGreedy::new(10, 0.1, Some(0.1))?.into()),
    ];
    for (name, curves) in run_comparison(&drifting, drifting_agents, &cold)? {
        report(&format!("{name}, non-stationary"), &curves);
    }

    Ok(())
}
