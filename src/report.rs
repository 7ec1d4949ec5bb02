//! Scalar summaries of aggregated curves.

use std::fmt;

use serde::Serialize;

use crate::experiment::AggregatedCurves;

/// Headline metrics of one experiment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Mean reward at the last step.
    pub final_mean_reward: f64,
    /// Fraction of runs choosing the optimal action at the last step.
    pub final_pct_optimal: f64,
    /// Sum of the mean reward over all steps.
    pub cumulative_reward: f64,
    /// Mean reward averaged over all steps.
    pub average_reward: f64,
    /// Sum over steps of the mean optimal value minus the mean reward.
    pub cumulative_regret: f64,
    pub steps: usize,
    pub runs: usize,
}

/// Summarize `curves`. Empty curves summarize to zeros.
pub fn summarize(curves: &AggregatedCurves) -> Summary {
    let steps = curves.steps;
    let cumulative_reward: f64 = curves.mean_reward_per_step.iter().sum();
    let cumulative_regret = curves
        .mean_optimal_value_per_step
        .iter()
        .zip(&curves.mean_reward_per_step)
        .map(|(best, reward)| best - reward)
        .sum();

    Summary {
        final_mean_reward: curves.mean_reward_per_step.last().copied().unwrap_or(0.0),
        final_pct_optimal: curves.pct_optimal_per_step.last().copied().unwrap_or(0.0),
        cumulative_reward,
        average_reward: if steps == 0 {
            0.0
        } else {
            cumulative_reward / steps as f64
        },
        cumulative_regret,
        steps,
        runs: curves.runs,
    }
}

/// Summarize every entry of a comparison, keeping names and order.
pub fn summarize_comparison(results: &[(String, AggregatedCurves)]) -> Vec<(String, Summary)> {
    results
        .iter()
        .map(|(name, curves)| (name.clone(), summarize(curves)))
        .collect()
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "final mean reward:  {:.3}", self.final_mean_reward)?;
        writeln!(f, "final % optimal:    {:.1}%", self.final_pct_optimal * 100.0)?;
        writeln!(f, "average reward:     {:.3}", self.average_reward)?;
        writeln!(f, "cumulative reward:  {:.2}", self.cumulative_reward)?;
        write!(
            f,
            "cumulative regret:  {:.2} ({} steps x {} runs)",
            self.cumulative_regret, self.steps, self.runs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curves() -> AggregatedCurves {
        AggregatedCurves {
            mean_reward_per_step: vec![0.5, 1.0, 1.5],
            pct_optimal_per_step: vec![0.2, 0.6, 0.9],
            reward_std_error_per_step: vec![0.0; 3],
            mean_optimal_value_per_step: vec![2.0, 2.0, 2.0],
            steps: 3,
            runs: 10,
        }
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&curves());
        assert_eq!(summary.final_mean_reward, 1.5);
        assert_eq!(summary.final_pct_optimal, 0.9);
        assert_relative_eq!(summary.cumulative_reward, 3.0);
        assert_relative_eq!(summary.average_reward, 1.0);
        assert_relative_eq!(summary.cumulative_regret, 3.0);
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.runs, 10);
    }

    #[test]
    fn test_summarize_empty() {
        let empty = AggregatedCurves {
            mean_reward_per_step: vec![],
            pct_optimal_per_step: vec![],
            reward_std_error_per_step: vec![],
            mean_optimal_value_per_step: vec![],
            steps: 0,
            runs: 0,
        };
        let summary = summarize(&empty);
        assert_eq!(summary.cumulative_reward, 0.0);
        assert_eq!(summary.average_reward, 0.0);
    }

    #[test]
    fn test_summary_display() {
        let text = summarize(&curves()).to_string();
        assert!(text.contains("final mean reward:  1.500"));
        assert!(text.contains("final % optimal:    90.0%"));
        assert!(text.contains("(3 steps x 10 runs)"));
    }

    #[test]
    fn test_summarize_comparison_keeps_order() {
        let results = vec![("b".to_string(), curves()), ("a".to_string(), curves())];
        let summaries = summarize_comparison(&results);
        assert_eq!(summaries[0].0, "b");
        assert_eq!(summaries[1].0, "a");
    }
}
