//! Property tests for agent update rules and selection invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rlbandits::agents::softmax;
use rlbandits::prelude::*;

fn rewards() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0f64..10.0, 1..30)
}

fn value_agents(k: usize) -> Vec<AnyAgent> {
    vec![
        Greedy::new(k, None).unwrap().into(),
        EpsilonGreedy::new(k, 0.2, Some(0.3)).unwrap().into(),
        Ucb::new(k, 1.5, None).unwrap().into(),
    ]
}

proptest! {
    /// A sample average is the arithmetic mean, whatever the order of rewards.
    #[test]
    fn sample_average_is_order_independent(rewards in rewards()) {
        let mut forward = Greedy::new(2, None).unwrap();
        let mut backward = Greedy::new(2, None).unwrap();
        for &r in &rewards {
            forward.update(1, r).unwrap();
        }
        for &r in rewards.iter().rev() {
            backward.update(1, r).unwrap();
        }

        let mean = rewards.iter().sum::<f64>() / rewards.len() as f64;
        prop_assert!((forward.estimates()[1] - mean).abs() < 1e-9);
        prop_assert!((backward.estimates()[1] - mean).abs() < 1e-9);
        prop_assert_eq!(forward.counts()[1], rewards.len() as u64);
    }

    /// Constant step size gives the exponential recency-weighted average.
    #[test]
    fn constant_step_matches_closed_form(
        rewards in rewards(),
        alpha in 0.01f64..1.0,
        initial in -5.0f64..5.0,
    ) {
        let mut agent = Greedy::new(1, Some(alpha)).unwrap().with_warm_start(initial).unwrap();
        agent.reset_warm();
        for &r in &rewards {
            agent.update(0, r).unwrap();
        }

        let n = rewards.len() as i32;
        let expected = (1.0 - alpha).powi(n) * initial
            + rewards
                .iter()
                .enumerate()
                .map(|(i, r)| alpha * (1.0 - alpha).powi(n - 1 - i as i32) * r)
                .sum::<f64>();
        prop_assert!((agent.estimates()[0] - expected).abs() < 1e-9);
    }

    /// An update bumps exactly one count by one.
    #[test]
    fn update_increments_only_chosen_count(
        k in 1usize..8,
        steps in prop::collection::vec((0usize..8, -3.0f64..3.0), 1..40),
    ) {
        for mut agent in value_agents(k) {
            for &(action, reward) in &steps {
                let action = action % k;
                let before = agent.counts().to_vec();
                agent.update(action, reward).unwrap();
                for (i, (&after, &prior)) in agent.counts().iter().zip(&before).enumerate() {
                    let expected = if i == action { prior + 1 } else { prior };
                    prop_assert_eq!(after, expected);
                }
            }
            prop_assert_eq!(agent.total_steps(), steps.len() as u64);

            agent.reset();
            prop_assert!(agent.counts().iter().all(|&c| c == 0));
            prop_assert_eq!(agent.total_steps(), 0);
        }
    }

    /// UCB tries every action within its first k selections.
    #[test]
    fn ucb_covers_every_action_first(
        k in 1usize..10,
        seed in any::<u64>(),
        rewards in prop::collection::vec(-100.0f64..100.0, 10),
    ) {
        let mut agent = Ucb::new(k, 2.0, None).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut seen = vec![false; k];
        for step in 0..k {
            let action = agent.select_action(&mut rng).unwrap();
            prop_assert!(!seen[action]);
            seen[action] = true;
            agent.update(action, rewards[step]).unwrap();
        }
    }

    /// Softmax probabilities form a distribution for any finite preferences.
    #[test]
    fn softmax_sums_to_one(preferences in prop::collection::vec(-500.0f64..500.0, 1..20)) {
        let probs = softmax(&preferences);
        prop_assert_eq!(probs.len(), preferences.len());
        prop_assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
        prop_assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    /// Gradient selections stay in range and preferences stay finite.
    #[test]
    fn gradient_agent_stays_well_formed(
        k in 1usize..6,
        seed in any::<u64>(),
        rewards in prop::collection::vec(-5.0f64..5.0, 1..50),
    ) {
        let mut agent = GradientBandit::new(k, 0.2).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for &r in &rewards {
            let action = agent.select_action(&mut rng).unwrap();
            prop_assert!(action < k);
            agent.update(action, r).unwrap();
        }
        prop_assert!(agent.estimates().iter().all(|h| h.is_finite()));
        prop_assert!((agent.probabilities().iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}
