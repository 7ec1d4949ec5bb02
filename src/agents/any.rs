use super::{Agent, EpsilonGreedy, GradientBandit, Greedy, Ucb};
use crate::error::Result;

/// Closed set of the built-in agents, dispatched without boxing.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyAgent {
    Greedy(Greedy),
    EpsilonGreedy(EpsilonGreedy),
    Ucb(Ucb),
    GradientBandit(GradientBandit),
}

impl AnyAgent {
    /// Short name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            AnyAgent::Greedy(_) => "greedy",
            AnyAgent::EpsilonGreedy(_) => "epsilon_greedy",
            AnyAgent::Ucb(_) => "ucb",
            AnyAgent::GradientBandit(_) => "gradient_bandit",
        }
    }

    fn inner(&self) -> &dyn Agent {
        match self {
            AnyAgent::Greedy(agent) => agent,
            AnyAgent::EpsilonGreedy(agent) => agent,
            AnyAgent::Ucb(agent) => agent,
            AnyAgent::GradientBandit(agent) => agent,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Agent {
        match self {
            AnyAgent::Greedy(agent) => agent,
            AnyAgent::EpsilonGreedy(agent) => agent,
            AnyAgent::Ucb(agent) => agent,
            AnyAgent::GradientBandit(agent) => agent,
        }
    }
}

impl Agent for AnyAgent {
    fn k(&self) -> usize {
        self.inner().k()
    }

    fn select_action(&self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        self.inner().select_action(rng)
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        self.inner_mut().update(action, reward)
    }

    fn reset(&mut self) {
        self.inner_mut().reset();
    }

    fn reset_warm(&mut self) {
        self.inner_mut().reset_warm();
    }

    fn estimates(&self) -> &[f64] {
        self.inner().estimates()
    }

    fn counts(&self) -> &[u64] {
        self.inner().counts()
    }

    fn total_steps(&self) -> u64 {
        self.inner().total_steps()
    }
}

impl From<Greedy> for AnyAgent {
    fn from(agent: Greedy) -> Self {
        AnyAgent::Greedy(agent)
    }
}

impl From<EpsilonGreedy> for AnyAgent {
    fn from(agent: EpsilonGreedy) -> Self {
        AnyAgent::EpsilonGreedy(agent)
    }
}

impl From<Ucb> for AnyAgent {
    fn from(agent: Ucb) -> Self {
        AnyAgent::Ucb(agent)
    }
}

impl From<GradientBandit> for AnyAgent {
    fn from(agent: GradientBandit) -> Self {
        AnyAgent::GradientBandit(agent)
    }
}
