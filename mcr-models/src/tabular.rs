//! Dense tabular MDP sampled as a generative model.

use mcr_core::{ActionSpace, GenerativeModel};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::ModelError;

/// Tolerance for transition rows summing to one.
const ROW_SUM_EPS: f64 = 1e-6;

/// `S` states, `A` actions, tables laid out as `[s][a][s']`.
///
/// A state is terminal when every action keeps the agent there with certainty.
/// Rewards on the self-loop do not matter.
#[derive(Debug, Clone)]
pub struct TabularModel {
    states: usize,
    actions: usize,
    transitions: Vec<f64>,
    rewards: Vec<f64>,
    discount: f64,
    // One sampler per (s, a) row.
    rows: Vec<WeightedIndex<f64>>,
    terminal: Vec<bool>,
}

impl TabularModel {
    pub fn new(
        states: usize,
        actions: usize,
        transitions: Vec<f64>,
        rewards: Vec<f64>,
        discount: f64,
    ) -> Result<Self, ModelError> {
        if states == 0 || actions == 0 {
            return Err(ModelError::Invalid {
                msg: "states and actions must be > 0",
            });
        }
        let expected = states * actions * states;
        if transitions.len() != expected {
            return Err(ModelError::Shape {
                table: "transitions",
                expected,
                got: transitions.len(),
            });
        }
        if rewards.len() != expected {
            return Err(ModelError::Shape {
                table: "rewards",
                expected,
                got: rewards.len(),
            });
        }
        if !(discount.is_finite() && (0.0..=1.0).contains(&discount)) {
            return Err(ModelError::InvalidDiscount(discount));
        }

        let mut rows = Vec::with_capacity(states * actions);
        for s in 0..states {
            for a in 0..actions {
                let start = (s * actions + a) * states;
                let row = &transitions[start..start + states];
                let valid = row.iter().all(|p| p.is_finite() && *p >= 0.0)
                    && (row.iter().sum::<f64>() - 1.0).abs() <= ROW_SUM_EPS;
                if !valid {
                    return Err(ModelError::InvalidRow { s, a });
                }
                let dist = WeightedIndex::new(row).map_err(|_| ModelError::InvalidRow { s, a })?;
                rows.push(dist);
            }
        }

        let mut model = Self {
            states,
            actions,
            transitions,
            rewards,
            discount,
            rows,
            terminal: Vec::new(),
        };
        model.terminal = (0..states).map(|s| model.absorbing(s)).collect();
        Ok(model)
    }

    #[inline]
    fn idx(&self, s: usize, a: usize, s1: usize) -> usize {
        (s * self.actions + a) * self.states + s1
    }

    fn absorbing(&self, s: usize) -> bool {
        (0..self.actions).all(|a| (self.transition(s, a, s) - 1.0).abs() <= ROW_SUM_EPS)
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    pub fn transition(&self, s: usize, a: usize, s1: usize) -> f64 {
        self.transitions[self.idx(s, a, s1)]
    }

    pub fn reward(&self, s: usize, a: usize, s1: usize) -> f64 {
        self.rewards[self.idx(s, a, s1)]
    }

    /// `sum_{s'} T(s, a, s') * R(s, a, s')`.
    pub fn expected_reward(&self, s: usize, a: usize) -> f64 {
        (0..self.states)
            .map(|s1| self.transition(s, a, s1) * self.reward(s, a, s1))
            .sum()
    }
}

impl GenerativeModel for TabularModel {
    type State = usize;

    fn sample_next_state_reward<R: Rng + ?Sized>(
        &self,
        state: &usize,
        action: usize,
        rng: &mut R,
    ) -> (usize, f64) {
        let s1 = self.rows[*state * self.actions + action].sample(rng);
        (s1, self.reward(*state, action, s1))
    }

    fn is_terminal(&self, state: &usize) -> bool {
        self.terminal[*state]
    }

    fn discount(&self) -> f64 {
        self.discount
    }

    fn action_count(&self, _state: &usize) -> usize {
        self.actions
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::Fixed(self.actions)
    }
}
