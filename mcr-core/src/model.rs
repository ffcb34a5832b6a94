//! The generative model capability consumed by the rollout engines.
//!
//! A generative model is queried by sampling rather than through explicit
//! transition/reward tables. Engines only ever borrow the model immutably, so a
//! `Sync` model can be shared between threads as long as every caller brings
//! its own random source.

use rand::Rng;

/// Shape of a model's action space, resolved once per rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSpace {
    /// The same number of actions is available in every state.
    Fixed(usize),
    /// The number of actions depends on the state and is re-queried every step.
    Variable,
}

impl ActionSpace {
    /// Action count when it does not depend on the state.
    pub fn fixed_count(self) -> Option<usize> {
        match self {
            ActionSpace::Fixed(n) => Some(n),
            ActionSpace::Variable => None,
        }
    }
}

/// Sampling interface of a sequential decision process.
///
/// Actions are integral indices in `[0, action_count(state))`.
pub trait GenerativeModel {
    type State: Clone;

    /// Sample a successor state and the reward earned on the way.
    ///
    /// Repeated calls with identical arguments yield independent draws; any
    /// randomness comes from `rng`.
    fn sample_next_state_reward<R: Rng + ?Sized>(
        &self,
        state: &Self::State,
        action: usize,
        rng: &mut R,
    ) -> (Self::State, f64);

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Per-step discount factor. Constant for the model's lifetime, within `[0, 1]`.
    fn discount(&self) -> f64;

    /// Number of actions available in `state`.
    fn action_count(&self, state: &Self::State) -> usize;

    /// `Fixed(n)` promises `action_count(s) == n` for every `s`, letting callers
    /// query it once instead of every step.
    fn action_space(&self) -> ActionSpace {
        ActionSpace::Variable
    }
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for &M {
    type State = M::State;

    fn sample_next_state_reward<R: Rng + ?Sized>(
        &self,
        state: &Self::State,
        action: usize,
        rng: &mut R,
    ) -> (Self::State, f64) {
        (**self).sample_next_state_reward(state, action, rng)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        (**self).is_terminal(state)
    }

    fn discount(&self) -> f64 {
        (**self).discount()
    }

    fn action_count(&self, state: &Self::State) -> usize {
        (**self).action_count(state)
    }

    fn action_space(&self) -> ActionSpace {
        (**self).action_space()
    }
}
