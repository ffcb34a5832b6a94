//! Slippery corridor with a state-dependent number of actions.

use mcr_core::GenerativeModel;
use rand::Rng;

use crate::ModelError;

/// Cells `0..=length`; `length` is the goal and terminal.
///
/// In cell `i` the agent may stride `1..=min(max_stride, length - i)` cells;
/// action `k` strides `k + 1`. Every move costs `-1` and fails with probability
/// `slip`, leaving the agent in place. Reaching the goal also pays `goal_reward`.
/// The goal offers a single no-op action.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    length: usize,
    max_stride: usize,
    slip: f64,
    goal_reward: f64,
    discount: f64,
}

pub const STEP_COST: f64 = -1.0;

impl Corridor {
    pub fn new(
        length: usize,
        max_stride: usize,
        slip: f64,
        goal_reward: f64,
        discount: f64,
    ) -> Result<Self, ModelError> {
        if length == 0 || max_stride == 0 {
            return Err(ModelError::Invalid {
                msg: "length and max_stride must be > 0",
            });
        }
        if !(0.0..1.0).contains(&slip) {
            return Err(ModelError::Invalid {
                msg: "slip must be in [0, 1)",
            });
        }
        if !goal_reward.is_finite() {
            return Err(ModelError::Invalid {
                msg: "goal_reward must be finite",
            });
        }
        if !(discount.is_finite() && (0.0..=1.0).contains(&discount)) {
            return Err(ModelError::InvalidDiscount(discount));
        }
        Ok(Self {
            length,
            max_stride,
            slip,
            goal_reward,
            discount,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn goal(&self) -> usize {
        self.length
    }
}

impl GenerativeModel for Corridor {
    type State = usize;

    fn sample_next_state_reward<R: Rng + ?Sized>(
        &self,
        state: &usize,
        action: usize,
        rng: &mut R,
    ) -> (usize, f64) {
        if *state >= self.length {
            return (self.length, 0.0);
        }
        if self.slip > 0.0 && rng.gen_bool(self.slip) {
            return (*state, STEP_COST);
        }
        let next = (*state + action + 1).min(self.length);
        if next == self.length {
            (next, STEP_COST + self.goal_reward)
        } else {
            (next, STEP_COST)
        }
    }

    fn is_terminal(&self, state: &usize) -> bool {
        *state >= self.length
    }

    fn discount(&self) -> f64 {
        self.discount
    }

    fn action_count(&self, state: &usize) -> usize {
        if *state >= self.length {
            1
        } else {
            self.max_stride.min(self.length - *state)
        }
    }
}
