//! Uniform action sampling over fixed or state-dependent action spaces.

use mcr_core::{ActionSpace, GenerativeModel};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::rollout::RolloutError;

/// Draws an action index uniformly from `[0, action_count)`.
///
/// The action space shape is resolved once in `for_model`. A fixed space builds
/// its distribution up front; a variable space re-queries the model and builds a
/// fresh distribution on every draw. Both go through `Uniform<usize>`, so the
/// same rng stream maps to the same actions either way.
#[derive(Debug, Clone)]
pub enum UniformActionSampler {
    Fixed(Uniform<usize>),
    Variable,
}

impl UniformActionSampler {
    pub fn for_model<M: GenerativeModel + ?Sized>(model: &M) -> Result<Self, RolloutError> {
        match model.action_space() {
            ActionSpace::Fixed(0) => Err(RolloutError::EmptyActionSpace { depth: 0 }),
            ActionSpace::Fixed(n) => Ok(Self::Fixed(Uniform::new(0, n))),
            ActionSpace::Variable => Ok(Self::Variable),
        }
    }

    /// Sample an action valid in `state`, or `None` if the state offers no actions.
    #[inline]
    pub fn sample<M, R>(&self, model: &M, state: &M::State, rng: &mut R) -> Option<usize>
    where
        M: GenerativeModel + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            Self::Fixed(dist) => Some(dist.sample(rng)),
            Self::Variable => match model.action_count(state) {
                0 => None,
                n => Some(Uniform::new(0, n).sample(rng)),
            },
        }
    }
}
