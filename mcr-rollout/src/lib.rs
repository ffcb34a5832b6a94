//! Rollout engines for Monte-Carlo planning.
//!
//! A rollout follows a uniformly-random default policy from a state and returns
//! the discounted return of the one trajectory it drew. Two engines share the
//! same stepping mechanics:
//! - `rollout`: stops at `max_depth` or a terminal state
//! - `adaptive_rollout`: additionally stops once the newest discounted reward
//!   sits within a threshold of a short sliding-window average
//!
//! Every call owns its own accumulator and window; the model is only borrowed
//! immutably and the random source is borrowed for the duration of the call.

pub mod action;
pub mod discount;
pub mod estimate;
pub mod rollout;
pub mod window;

pub use action::UniformActionSampler;
pub use discount::DiscountAccumulator;
pub use estimate::{estimate_from_config, estimate_value, Estimate, EstimateError};
pub use rollout::{
    adaptive_rollout, rollout, try_adaptive_rollout, try_rollout, AdaptiveParams, Outcome,
    RolloutError, StopReason,
};
pub use window::RewardWindow;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
