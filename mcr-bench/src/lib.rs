//! Shared fixtures for the rollout benchmarks.

use mcr_models::{tiger_problem, Corridor, ModelError, TabularModel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Discount used by every benchmark model.
pub const BENCH_DISCOUNT: f64 = 0.95;

/// Fixed action space: 2 states, 3 actions.
pub fn tiger() -> Result<TabularModel, ModelError> {
    tiger_problem(BENCH_DISCOUNT)
}

/// Variable action space long enough that rollouts rarely hit the goal early.
pub fn corridor() -> Result<Corridor, ModelError> {
    Corridor::new(400, 4, 0.2, 100.0, BENCH_DISCOUNT)
}

pub fn bench_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0xBE_7C4)
}
