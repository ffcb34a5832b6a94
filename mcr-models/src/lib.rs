//! Concrete generative models for rollouts and benchmarks.
//!
//! - `TabularModel`: dense transition/reward tables, fixed action space
//! - `tiger_problem`: the tiger-door problem as a `TabularModel`
//! - `Corridor`: a slippery corridor whose action count depends on the state

pub mod corridor;
pub mod tabular;
pub mod tiger;

pub use corridor::Corridor;
pub use tabular::TabularModel;
pub use tiger::tiger_problem;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("table {table} has {got} entries, expected {expected}")]
    Shape {
        table: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("transition row (s={s}, a={a}) is not a probability distribution")]
    InvalidRow { s: usize, a: usize },
    #[error("discount {0} is outside [0, 1]")]
    InvalidDiscount(f64),
    #[error("invalid model: {msg}")]
    Invalid { msg: &'static str },
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
