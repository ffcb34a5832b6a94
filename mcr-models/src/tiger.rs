//! The tiger-door problem, fully observable.
//!
//! Two doors, a tiger behind one and a treasure behind the other. Listening
//! costs a little and changes nothing; opening a door pays off or hurts, after
//! which the tiger is placed behind a random door again.

use crate::{ModelError, TabularModel};

pub const TIGER_LEFT: usize = 0;
pub const TIGER_RIGHT: usize = 1;

pub const A_LISTEN: usize = 0;
pub const A_OPEN_LEFT: usize = 1;
pub const A_OPEN_RIGHT: usize = 2;

pub const LISTEN_REWARD: f64 = -1.0;
pub const TREASURE_REWARD: f64 = 10.0;
pub const TIGER_REWARD: f64 = -100.0;

const S: usize = 2;
const A: usize = 3;

pub fn tiger_problem(discount: f64) -> Result<TabularModel, ModelError> {
    let mut transitions = vec![0.0; S * A * S];
    let mut rewards = vec![0.0; S * A * S];
    let at = |s: usize, a: usize, s1: usize| (s * A + a) * S + s1;

    for s in 0..S {
        transitions[at(s, A_LISTEN, s)] = 1.0;
        for s1 in 0..S {
            transitions[at(s, A_OPEN_LEFT, s1)] = 1.0 / S as f64;
            transitions[at(s, A_OPEN_RIGHT, s1)] = 1.0 / S as f64;
            rewards[at(s, A_LISTEN, s1)] = LISTEN_REWARD;
        }
    }
    for s1 in 0..S {
        rewards[at(TIGER_RIGHT, A_OPEN_LEFT, s1)] = TREASURE_REWARD;
        rewards[at(TIGER_LEFT, A_OPEN_LEFT, s1)] = TIGER_REWARD;
        rewards[at(TIGER_LEFT, A_OPEN_RIGHT, s1)] = TREASURE_REWARD;
        rewards[at(TIGER_RIGHT, A_OPEN_RIGHT, s1)] = TIGER_REWARD;
    }

    TabularModel::new(S, A, transitions, rewards, discount)
}
