//! Standard and adaptive rollouts under a uniformly-random default policy.

use mcr_core::{GenerativeModel, RolloutMode};
use rand::Rng;
use thiserror::Error;

use crate::action::UniformActionSampler;
use crate::discount::DiscountAccumulator;
use crate::window::RewardWindow;

#[derive(Debug, Error, PartialEq)]
pub enum RolloutError {
    #[error("no actions available at depth {depth}")]
    EmptyActionSpace { depth: u32 },
    #[error("model discount {discount} is outside [0, 1]")]
    InvalidDiscount { discount: f64 },
    #[error("invalid params: {msg}")]
    InvalidParams { msg: &'static str },
}

/// Early-stop settings for `adaptive_rollout`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveParams {
    /// First (0-based) depth at which convergence is tested.
    pub min_depth: u32,
    /// Number of recent discounted rewards averaged.
    pub window_size: u32,
    /// Stop when `|latest - average| < threshold`.
    pub threshold: f64,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            min_depth: 10,
            window_size: 5,
            threshold: 0.01,
        }
    }
}

impl AdaptiveParams {
    pub fn validate(&self) -> Result<(), RolloutError> {
        if self.window_size == 0 {
            return Err(RolloutError::InvalidParams {
                msg: "window_size must be > 0",
            });
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(RolloutError::InvalidParams {
                msg: "threshold must be finite and >= 0",
            });
        }
        Ok(())
    }

    /// Params for an adaptive mode, `None` for the standard engine.
    pub fn from_mode(mode: &RolloutMode) -> Option<Self> {
        match *mode {
            RolloutMode::Standard => None,
            RolloutMode::Adaptive {
                min_depth,
                window_size,
                threshold,
            } => Some(Self {
                min_depth,
                window_size,
                threshold,
            }),
        }
    }
}

/// Why a rollout stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Simulated `max_depth` steps.
    Horizon,
    /// The model reported the sampled successor as terminal.
    Terminal,
    /// The adaptive window converged.
    Converged,
}

/// Result of one rollout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Discounted return of the sampled trajectory.
    pub value: f64,
    /// Steps simulated.
    pub depth: u32,
    pub stop: StopReason,
}

/// Convergence test applied after each non-terminal step.
enum EarlyStop {
    Never,
    Window {
        window: RewardWindow,
        min_depth: u32,
        threshold: f64,
    },
}

impl EarlyStop {
    #[inline]
    fn record(&mut self, earned: f64) {
        if let EarlyStop::Window { window, .. } = self {
            window.push(earned);
        }
    }

    #[inline]
    fn converged(&self, depth: u32) -> bool {
        match self {
            EarlyStop::Never => false,
            EarlyStop::Window {
                window,
                min_depth,
                threshold,
            } => {
                if depth < *min_depth || !window.is_full() {
                    return false;
                }
                match window.latest() {
                    Some(latest) => (latest - window.average()).abs() < *threshold,
                    None => false,
                }
            }
        }
    }
}

fn simulate<M, R>(
    model: &M,
    start: M::State,
    max_depth: u32,
    rng: &mut R,
    mut early: EarlyStop,
) -> Result<Outcome, RolloutError>
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    if max_depth == 0 {
        return Ok(Outcome {
            value: 0.0,
            depth: 0,
            stop: StopReason::Horizon,
        });
    }

    let discount = model.discount();
    if !(discount.is_finite() && (0.0..=1.0).contains(&discount)) {
        return Err(RolloutError::InvalidDiscount { discount });
    }
    let sampler = UniformActionSampler::for_model(model)?;

    let mut acc = DiscountAccumulator::new();
    let mut state = start;
    for depth in 0..max_depth {
        let action = sampler
            .sample(model, &state, rng)
            .ok_or(RolloutError::EmptyActionSpace { depth })?;
        let (next, reward) = model.sample_next_state_reward(&state, action, rng);
        let earned = acc.accumulate(reward);
        early.record(earned);

        // Terminal takes precedence over convergence; gamma is not advanced
        // past the returning step.
        if model.is_terminal(&next) {
            return Ok(Outcome {
                value: acc.total(),
                depth: depth + 1,
                stop: StopReason::Terminal,
            });
        }
        if early.converged(depth) {
            return Ok(Outcome {
                value: acc.total(),
                depth: depth + 1,
                stop: StopReason::Converged,
            });
        }

        acc.advance(discount);
        state = next;
    }

    Ok(Outcome {
        value: acc.total(),
        depth: max_depth,
        stop: StopReason::Horizon,
    })
}

/// Fixed-horizon rollout with argument validation.
///
/// Returns an error instead of panicking when the model's discount is outside
/// `[0, 1]` or a visited state offers no actions.
pub fn try_rollout<M, R>(
    model: &M,
    start: M::State,
    max_depth: u32,
    rng: &mut R,
) -> Result<Outcome, RolloutError>
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    simulate(model, start, max_depth, rng, EarlyStop::Never)
}

/// Adaptive rollout with argument validation.
pub fn try_adaptive_rollout<M, R>(
    model: &M,
    start: M::State,
    max_depth: u32,
    rng: &mut R,
    params: &AdaptiveParams,
) -> Result<Outcome, RolloutError>
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    params.validate()?;
    let early = EarlyStop::Window {
        window: RewardWindow::new(params.window_size as usize),
        min_depth: params.min_depth,
        threshold: params.threshold,
    };
    simulate(model, start, max_depth, rng, early)
}

/// Discounted return of one uniformly-random trajectory from `start`.
///
/// Stops after `max_depth` steps or as soon as a sampled state is terminal.
/// `max_depth == 0` returns `0.0` without touching the model or `rng`.
///
/// # Panics
///
/// If the model's discount is outside `[0, 1]` or a visited state offers no
/// actions. Use [`try_rollout`] to get these as errors.
pub fn rollout<M, R>(model: &M, start: M::State, max_depth: u32, rng: &mut R) -> f64
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    match try_rollout(model, start, max_depth, rng) {
        Ok(outcome) => outcome.value,
        Err(e) => panic!("rollout: {e}"),
    }
}

/// Like [`rollout`], but also stops once the newest discounted reward sits within
/// `params.threshold` of the average over the last `params.window_size` steps.
///
/// The test runs from 0-based depth `params.min_depth` on, and only with a full
/// window. It trades a small bias for shorter rollouts when the discounted tail
/// has flattened out.
///
/// # Panics
///
/// On the conditions listed for [`rollout`], and if `params` fails
/// [`AdaptiveParams::validate`].
pub fn adaptive_rollout<M, R>(
    model: &M,
    start: M::State,
    max_depth: u32,
    rng: &mut R,
    params: &AdaptiveParams,
) -> f64
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    match try_adaptive_rollout(model, start, max_depth, rng, params) {
        Ok(outcome) => outcome.value,
        Err(e) => panic!("adaptive_rollout: {e}"),
    }
}
