//! Averaging many rollouts into a single value estimate.

use mcr_core::{Config, GenerativeModel, RolloutConfig};
use mcr_logging::{
    hash_config_bytes, now_ms, NdjsonError, NdjsonWriter, RolloutEstimateEventV1, VersionInfoV1,
};
use rand::Rng;
use thiserror::Error;

use crate::rollout::{try_adaptive_rollout, try_rollout, AdaptiveParams, RolloutError, StopReason};

/// Mean discounted return over a batch of independent rollouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: f64,
    pub episodes: u32,
    pub total_steps: u64,
    /// Rollouts that ended in a terminal state.
    pub terminal: u32,
    /// Rollouts stopped by the adaptive convergence test.
    pub converged: u32,
}

/// Run `episodes` rollouts from `start` with the engine `cfg.mode` selects.
///
/// All rollouts draw from the same borrowed `rng`, one after another.
pub fn estimate_value<M, R>(
    model: &M,
    start: &M::State,
    cfg: &RolloutConfig,
    episodes: u32,
    rng: &mut R,
) -> Result<Estimate, RolloutError>
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    if episodes == 0 {
        return Err(RolloutError::InvalidParams {
            msg: "episodes must be > 0",
        });
    }
    let adaptive = AdaptiveParams::from_mode(&cfg.mode);

    let mut sum = 0.0;
    let mut est = Estimate {
        mean: 0.0,
        episodes,
        total_steps: 0,
        terminal: 0,
        converged: 0,
    };
    for _ in 0..episodes {
        let outcome = match &adaptive {
            Some(params) => try_adaptive_rollout(model, start.clone(), cfg.max_depth, rng, params)?,
            None => try_rollout(model, start.clone(), cfg.max_depth, rng)?,
        };
        sum += outcome.value;
        est.total_steps += u64::from(outcome.depth);
        match outcome.stop {
            StopReason::Terminal => est.terminal += 1,
            StopReason::Converged => est.converged += 1,
            StopReason::Horizon => {}
        }
    }
    est.mean = sum / f64::from(episodes);
    Ok(est)
}

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Rollout(#[from] RolloutError),
    #[error("failed to write estimate log: {0:?}")]
    Log(NdjsonError),
}

impl From<NdjsonError> for EstimateError {
    fn from(e: NdjsonError) -> Self {
        Self::Log(e)
    }
}

/// Estimate with every setting taken from `cfg`.
///
/// Runs `cfg.estimate.episodes` rollouts under `cfg.rollout`. When
/// `cfg.estimate.log_path` is set, appends one summary event there, stamped with
/// the hash of `config_bytes` (the raw file the config was loaded from) if given.
/// `cfg.estimate.seed` is for the caller building `rng`; it is not used here.
pub fn estimate_from_config<M, R>(
    model: &M,
    start: &M::State,
    model_id: &str,
    cfg: &Config,
    config_bytes: Option<&[u8]>,
    rng: &mut R,
) -> Result<Estimate, EstimateError>
where
    M: GenerativeModel + ?Sized,
    R: Rng + ?Sized,
{
    let est = estimate_value(model, start, &cfg.rollout, cfg.estimate.episodes, rng)?;
    if let Some(path) = &cfg.estimate.log_path {
        let mut w = NdjsonWriter::open_append(path)?;
        est.log(&mut w, model_id, &cfg.rollout, config_bytes.map(hash_config_bytes))?;
        w.flush()?;
    }
    Ok(est)
}

impl Estimate {
    pub fn to_event(
        &self,
        model_id: &str,
        cfg: &RolloutConfig,
        config_hash: Option<String>,
    ) -> RolloutEstimateEventV1 {
        RolloutEstimateEventV1 {
            event: "rollout_estimate",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            model_id: model_id.to_string(),
            mode: cfg.mode.label(),
            max_depth: cfg.max_depth,
            episodes: self.episodes,
            mean_return: self.mean,
            total_steps: self.total_steps,
            terminal: self.terminal,
            converged: self.converged,
            config_hash,
        }
    }

    /// Append this estimate as one NDJSON line.
    pub fn log(
        &self,
        w: &mut NdjsonWriter,
        model_id: &str,
        cfg: &RolloutConfig,
        config_hash: Option<String>,
    ) -> Result<(), NdjsonError> {
        w.write_event(&self.to_event(model_id, cfg, config_hash))
    }
}
