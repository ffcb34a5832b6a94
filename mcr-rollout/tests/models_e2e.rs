//! Rollouts over the concrete models in `mcr-models`.

use mcr_core::{Config, RolloutConfig, RolloutMode};
use mcr_models::corridor::STEP_COST;
use mcr_models::tiger::{TIGER_LEFT, TIGER_REWARD, TREASURE_REWARD};
use mcr_models::{tiger_problem, Corridor};
use mcr_rollout::{
    adaptive_rollout, estimate_from_config, estimate_value, rollout, try_adaptive_rollout, try_rollout, AdaptiveParams,
    StopReason,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn tiger_rollouts_stay_within_reward_bounds() {
    let gamma = 0.95;
    let model = tiger_problem(gamma).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let depth = 40;
    // Geometric bound on |return| given the per-step reward range.
    let horizon_weight: f64 = (0..depth).map(|i| gamma.powi(i)).sum();

    for _ in 0..500 {
        let out = try_rollout(&model, TIGER_LEFT, depth as u32, &mut rng).unwrap();
        assert_eq!(out.stop, StopReason::Horizon);
        assert_eq!(out.depth, depth as u32);
        assert!(out.value >= TIGER_REWARD * horizon_weight - 1e-9);
        assert!(out.value <= TREASURE_REWARD * horizon_weight + 1e-9);
    }
}

#[test]
fn tiger_single_step_mean_matches_uniform_policy() {
    // Uniform over {listen, open left, open right}: (-1 - 100 + 10) / 3.
    let model = tiger_problem(0.95).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let cfg = RolloutConfig {
        max_depth: 1,
        mode: RolloutMode::Standard,
    };
    let est = estimate_value(&model, &TIGER_LEFT, &cfg, 60_000, &mut rng).unwrap();
    let expected = (-1.0 - 100.0 + 10.0) / 3.0;
    assert!((est.mean - expected).abs() < 1.0, "mean={}", est.mean);
}

#[test]
fn adaptive_tiger_never_runs_longer_than_standard() {
    let model = tiger_problem(0.5).unwrap();
    let params = AdaptiveParams {
        min_depth: 5,
        window_size: 5,
        threshold: 0.01,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut converged = 0;
    for _ in 0..200 {
        let out = try_adaptive_rollout(&model, TIGER_LEFT, 100, &mut rng, &params).unwrap();
        assert!(out.depth <= 100);
        if out.stop == StopReason::Converged {
            assert!(out.depth > params.min_depth);
            converged += 1;
        }
    }
    // With gamma = 0.5 the discounted tail flattens well before 100 steps.
    assert_eq!(converged, 200);
}

#[test]
fn corridor_reaches_goal_with_variable_actions() {
    let model = Corridor::new(12, 3, 0.1, 20.0, 1.0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    for _ in 0..300 {
        let out = try_rollout(&model, 0, 1_000, &mut rng).unwrap();
        assert_eq!(out.stop, StopReason::Terminal);
        // Undiscounted: one step cost per move plus the goal reward.
        let expected = STEP_COST * f64::from(out.depth) + 20.0;
        assert!((out.value - expected).abs() < 1e-9);
    }
}

#[test]
fn corridor_adaptive_matches_standard_before_goal_without_convergence() {
    let model = Corridor::new(30, 2, 0.3, 50.0, 0.97).unwrap();
    let params = AdaptiveParams {
        threshold: 0.0,
        ..AdaptiveParams::default()
    };
    for seed in 0..25 {
        let mut r1 = ChaCha8Rng::seed_from_u64(seed);
        let mut r2 = ChaCha8Rng::seed_from_u64(seed);
        assert_eq!(
            adaptive_rollout(&model, 0, 200, &mut r1, &params),
            rollout(&model, 0, 200, &mut r2)
        );
    }
}

#[test]
fn estimate_from_reference_config() {
    let raw = std::fs::read("../configs/default.yaml").unwrap();
    let mut cfg = Config::load("../configs/default.yaml").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("estimates.ndjson");
    cfg.estimate.log_path = Some(log.display().to_string());

    let model = Corridor::new(8, 2, 0.0, 10.0, 1.0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.estimate.seed);
    let est = estimate_from_config(&model, &0, "corridor", &cfg, Some(raw.as_slice()), &mut rng).unwrap();
    // The corridor finishes in at most 8 moves, below the adaptive min_depth.
    assert_eq!(est.episodes, cfg.estimate.episodes);
    assert_eq!(est.terminal, cfg.estimate.episodes);
    assert_eq!(est.converged, 0);
    assert!(est.mean >= 10.0 - 8.0 && est.mean <= 10.0 - 4.0, "mean={}", est.mean);

    let text = std::fs::read_to_string(&log).unwrap();
    let v: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
    assert_eq!(v["model_id"], "corridor");
    assert_eq!(v["mode"], "adaptive");
    assert_eq!(v["episodes"], cfg.estimate.episodes);
    assert_eq!(v["config_hash"], mcr_logging::hash_config_bytes(&raw).as_str());
}
