//! Progress estimator: branch selection, clamping and monotonicity.

use solver::progress::estimate;
use solver::{Run, RunParams, StepOutcome};

#[test]
fn converged_reports_exactly_100() {
    assert_eq!(estimate(Some(1.0), 1e-4, 1e-3, 10, 100), 100);
    assert_eq!(estimate(None, 0.0, 1e-3, 0, 100), 100);
}

#[test]
fn log_scale_tracks_orders_of_magnitude() {
    // Four decades to cover; log10(3e-1) ~ -0.52, so ~13% of the way.
    assert_eq!(estimate(Some(1.0), 3e-1, 1e-4, 10, 100), 13);
    // log10(2e-2) ~ -1.70: ~42%.
    assert_eq!(estimate(Some(1.0), 2e-2, 1e-4, 10, 100), 42);
    // log10(5e-4) ~ -3.30: ~82%.
    assert_eq!(estimate(Some(1.0), 5e-4, 1e-4, 10, 100), 82);
}

#[test]
fn estimate_is_capped_at_99_until_convergence() {
    // A hair above tolerance still reads 99, never 100.
    assert_eq!(estimate(Some(1.0), 1.001e-4, 1e-4, 10, 100), 99);
    // Sweep-ratio fallback at the cap is also held to 99.
    assert_eq!(estimate(None, 1.0, 1e-4, 100, 100), 99);
}

#[test]
fn regressing_delta_clamps_to_zero() {
    assert_eq!(estimate(Some(1.0), 10.0, 1e-4, 10, 100), 0);
}

#[test]
fn sweep_ratio_fallback_without_usable_initial_delta() {
    assert_eq!(estimate(None, f64::INFINITY, 1e-3, 0, 1000), 0);
    assert_eq!(estimate(None, 1.0, 1e-3, 500, 1000), 50);
    // An initial delta at or below tolerance is not usable for the log scale.
    assert_eq!(estimate(Some(1e-5), 1.0, 1e-3, 250, 1000), 25);
}

#[test]
fn monotone_delta_decay_gives_monotone_progress() {
    let initial = 1.0;
    let tolerance = 1e-6;
    let mut delta = initial;
    let mut previous = 0;
    let mut sweep = 0;
    while delta > tolerance {
        sweep += 1;
        let p = estimate(Some(initial), delta, tolerance, sweep, 10_000);
        assert!(p >= previous, "progress regressed at sweep {sweep}");
        previous = p;
        delta *= 0.9;
    }
}

#[test]
fn progress_is_non_decreasing_across_a_real_run() {
    let mut run = Run::new(RunParams {
        nx: 21,
        ny: 21,
        hot_fraction: 0.2,
        tolerance: 1e-3,
        max_sweeps: 10_000,
        ..RunParams::default()
    })
    .unwrap();

    let mut previous = run.progress();
    loop {
        let outcome = run.step();
        let p = run.progress();
        assert!(
            p >= previous,
            "progress regressed from {previous} to {p} at sweep {}",
            run.sweep_count()
        );
        previous = p;
        if let StepOutcome::Finished(_) = outcome {
            break;
        }
    }
    assert_eq!(run.progress(), 100);
}
