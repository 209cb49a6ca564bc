//! Boundary/source initialization: ramp values, hot region placement,
//! fixed mask contents and parameter validation.

use solver::{HotRegion, Run, RunParams, SolverError};

fn params_5x5_center_cell() -> RunParams {
    RunParams {
        nx: 5,
        ny: 5,
        // round(5 * 0.2) = 1: the hot region is the single center cell
        hot_fraction: 0.2,
        ..RunParams::default()
    }
}

#[test]
fn boundaries_and_hot_region_seed_the_expected_values() {
    let run = Run::new(params_5x5_center_cell()).unwrap();
    let field = run.field();

    for i in 0..5 {
        assert_eq!(field.get(i, 0), 32.0, "bottom row at i={i}");
        assert_eq!(field.get(i, 4), 100.0, "top row at i={i}");
    }
    // Side columns ramp 32 -> 100 over four row intervals: 17 per row.
    for j in 0..5 {
        let expected = 32.0 + 17.0 * j as f64;
        assert_eq!(field.get(0, j), expected, "left column at j={j}");
        assert_eq!(field.get(4, j), expected, "right column at j={j}");
    }

    assert_eq!(field.get(2, 2), 212.0, "center hot cell");
    // Interior non-fixed cells start from the bottom temperature.
    assert_eq!(field.get(1, 2), 32.0);
    assert_eq!(field.get(3, 1), 32.0);
}

#[test]
fn fixed_mask_covers_edges_and_hot_region_only() {
    let run = Run::new(params_5x5_center_cell()).unwrap();
    let mask = run.mask();

    for i in 0..5 {
        assert!(mask.is_fixed(i, 0));
        assert!(mask.is_fixed(i, 4));
    }
    for j in 0..5 {
        assert!(mask.is_fixed(0, j));
        assert!(mask.is_fixed(4, j));
    }
    assert!(mask.is_fixed(2, 2));

    // 16 perimeter cells + 1 hot cell.
    assert_eq!(mask.fixed_count(), 17);
    assert!(!mask.is_fixed(1, 1));
    assert!(!mask.is_fixed(3, 3));
}

#[test]
fn hot_region_bounds_are_centered_and_inclusive() {
    assert_eq!(HotRegion::centered(5, 5, 0.2).bounds(), Some((2, 2, 2, 2)));
    assert_eq!(HotRegion::centered(10, 10, 1.0).bounds(), Some((0, 9, 0, 9)));

    // round(9 * 1/3) = 3 wide, centered at indices 3..=5
    let region = HotRegion::centered(9, 9, 1.0 / 3.0);
    assert_eq!(region.bounds(), Some((3, 5, 3, 5)));
    assert!(region.contains(3, 5));
    assert!(!region.contains(2, 4));
    assert!(!region.contains(4, 6));
}

#[test]
fn tiny_grid_with_small_fraction_yields_an_empty_region() {
    // round(2 * 0.2) = 0
    let region = HotRegion::centered(2, 2, 0.2);
    assert!(region.is_empty());
    assert_eq!(region.bounds(), None);

    // The run still initializes; every cell is an edge, so all are fixed.
    let run = Run::new(RunParams {
        nx: 2,
        ny: 2,
        hot_fraction: 0.2,
        ..RunParams::default()
    })
    .unwrap();
    assert_eq!(run.mask().fixed_count(), 4);
}

#[test]
fn degenerate_single_row_grid_initializes() {
    let run = Run::new(RunParams {
        nx: 3,
        ny: 1,
        hot_fraction: 0.4,
        ..RunParams::default()
    })
    .unwrap();
    // The ramp collapses to the bottom temperature on the side columns.
    assert_eq!(run.field().get(0, 0), 32.0);
    assert_eq!(run.field().get(2, 0), 32.0);
}

#[test]
fn invalid_parameters_are_rejected() {
    let zero_dim = RunParams {
        nx: 0,
        ..RunParams::default()
    };
    assert_eq!(
        Run::new(zero_dim).err(),
        Some(SolverError::InvalidDimension { nx: 0, ny: 51 })
    );

    for bad_fraction in [0.0, -0.5, 1.5, f64::NAN] {
        let params = RunParams {
            hot_fraction: bad_fraction,
            ..RunParams::default()
        };
        assert!(
            matches!(params.validate(), Err(SolverError::InvalidFraction(_))),
            "fraction {bad_fraction} should be rejected"
        );
    }

    let bad_tolerance = RunParams {
        tolerance: 0.0,
        ..RunParams::default()
    };
    assert_eq!(
        bad_tolerance.validate(),
        Err(SolverError::InvalidTolerance(0.0))
    );
}
