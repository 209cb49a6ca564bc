/// Map the convergence metric to a human-readable figure in `0..=100`.
///
/// Delta shrinks geometrically near the fixed point, so progress is read off
/// a log scale between the first sweep's delta and the tolerance. Until a
/// usable initial delta exists the sweep-count ratio stands in. Everything
/// short of convergence is capped at 99.
pub fn estimate(
    initial_delta: Option<f64>,
    current_delta: f64,
    tolerance: f64,
    sweeps: u32,
    max_sweeps: u32,
) -> u8 {
    if current_delta <= tolerance {
        return 100;
    }

    if let Some(initial) = initial_delta {
        if initial > tolerance {
            let span = initial.log10() - tolerance.log10();
            let gained = initial.log10() - current_delta.log10();
            let p = (gained / span * 100.0) as i64;
            return p.clamp(0, 99) as u8;
        }
    }

    let p = (sweeps as f64 / max_sweeps.max(1) as f64 * 100.0) as i64;
    p.clamp(0, 99) as u8
}
