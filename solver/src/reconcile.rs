use crate::run::{Run, Snapshot};

/// Uniform per-frame display duration across every run in a batch, in
/// milliseconds. A batch-wide constant, never recomputed per run.
pub const FRAME_DURATION_MS: u64 = 200;

/// Pad every run's snapshot sequence to the batch maximum length so a
/// side-by-side playback stays time-aligned. A run missing `k` frames gets
/// `k / 2` copies of its first frame prepended and the remainder of its last
/// frame appended, so the composed animation loops cleanly instead of
/// freezing at one end.
pub fn reconcile(runs: &mut [Run]) {
    let target = runs
        .iter()
        .map(|run| run.snapshots.len())
        .max()
        .unwrap_or(0);
    for run in runs.iter_mut() {
        pad_snapshots(&mut run.snapshots, target);
    }
}

fn pad_snapshots(snapshots: &mut Vec<Snapshot>, target: usize) {
    let missing = target.saturating_sub(snapshots.len());
    if missing == 0 || snapshots.is_empty() {
        return;
    }
    let start = missing / 2;
    let end = missing - start;

    let first = snapshots[0].clone();
    let last = snapshots[snapshots.len() - 1].clone();
    snapshots.splice(0..0, std::iter::repeat(first).take(start));
    snapshots.extend(std::iter::repeat(last).take(end));
}
