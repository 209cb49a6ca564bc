use crate::field::{Field, FixedMask};

/// One Jacobi sweep: every non-fixed cell of `new` becomes the mean of its
/// four axis neighbours in `old`, fixed cells copy through unchanged.
/// Returns the maximum absolute per-cell change.
///
/// All reads come from `old`, so the result is independent of traversal
/// order. Neighbour indices are clamped at the grid edge; in practice that
/// path is never taken for a non-fixed cell because all true edges are fixed.
pub fn sweep(old: &Field, new: &mut Field, mask: &FixedMask) -> f64 {
    let nx = old.nx();
    let ny = old.ny();
    let mut delta = 0.0_f64;

    for j in 0..ny {
        let jm1 = j.saturating_sub(1);
        let jp1 = (j + 1).min(ny - 1);
        for i in 0..nx {
            let value = if mask.is_fixed(i, j) {
                old.get(i, j)
            } else {
                let im1 = i.saturating_sub(1);
                let ip1 = (i + 1).min(nx - 1);
                0.25 * (old.get(im1, j) + old.get(ip1, j) + old.get(i, jm1) + old.get(i, jp1))
            };
            let d = (value - old.get(i, j)).abs();
            if d > delta {
                delta = d;
            }
            new.set(i, j, value);
        }
    }

    delta
}
