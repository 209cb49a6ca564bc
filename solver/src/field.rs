use serde::{Deserialize, Serialize};

/// A rectangular grid of temperatures, row-major with x fastest:
/// `values[j * nx + i]`. The shape never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
}

impl Field {
    pub fn new(nx: usize, ny: usize, fill: f64) -> Field {
        Field {
            nx,
            ny,
            values: vec![fill; nx * ny],
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.nx + i]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[j * self.nx + i] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Marks cells whose value is pinned for the life of a run: the four outer
/// edges and the hot region. Built once at setup, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedMask {
    nx: usize,
    fixed: Vec<bool>,
}

impl FixedMask {
    pub fn new(nx: usize, ny: usize) -> FixedMask {
        FixedMask {
            nx,
            fixed: vec![false; nx * ny],
        }
    }

    #[inline]
    pub fn is_fixed(&self, i: usize, j: usize) -> bool {
        self.fixed[j * self.nx + i]
    }

    pub fn set_fixed(&mut self, i: usize, j: usize) {
        self.fixed[j * self.nx + i] = true;
    }

    pub fn fixed_count(&self) -> usize {
        self.fixed.iter().filter(|f| **f).count()
    }
}

/// A centered rectangular block pinned at the source temperature. Side
/// lengths are `round(dimension * fraction)`; a rounded side of zero makes
/// the region empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotRegion {
    i0: usize,
    j0: usize,
    width: usize,
    height: usize,
}

impl HotRegion {
    pub fn centered(nx: usize, ny: usize, fraction: f64) -> HotRegion {
        let width = (nx as f64 * fraction).round() as usize;
        let height = (ny as f64 * fraction).round() as usize;
        HotRegion {
            i0: (nx - width) / 2,
            j0: (ny - height) / 2,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Inclusive bounds `(i0, i1, j0, j1)`, or `None` for an empty region.
    pub fn bounds(&self) -> Option<(usize, usize, usize, usize)> {
        if self.is_empty() {
            return None;
        }
        Some((
            self.i0,
            self.i0 + self.width - 1,
            self.j0,
            self.j0 + self.height - 1,
        ))
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        i >= self.i0 && i < self.i0 + self.width && j >= self.j0 && j < self.j0 + self.height
    }
}
