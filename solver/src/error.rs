use thiserror::Error;

/// Validation failures raised before any sweep is performed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("grid dimensions must be at least 1x1, got {nx}x{ny}")]
    InvalidDimension { nx: usize, ny: usize },
    #[error("hot fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
}
