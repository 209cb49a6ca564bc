//! Steady-state plate temperature via Jacobi relaxation.
//!
//! A [`Run`] owns a double-buffered temperature [`Field`] and a [`FixedMask`]
//! of Dirichlet cells (outer edges plus a centered hot region) and advances
//! them one sweep at a time until the per-sweep delta drops under tolerance
//! or the sweep cap is hit. [`reconcile`] pads the snapshot sequences of a
//! finished batch to a common length for synchronized playback.

pub mod engine;
pub mod error;
pub mod field;
pub mod init;
pub mod progress;
pub mod reconcile;
pub mod run;

pub use error::SolverError;
pub use field::{Field, FixedMask, HotRegion};
pub use reconcile::{reconcile, FRAME_DURATION_MS};
pub use run::{Run, RunParams, Snapshot, StepOutcome, StopReason};
