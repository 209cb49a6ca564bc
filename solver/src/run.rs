use serde::{Deserialize, Serialize};

use crate::engine;
use crate::error::SolverError;
use crate::field::{Field, FixedMask};
use crate::init;
use crate::progress;

/// Immutable per-run configuration, passed by value into [`Run::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub nx: usize,
    pub ny: usize,
    pub hot_fraction: f64,
    pub bottom_temp: f64,
    pub top_temp: f64,
    pub hot_temp: f64,
    pub tolerance: f64,
    pub max_sweeps: u32,
}

impl Default for RunParams {
    fn default() -> RunParams {
        RunParams {
            nx: 51,
            ny: 51,
            hot_fraction: 1.0 / 3.0,
            bottom_temp: 32.0,
            top_temp: 100.0,
            hot_temp: 212.0,
            tolerance: 1e-3,
            max_sweeps: 15_000,
        }
    }
}

impl RunParams {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.nx < 1 || self.ny < 1 {
            return Err(SolverError::InvalidDimension {
                nx: self.nx,
                ny: self.ny,
            });
        }
        if !(self.hot_fraction > 0.0 && self.hot_fraction <= 1.0) {
            return Err(SolverError::InvalidFraction(self.hot_fraction));
        }
        if !(self.tolerance > 0.0) {
            return Err(SolverError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    Finished(StopReason),
}

/// Why a run stopped. `MaxSweepsReached` is a safety cap, not a convergence
/// claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    Converged,
    MaxSweepsReached,
}

/// A captured copy of the field at a given sweep count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sweep: u32,
    pub delta: f64,
    pub values: Vec<f64>,
}

/// One solve: double-buffered field, fixed mask, sweep counter, convergence
/// history and snapshot sequence. Mutated exclusively by whoever drives it.
pub struct Run {
    params: RunParams,
    old: Field,
    next: Field,
    mask: FixedMask,
    sweep_count: u32,
    last_delta: f64,
    initial_delta: Option<f64>,
    history: Vec<(u32, f64)>,
    pub(crate) snapshots: Vec<Snapshot>,
    stop_reason: Option<StopReason>,
}

impl Run {
    /// Validates the parameters, seeds boundaries and the hot region, and
    /// captures the sweep-0 snapshot.
    pub fn new(params: RunParams) -> Result<Run, SolverError> {
        let (old, mask) = init::init_plate(&params)?;
        let next = old.clone();
        let mut run = Run {
            params,
            old,
            next,
            mask,
            sweep_count: 0,
            last_delta: f64::INFINITY,
            initial_delta: None,
            history: Vec::new(),
            snapshots: Vec::new(),
            stop_reason: None,
        };
        run.capture_snapshot();
        Ok(run)
    }

    /// Advance one sweep and apply the termination policy. Calling this on a
    /// finished run is a no-op that reports the existing stop reason.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.stop_reason {
            return StepOutcome::Finished(reason);
        }

        let delta = engine::sweep(&self.old, &mut self.next, &self.mask);
        std::mem::swap(&mut self.old, &mut self.next);
        self.sweep_count += 1;
        self.last_delta = delta;
        if self.initial_delta.is_none() {
            self.initial_delta = Some(delta);
        }
        self.history.push((self.sweep_count, delta));

        if delta <= self.params.tolerance {
            self.stop_reason = Some(StopReason::Converged);
        } else if self.sweep_count >= self.params.max_sweeps {
            self.stop_reason = Some(StopReason::MaxSweepsReached);
        }

        match self.stop_reason {
            Some(reason) => StepOutcome::Finished(reason),
            None => StepOutcome::Running,
        }
    }

    /// Drive to termination, capturing a snapshot every `frame_every` sweeps
    /// and once more when the run stops.
    pub fn solve(&mut self, frame_every: u32) -> StopReason {
        let frame_every = frame_every.max(1);
        loop {
            match self.step() {
                StepOutcome::Running => {
                    if self.sweep_count % frame_every == 0 {
                        self.capture_snapshot();
                    }
                }
                StepOutcome::Finished(reason) => {
                    self.capture_snapshot();
                    return reason;
                }
            }
        }
    }

    /// Append a copy of the current field to the snapshot sequence. A repeat
    /// capture at the same sweep count is dropped.
    pub fn capture_snapshot(&mut self) {
        if let Some(last) = self.snapshots.last() {
            if last.sweep == self.sweep_count {
                return;
            }
        }
        let delta = if self.sweep_count == 0 {
            0.0
        } else {
            self.last_delta
        };
        self.snapshots.push(Snapshot {
            sweep: self.sweep_count,
            delta,
            values: self.old.values().to_vec(),
        });
    }

    pub fn progress(&self) -> u8 {
        progress::estimate(
            self.initial_delta,
            self.last_delta,
            self.params.tolerance,
            self.sweep_count,
            self.params.max_sweeps,
        )
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// The field as of the most recent completed sweep.
    pub fn field(&self) -> &Field {
        &self.old
    }

    pub fn mask(&self) -> &FixedMask {
        &self.mask
    }

    pub fn sweep_count(&self) -> u32 {
        self.sweep_count
    }

    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    pub fn initial_delta(&self) -> Option<f64> {
        self.initial_delta
    }

    /// `(sweep, delta)` pairs for every sweep performed so far.
    pub fn history(&self) -> &[(u32, f64)] {
        &self.history
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn is_finished(&self) -> bool {
        self.stop_reason.is_some()
    }

    pub fn converged(&self) -> bool {
        self.stop_reason == Some(StopReason::Converged)
    }
}
