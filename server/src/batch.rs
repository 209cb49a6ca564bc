use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use chrono::{DateTime, Utc};
use msgs::{ConvergenceHistory, Frame, RunReport, ServerMsg};
use solver::{reconcile, Run, RunParams, StepOutcome, FRAME_DURATION_MS};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::context::SimContextRef;

/// Run tasks yield back to the scheduler at this sweep interval, purely for
/// fairness; the cancellation flag is checked at the same points.
pub const YIELD_EVERY: u32 = 10;

/// Wall-clock cadence of the progress broadcast, decoupled from sweep
/// cadence.
pub const PROGRESS_BROADCAST_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Created = 0,
    Running = 1,
    Completed = 2,
    Failed = 3,
}

/// One orchestration request: immutable identity and parameters, lifecycle
/// state, the shared progress vector and the results slot list. Each run
/// task writes only its own progress index and results slot.
pub struct BatchSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub frame_every: u32,
    pub run_params: Vec<RunParams>,
    state: AtomicU8,
    cancelled: AtomicBool,
    progress: RwLock<Vec<u8>>,
    results: Mutex<Vec<Option<Run>>>,
}

impl BatchSession {
    pub fn new(run_params: Vec<RunParams>, frame_every: u32) -> BatchSession {
        let num_runs = run_params.len();
        BatchSession {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            frame_every,
            run_params,
            state: AtomicU8::new(BatchState::Created as u8),
            cancelled: AtomicBool::new(false),
            progress: RwLock::new(vec![0; num_runs]),
            results: Mutex::new((0..num_runs).map(|_| None).collect()),
        }
    }

    pub fn state(&self) -> BatchState {
        match self.state.load(Ordering::SeqCst) {
            0 => BatchState::Created,
            1 => BatchState::Running,
            2 => BatchState::Completed,
            _ => BatchState::Failed,
        }
    }

    pub fn set_state(&self, state: BatchState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.state() == BatchState::Running
    }

    /// Ask every run task to stop at its next yield point.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub async fn set_progress(&self, index: usize, value: u8) {
        self.progress.write().await[index] = value;
    }

    pub async fn progress_snapshot(&self) -> Vec<u8> {
        self.progress.read().await.clone()
    }

    pub async fn store_result(&self, index: usize, run: Run) {
        self.results.lock().await[index] = Some(run);
    }

    /// All finished runs in batch order, or `None` if any slot is still
    /// empty.
    pub async fn take_results(&self) -> Option<Vec<Run>> {
        let mut slots = self.results.lock().await;
        if slots.iter().any(|slot| slot.is_none()) {
            return None;
        }
        Some(slots.drain(..).flatten().collect())
    }
}

/// Validate and launch a batch. Emits `simulation_started` on acceptance,
/// or a single `error` event if the request is rejected; progress and
/// completion events follow from the spawned tasks.
pub async fn start_batch(
    context_ref: SimContextRef,
    hot_fractions: Vec<f64>,
    grid_size: usize,
    tolerance: f64,
    max_sweeps: u32,
    frame_every: u32,
) {
    let run_params: Vec<RunParams> = hot_fractions
        .iter()
        .map(|&hot_fraction| RunParams {
            nx: grid_size,
            ny: grid_size,
            hot_fraction,
            tolerance,
            max_sweeps,
            ..RunParams::default()
        })
        .collect();

    let session = {
        let mut context = context_ref.write().await;
        if context.batch_running() {
            context.broadcast(&ServerMsg::Error {
                message: "Simulation already running".into(),
            });
            return;
        }
        if run_params.is_empty() {
            context.broadcast(&ServerMsg::Error {
                message: "no hot fractions requested".into(),
            });
            return;
        }
        // Validation failures surface here, before any sweep begins.
        for params in &run_params {
            if let Err(e) = params.validate() {
                context.broadcast(&ServerMsg::Error {
                    message: e.to_string(),
                });
                return;
            }
        }

        let session = Arc::new(BatchSession::new(run_params, frame_every));
        session.set_state(BatchState::Running);
        context.batch = Some(session.clone());
        context.broadcast(&ServerMsg::BatchStarted {
            message: "Starting simulations".into(),
            num_runs: session.run_params.len(),
        });
        session
    };

    println!(
        "[{}] batch {}: {} runs, grid {}x{}, tol {:e}",
        session.started_at,
        session.id.as_simple(),
        session.run_params.len(),
        grid_size,
        grid_size,
        tolerance,
    );

    spawn_progress_broadcaster(context_ref.clone(), session.clone());

    let handles: Vec<JoinHandle<anyhow::Result<()>>> = (0..session.run_params.len())
        .map(|index| tokio::spawn(run_task(session.clone(), index)))
        .collect();

    tokio::spawn(supervise(context_ref, session, handles));
}

/// Solve one run to termination, yielding every [`YIELD_EVERY`] sweeps and
/// publishing progress/snapshots at the frame cadence.
async fn run_task(session: Arc<BatchSession>, index: usize) -> anyhow::Result<()> {
    let params = session.run_params[index].clone();
    let frame_every = session.frame_every.max(1);
    let mut run = Run::new(params)?;

    loop {
        let outcome = run.step();
        let sweep = run.sweep_count();

        if sweep % YIELD_EVERY == 0 {
            if session.is_cancelled() {
                bail!("run {index} aborted");
            }
            tokio::task::yield_now().await;
        }

        match outcome {
            StepOutcome::Running => {
                if sweep % frame_every == 0 {
                    run.capture_snapshot();
                    session.set_progress(index, run.progress()).await;
                }
                if sweep % 500 == 0 {
                    println!(
                        "run {index}: sweep {sweep}, delta {:.2e}, progress {}%",
                        run.last_delta(),
                        run.progress()
                    );
                }
            }
            StepOutcome::Finished(_) => {
                run.capture_snapshot();
                session.set_progress(index, run.progress()).await;
                break;
            }
        }
    }

    println!(
        "run {index}: finished after {} sweeps, delta {:.2e}, {} frames",
        run.sweep_count(),
        run.last_delta(),
        run.snapshots().len()
    );
    session.store_result(index, run).await;
    Ok(())
}

/// Await every run task. One fault cancels the rest, discards partial
/// results and emits a single batch-level error; otherwise the batch is
/// reconciled and the completion event broadcast.
async fn supervise(
    context_ref: SimContextRef,
    session: Arc<BatchSession>,
    handles: Vec<JoinHandle<anyhow::Result<()>>>,
) {
    let mut failure: Option<String> = None;
    for handle in handles {
        let fault = match handle.await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("run failed: {e}")),
            Err(e) => Some(format!("run task panicked: {e}")),
        };
        if let Some(fault) = fault {
            session.cancel();
            failure.get_or_insert(fault);
        }
    }

    if let Some(message) = failure {
        session.set_state(BatchState::Failed);
        eprintln!(
            "[{}] batch {} aborted: {message}",
            Utc::now(),
            session.id.as_simple()
        );
        let context = context_ref.read().await;
        context.broadcast(&ServerMsg::Error {
            message: format!("batch aborted: {message}"),
        });
        return;
    }

    let Some(mut runs) = session.take_results().await else {
        session.set_state(BatchState::Failed);
        let context = context_ref.read().await;
        context.broadcast(&ServerMsg::Error {
            message: "batch aborted: missing run results".into(),
        });
        return;
    };

    reconcile(&mut runs);
    let results: Vec<RunReport> = runs.iter().map(run_report).collect();

    session.set_state(BatchState::Completed);
    println!(
        "[{}] batch {} complete: {} runs, {} frames each",
        Utc::now(),
        session.id.as_simple(),
        results.len(),
        results.first().map(|r| r.frames.len()).unwrap_or(0)
    );

    let context = context_ref.read().await;
    context.broadcast(&ServerMsg::BatchComplete {
        message: "All simulations completed".into(),
        results,
    });
}

/// Read the whole progress vector on a fixed wall-clock interval and push
/// it to every frontend until the session leaves the running state.
fn spawn_progress_broadcaster(context_ref: SimContextRef, session: Arc<BatchSession>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(PROGRESS_BROADCAST_MS));
        loop {
            interval.tick().await;
            let progress = session.progress_snapshot().await;
            {
                let context = context_ref.read().await;
                context.broadcast(&ServerMsg::Progress { progress });
            }
            if !session.is_running() {
                break;
            }
        }
    });
}

fn run_report(run: &Run) -> RunReport {
    let (sweeps, deltas) = run.history().iter().copied().unzip();
    RunReport {
        hot_fraction: run.params().hot_fraction,
        final_sweeps: run.sweep_count(),
        final_delta: run.last_delta(),
        converged: run.converged(),
        convergence_history: ConvergenceHistory { sweeps, deltas },
        frames: run
            .snapshots()
            .iter()
            .map(|snapshot| Frame {
                sweep: snapshot.sweep,
                delta: snapshot.delta,
                nx: run.params().nx,
                ny: run.params().ny,
                values: snapshot.values.iter().map(|v| *v as f32).collect(),
            })
            .collect(),
        frame_duration_ms: FRAME_DURATION_MS,
    }
}
