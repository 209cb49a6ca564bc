use serde::{Deserialize, Serialize};

/// Messages pushed from the simulation server to connected frontends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMsg {
    /// Greeting sent once per connection
    #[serde(rename = "connected")]
    Connected { message: String },

    /// Acknowledgment that a batch was accepted and its runs spawned
    #[serde(rename = "simulation_started")]
    BatchStarted { message: String, num_runs: usize },

    /// Periodic progress vector, one 0..=100 entry per run in batch order
    #[serde(rename = "simulation_progress")]
    Progress { progress: Vec<u8> },

    /// Terminal event carrying every run's reconciled results
    #[serde(rename = "all_simulations_complete")]
    BatchComplete {
        message: String,
        results: Vec<RunReport>,
    },

    /// A batch-level failure; the batch is aborted and partial results
    /// discarded
    #[serde(rename = "error")]
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub hot_fraction: f64,
    pub final_sweeps: u32,
    pub final_delta: f64,
    pub converged: bool,
    pub convergence_history: ConvergenceHistory,
    /// Snapshot sequence, padded to the batch-wide length
    pub frames: Vec<Frame>,
    /// Uniform display duration per frame, identical for every run
    pub frame_duration_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    pub sweeps: Vec<u32>,
    pub deltas: Vec<f64>,
}

/// One captured field state; `values` is row-major, x fastest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub sweep: u32,
    pub delta: f64,
    pub nx: usize,
    pub ny: usize,
    pub values: Vec<f32>,
}
