use serde::{Deserialize, Serialize};

/// Messages sent from a frontend to the simulation server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMsg {
    /// Kick off a batch of concurrent runs, one per hot fraction
    #[serde(rename = "start_simulation")]
    StartBatch {
        #[serde(default = "default_hot_fractions")]
        hot_fractions: Vec<f64>,
        #[serde(default = "default_grid_size")]
        grid_size: usize,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
        #[serde(default = "default_max_sweeps")]
        max_sweeps: u32,
        /// Capture a frame every N sweeps
        #[serde(default = "default_frame_every")]
        frame_every: u32,
    },
}

fn default_hot_fractions() -> Vec<f64> {
    vec![0.1, 0.2, 0.33]
}

fn default_grid_size() -> usize {
    51
}

fn default_tolerance() -> f64 {
    1e-3
}

fn default_max_sweeps() -> u32 {
    15_000
}

fn default_frame_every() -> u32 {
    100
}
