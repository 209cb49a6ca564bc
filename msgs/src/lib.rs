//! The websocket wire protocol between the simulation server and its
//! frontends. All messages are JSON objects tagged with a `type` field.

pub mod client_msg;
pub mod server_msg;

pub use client_msg::ClientMsg;
pub use server_msg::{ConvergenceHistory, Frame, RunReport, ServerMsg};
