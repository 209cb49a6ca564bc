use std::{collections::HashMap, sync::Arc};

use msgs::ServerMsg;
use tokio::sync::{mpsc, RwLock};
use warp::filters::ws::Message;

use crate::batch::BatchSession;

/// Shared server state: one sender per connected frontend plus the current
/// batch session, if any.
pub struct SimContext {
    pub to_frontend_senders:
        HashMap<String, mpsc::UnboundedSender<std::result::Result<Message, warp::Error>>>,
    pub batch: Option<Arc<BatchSession>>,
}

pub type SimContextRef = Arc<RwLock<SimContext>>;

impl SimContext {
    pub fn new() -> SimContext {
        SimContext {
            to_frontend_senders: HashMap::new(),
            batch: None,
        }
    }

    /// Push an event to every connected frontend.
    pub fn broadcast(&self, msg: &ServerMsg) {
        let json = match serde_json::to_string(msg) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error serializing server msg: {e}");
                return;
            }
        };
        for (_id, to_frontend_sender) in self.to_frontend_senders.iter() {
            let _ = to_frontend_sender.send(Ok(Message::text(json.clone())));
        }
    }

    /// Send an event to a single frontend, by connection id.
    pub fn send_to(&self, id: &str, msg: &ServerMsg) {
        let Some(sender) = self.to_frontend_senders.get(id) else {
            return;
        };
        if let Ok(json) = serde_json::to_string(msg) {
            let _ = sender.send(Ok(Message::text(json)));
        }
    }

    pub fn batch_running(&self) -> bool {
        matches!(&self.batch, Some(session) if session.is_running())
    }
}

impl Default for SimContext {
    fn default() -> SimContext {
        SimContext::new()
    }
}
