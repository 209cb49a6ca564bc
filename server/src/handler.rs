use crate::{context::SimContextRef, ws, Result};
use warp::Reply;

pub async fn ws_handler(ws: warp::ws::Ws, context_ref: SimContextRef) -> Result<impl Reply> {
    Ok(ws.on_upgrade(move |socket| ws::frontend_connection_process(socket, context_ref)))
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy"
    })))
}
