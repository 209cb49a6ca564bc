//! Websocket server streaming concurrent plate solves to connected
//! frontends.

use std::convert::Infallible;

use warp::{reject::Rejection, Filter, Reply};

pub mod batch;
pub mod context;
pub mod handler;
pub mod ws;

use context::SimContextRef;

pub type Result<T> = std::result::Result<T, Rejection>;

pub const PORT: u16 = 5000;

pub fn routes(
    context_ref: SimContextRef,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path("health").and_then(handler::health_handler);
    let ws_route = warp::path("ws")
        .and(warp::ws())
        .and(with_context(context_ref))
        .and_then(handler::ws_handler);

    health
        .or(ws_route)
        .with(warp::cors().allow_any_origin())
}

fn with_context(
    context_ref: SimContextRef,
) -> impl Filter<Extract = (SimContextRef,), Error = Infallible> + Clone {
    warp::any().map(move || context_ref.clone())
}
