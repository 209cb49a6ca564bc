use std::sync::Arc;

use server::{context::SimContext, routes, PORT};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() {
    let context_ref = Arc::new(RwLock::new(SimContext::new()));
    let routes = routes(context_ref);

    println!("Starting heat simulation server");
    println!("   Local:   http://127.0.0.1:{}", PORT);
    if let Ok(local_ip) = local_ip_address::local_ip() {
        println!("   Network: http://{}:{}", local_ip, PORT);
    }
    println!("   Websocket endpoint: /ws");

    warp::serve(routes).run(([0, 0, 0, 0], PORT)).await;
}
