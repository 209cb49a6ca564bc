use anyhow::Context;
use futures::{FutureExt, StreamExt};
use msgs::{ClientMsg, ServerMsg};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::{batch, context::SimContextRef};

pub async fn frontend_connection_process(ws: WebSocket, context_ref: SimContextRef) {
    let (frontend_ws_sender, mut frontend_ws_rcv) = ws.split();
    let (to_frontend, frontend_rcv) = mpsc::unbounded_channel();

    let frontend_rcv_stream = UnboundedReceiverStream::new(frontend_rcv);
    tokio::task::spawn(frontend_rcv_stream.forward(frontend_ws_sender).map(|result| {
        if let Err(e) = result {
            eprintln!("error sending websocket msg: {}", e);
        }
    }));

    let id = Uuid::new_v4().as_simple().to_string();
    context_ref
        .write()
        .await
        .to_frontend_senders
        .insert(id.clone(), to_frontend.clone());

    println!("{} connected", id);

    let greeting = ServerMsg::Connected {
        message: "Connected to simulation server".into(),
    };
    if let Ok(json) = serde_json::to_string(&greeting) {
        let _ = to_frontend.send(Ok(Message::text(json)));
    }

    while let Some(result) = frontend_ws_rcv.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                eprintln!("error receiving ws message for id {}: {}", id, e);
                break;
            }
        };
        if let Err(e) = client_msg(msg, &context_ref).await {
            println!("error: {e}");
            let context = context_ref.read().await;
            context.send_to(
                &id,
                &ServerMsg::Error {
                    message: e.to_string(),
                },
            );
        }
    }

    context_ref.write().await.to_frontend_senders.remove(&id);
    println!("{} disconnected", id);
}

async fn client_msg(msg: Message, context_ref: &SimContextRef) -> anyhow::Result<()> {
    // Pings, pongs and close frames are handled by warp.
    let Ok(text) = msg.to_str() else {
        return Ok(());
    };

    let client_msg =
        serde_json::from_str::<ClientMsg>(text.trim()).context("could not parse client message")?;

    match client_msg {
        ClientMsg::StartBatch {
            hot_fractions,
            grid_size,
            tolerance,
            max_sweeps,
            frame_every,
        } => {
            batch::start_batch(
                context_ref.clone(),
                hot_fractions,
                grid_size,
                tolerance,
                max_sweeps,
                frame_every,
            )
            .await;
        }
    }

    Ok(())
}
