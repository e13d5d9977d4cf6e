// src/server/connection.rs

use crate::core::commands::Command;
use crate::core::protocol::{RespFrame, RespFrameCodec};
use crate::core::state::ServerState;
use crate::core::storage::db::Db;
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::debug;

/// Runs one client session: decode a frame, parse and execute the command
/// under the keyspace lock, write the reply.
pub async fn handle(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<ServerState>,
    db: Arc<Db>,
) -> Result<()> {
    debug!("accepted connection from {peer}");
    let mut framed = Framed::new(stream, RespFrameCodec);

    while let Some(frame) = framed.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                // A malformed frame poisons the stream; report and hang up.
                let _ = framed
                    .send(RespFrame::Error(e.to_wire_message()))
                    .await;
                break;
            }
        };

        let reply = match Command::from_frame(frame) {
            Ok(command) => match db.execute(state.clone(), &command).await {
                Ok((value, _outcome)) => value.into(),
                Err(e) => RespFrame::Error(e.to_wire_message()),
            },
            Err(e) => RespFrame::Error(e.to_wire_message()),
        };
        framed.send(reply).await?;
    }

    debug!("connection from {peer} closed");
    Ok(())
}
