// src/server/mod.rs

//! The network rim: a TCP accept loop handing each connection to a framed
//! RESP session against the shared keyspace.

mod connection;

use crate::config::Config;
use crate::core::state::ServerState;
use crate::core::storage::db::Db;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// The main server startup function: binds the listener and serves
/// connections until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    let state = ServerState::new(config);
    let db = Arc::new(Db::new());

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let state = state.clone();
                let db = db.clone();
                tokio::spawn(async move {
                    if let Err(e) = connection::handle(stream, peer, state, db).await {
                        error!("connection {peer} ended with error: {e}");
                    }
                });
            }
            Err(e) => error!("failed to accept connection: {e}"),
        }
    }
}
