//! TCP accept loop and per-connection line pump

use anyhow::Result;
use bytes::BytesMut;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

use recache::Cache;

use crate::handler::CommandHandler;
use crate::protocol;

/// Accept connections forever, serving each one on its own task.
///
/// Accept errors are logged and the loop keeps going; only process shutdown
/// stops it (the caller races this future against a signal handler).
pub async fn serve(listener: TcpListener, cache: Arc<Cache>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let cache = Arc::clone(&cache);

                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, cache).await {
                        error!("Error handling client {}: {}", addr, e);
                    }
                    info!("Connection closed: {}", addr);
                });
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
            }
        }
    }
}

/// Read lines from one client until it hangs up, answering each in turn.
///
/// A malformed command produces an error reply and the loop continues; only
/// a transport error or the peer closing the stream ends it.
async fn handle_client(mut stream: TcpStream, cache: Arc<Cache>) -> Result<()> {
    let handler = CommandHandler::new(cache);
    let mut buffer = BytesMut::with_capacity(4096);

    loop {
        let n = stream.read_buf(&mut buffer).await?;

        if n == 0 {
            // Connection closed; a trailing partial line is discarded.
            return Ok(());
        }

        while let Some(line) = protocol::next_line(&mut buffer) {
            let reply = handler.handle(&line);
            stream.write_all(&reply.serialize()).await?;
        }
    }
}
