use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::logs::ServerLog;

#[cfg(unix)]
const BACKLOG: u32 = libc::SOMAXCONN as u32;
#[cfg(not(unix))]
const BACKLOG: u32 = 1024;

/// Binds on all interfaces on the configured port and serves forever.
pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cfg.server.port));
    let listener = bind(addr)?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Creates the listening socket with the largest backlog the system allows.
pub fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .context("can't create server socket")?;

    socket
        .set_reuseaddr(true)
        .context("can't configure server socket")?;
    socket
        .bind(addr)
        .with_context(|| format!("can't bind server socket to {addr}"))?;

    socket
        .listen(BACKLOG)
        .context("can't listen on server socket")
}

/// Accept loop. Each connection runs in its own task; at most
/// `server.max_connections` of them at once.
///
/// Returns only when accepting fails.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    let log = ServerLog::new(&cfg.logging.dir);
    let limit = Arc::new(Semaphore::new(cfg.server.max_connections));

    loop {
        let permit = Arc::clone(&limit)
            .acquire_owned()
            .await
            .context("connection limiter closed")?;

        let (socket, peer) = listener
            .accept()
            .await
            .context("can't accept client connection")?;
        info!("Accepted connection from {}", peer);

        let conn = Connection::new(socket, Arc::clone(&cfg), log.clone());
        tokio::spawn(async move {
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
            drop(permit);
        });
    }
}
