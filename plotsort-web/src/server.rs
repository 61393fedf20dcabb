//! HTTP server setup
//!
//! Binds the listening socket with address reuse so a restarted server can
//! take the port back immediately, then serves the router until Ctrl+C or
//! SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use plotsort_common::Config;
use tokio::net::{TcpListener, TcpSocket};
use tokio::signal;
use tracing::info;

use crate::{build_router, AppState};

/// Pending connection backlog
const LISTEN_BACKLOG: u32 = 1024;

/// Bind a listener with `SO_REUSEADDR` set
pub fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(LISTEN_BACKLOG)
}

/// Run the HTTP server
///
/// Ensures the selections directory exists before accepting requests.
pub async fn run(config: Config, addr: SocketAddr) -> Result<()> {
    let store = config.selection_store();
    store.ensure_dir().with_context(|| {
        format!(
            "Failed to create selections directory {}",
            store.dir().display()
        )
    })?;

    info!("Image root: {}", config.image_root.display());
    info!("Pattern: {}", config.pattern);
    info!("Selections: {}", store.dir().display());

    let app = build_router(AppState::new(config));

    let listener = bind_listener(addr).with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Serving at http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rebind_same_port_immediately() {
        let first = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        // Accept one connection so the port has lingering state
        let client = tokio::net::TcpStream::connect(addr).await.unwrap();
        let (server_side, _) = first.accept().await.unwrap();
        drop(server_side);
        drop(client);
        drop(first);

        let second = bind_listener(addr).unwrap();
        assert_eq!(second.local_addr().unwrap(), addr);
    }
}
