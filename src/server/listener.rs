use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionSettings};
use crate::http::router::Router;
use crate::storage::{DiskStorage, Storage};

/// Pause after a failed accept so a persistent error does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn run<F>(cfg: &Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!(
        addr = %cfg.server.listen_addr,
        directory = %cfg.server.directory.display(),
        "Listening"
    );

    let router = Router::new(DiskStorage::new(&cfg.server.directory));
    serve(
        listener,
        router,
        cfg.server.connection_settings(),
        cfg.server.shutdown_grace(),
        shutdown,
    )
    .await
}

/// Accept loop. Every connection runs in its own task; a failing connection
/// is logged and dropped without affecting the others.
///
/// Once `shutdown` resolves no new connections are accepted, and in-flight
/// ones get `grace` to finish before they are aborted.
pub async fn serve<S, F>(
    listener: TcpListener,
    router: Router<S>,
    settings: ConnectionSettings,
    grace: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    S: Storage,
    F: Future<Output = ()>,
{
    let mut tasks = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }

            accepted = listener.accept() => match accepted {
                Ok((socket, peer)) => {
                    info!(peer = %peer, "Accepted connection");

                    let conn = Connection::new(socket, router.clone(), settings);
                    let span = tracing::info_span!("connection", peer = %peer);
                    tasks.spawn(
                        async move {
                            if let Err(e) = conn.run().await {
                                tracing::error!("Connection error: {:#}", e);
                            }
                        }
                        .instrument(span),
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            },

            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!(error = %e, "Connection task failed");
                }
            }
        }
    }

    let drain = async {
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Connection task failed");
            }
        }
    };

    if tokio::time::timeout(grace, drain).await.is_err() {
        tracing::warn!(remaining = tasks.len(), "Aborting connections still in flight");
        tasks.abort_all();
    }

    Ok(())
}
