//! Connection acceptor.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use tokio::{net::TcpListener, sync::Semaphore};

use crate::usecase::ChatHub;

use super::{config::ServerConfig, error::ServerError, session::run_session, signal::shutdown_signal};

const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::bind(ServerConfig::default()).await?;
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    hub: Arc<ChatHub>,
    listener: TcpListener,
}

impl Server {
    /// Bind the listening socket with a fresh `ChatHub`
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let hub = Arc::new(ChatHub::new(config.history_capacity));
        Self::bind_with_hub(config, hub).await
    }

    /// Bind the listening socket around an existing `ChatHub`
    pub async fn bind_with_hub(config: ServerConfig, hub: Arc<ChatHub>) -> Result<Self, ServerError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        Ok(Self {
            config,
            hub,
            listener,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddr)
    }

    pub fn hub(&self) -> Arc<ChatHub> {
        self.hub.clone()
    }

    /// Run until Ctrl+C / SIGTERM
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Press Ctrl+C to shutdown");
        self.serve(shutdown_signal()).await
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Each connection runs in its own task. Sessions still running at shutdown
    /// are left alone; only the listener is closed.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        tracing::info!("Chat server listening on {}", self.local_addr()?);
        match self.config.max_connections {
            Some(limit) => tracing::info!("Accepting at most {} concurrent sessions", limit),
            None => tracing::info!("Accepting an unlimited number of concurrent sessions"),
        }

        let limiter = self
            .config
            .max_connections
            .map(|limit| Arc::new(Semaphore::new(limit.get())));
        tokio::pin!(shutdown);

        loop {
            // Wait for a free slot before accepting
            let permit = match &limiter {
                Some(limiter) => tokio::select! {
                    _ = &mut shutdown => break,
                    permit = limiter.clone().acquire_owned() => match permit {
                        Ok(permit) => Some(permit),
                        Err(_) => break,
                    },
                },
                None => None,
            };

            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::info!("Accepted connection from {}", peer);
                        let hub = self.hub.clone();
                        tokio::spawn(async move {
                            let report = run_session(stream, hub).await;
                            tracing::debug!(
                                "Session {} from {} closed ({:?})",
                                report.id,
                                peer,
                                report.reason
                            );
                            drop(permit);
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        drop(self.listener);
        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
