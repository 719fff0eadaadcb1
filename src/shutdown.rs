use actix_web::dev::ServerHandle;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Handles graceful shutdown of the proxy
///
/// Waits for SIGTERM or SIGINT/CTRL+C, then stops the HTTP server from
/// accepting new connections and lets in-flight searches finish.
pub struct ShutdownCoordinator {
    server_handle: ServerHandle,
    server_task: JoinHandle<Result<(), std::io::Error>>,
}

impl ShutdownCoordinator {
    pub fn new(
        server_handle: ServerHandle,
        server_task: JoinHandle<Result<(), std::io::Error>>,
    ) -> Self {
        Self {
            server_handle,
            server_task,
        }
    }

    /// Block until a shutdown signal arrives, then shut down
    pub async fn wait_for_shutdown(self) -> Result<(), std::io::Error> {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        #[cfg(unix)]
        let terminate = terminate.recv();

        #[cfg(not(unix))]
        let terminate = std::future::pending::<Option<()>>();

        tokio::select! {
            result = ctrl_c => {
                result?;
                info!("Received CTRL+C signal, initiating graceful shutdown...");
            }
            _ = terminate => {
                info!("Received SIGTERM signal, initiating graceful shutdown...");
            }
        }

        self.shutdown().await
    }

    async fn shutdown(self) -> Result<(), std::io::Error> {
        info!("Stopping HTTP server (no longer accepting new requests)...");
        self.server_handle.stop(true).await;

        match self.server_task.await {
            Ok(Ok(())) => info!("HTTP server shut down successfully"),
            Ok(Err(e)) => {
                error!("HTTP server encountered error during shutdown: {:?}", e);
                return Err(e);
            }
            Err(e) => error!("HTTP server task panicked: {:?}", e),
        }

        info!("Graceful shutdown completed");
        Ok(())
    }
}
