mod middleware;
mod public;

pub use public::{HttpState, build_router};

use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{info, warn};

use crate::application::error::AppError;

/// Serve `router` on `addr` until Ctrl-C. In-flight requests get
/// `graceful_shutdown` to finish before the server is dropped.
pub async fn serve(
    addr: SocketAddr,
    router: Router,
    graceful_shutdown: Duration,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::unexpected(format!("failed to bind {addr}: {err}")))?;

    info!(target = "folio::http", %addr, "listening");

    let stopping = Arc::new(Notify::new());
    let signal_stopping = Arc::clone(&stopping);
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            signal_stopping.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        _ = async {
            stopping.notified().await;
            tokio::time::sleep(graceful_shutdown).await;
        } => {
            warn!(
                target = "folio::http",
                timeout_secs = graceful_shutdown.as_secs(),
                "graceful shutdown timed out; dropping open connections"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(target = "folio::http", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target = "folio::http", "shutdown signal received");
}
