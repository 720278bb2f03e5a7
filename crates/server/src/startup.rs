use std::{
    future::{Future, IntoFuture},
    net::SocketAddr,
    sync::Arc,
    time::Duration,
};

use axum::Router;
use configs::AppConfig;
use service::EntityStore;
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn build_app(store: Arc<EntityStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Public entry: load the store, serve until a termination signal, then
/// write every sequence back to disk.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    let store = EntityStore::load(&cfg.storage).await;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server is running on http://{}", addr);

    serve(listener, store, shutdown_signal(), cfg.server.shutdown_grace()).await
}

/// Serve on `listener` until `shutdown` resolves, give in-flight requests
/// up to `grace` to finish, then flush the store once. The flush runs whether
/// or not the drain completed. Flush failures are logged and do not turn
/// into an error.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<EntityStore>,
    shutdown: F,
    grace: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(Arc::clone(&store));
    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = drain_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        res = &mut server => res?,
        _ = shutdown => {
            let _ = drain_tx.send(());
            match tokio::time::timeout(grace, &mut server).await {
                Ok(res) => res?,
                Err(_) => warn!(
                    event = "drain_timeout",
                    grace_ms = grace.as_millis() as u64,
                    "in-flight requests still open after grace period; flushing anyway"
                ),
            }
        }
    }

    let failed = store.flush().await;
    if failed > 0 {
        warn!(failed, "shutdown flush incomplete");
    } else {
        info!(event = "stop", "data saved, server stopped");
    }
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "termination signal received, shutting down");
}
