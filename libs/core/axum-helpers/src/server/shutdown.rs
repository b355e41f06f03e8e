use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Block until SIGINT (Ctrl+C) or, on unix, SIGTERM arrives.
async fn os_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}

/// Broadcasts shutdown to every interested task exactly once.
///
/// The server loop calls [`ShutdownCoordinator::wait_for_signal`]; cleanup
/// tasks hold a receiver from [`ShutdownCoordinator::subscribe`] and run
/// when it fires.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Returns the coordinator and an initial shutdown receiver.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        (
            Self {
                tx,
                initiated: Arc::new(AtomicBool::new(false)),
            },
            rx,
        )
    }

    /// A fresh receiver that fires when shutdown begins.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.initiated.load(Ordering::Relaxed)
    }

    /// Flip the shutdown flag and notify subscribers. Later calls are no-ops.
    pub fn shutdown(&self) {
        let first = self
            .initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if first {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Wait for an OS signal, then broadcast shutdown.
    pub async fn wait_for_signal(&self) {
        os_shutdown_signal().await;
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

/// Plain signal future for `axum::serve(...).with_graceful_shutdown(...)`.
///
/// No cleanup coordination; prefer `create_production_app` when
/// connections need closing on the way out.
pub async fn shutdown_signal() {
    os_shutdown_signal().await;
}

/// Shutdown future used by `create_production_app`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}
