// Signal handling module
//
// - SIGTERM: stop accepting connections and exit
// - SIGINT:  same (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn a local task that notifies `shutdown` on SIGTERM or SIGINT.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::task::spawn_local(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    logger::log_warning(&format!("Failed to register signal handlers: {e}"));
                    return;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => logger::log_warning("SIGTERM received"),
            _ = sigint.recv() => logger::log_warning("SIGINT received"),
        }
        shutdown.notify_one();
    });
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::task::spawn_local(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_warning("Ctrl+C received");
                shutdown.notify_one();
            }
            Err(e) => logger::log_warning(&format!("Failed to register Ctrl+C handler: {e}")),
        }
    });
}
