use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

/// Exit status reported when the process cannot start
const BOOTSTRAP_FAILURE_EXIT_CODE: u8 = 99;

/// Fatal startup failure; anything after bootstrap is handled per request
#[derive(Debug, Error)]
enum BootstrapError {
    #[error("configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("{0}")]
    Address(String),
    #[error("store: {0}")]
    Store(#[from] store::StoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    match bootstrap() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_error(&format!("An error occurred during bootstrap: {err}"));
            ExitCode::from(BOOTSTRAP_FAILURE_EXIT_CODE)
        }
    }
}

fn bootstrap() -> Result<(), BootstrapError> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Single-threaded event loop: every connection is a local task
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(cfg))
}

async fn run(cfg: config::Config) -> Result<(), BootstrapError> {
    let addr = cfg.get_socket_addr().map_err(BootstrapError::Address)?;
    let listener = server::create_reusable_listener(addr)?;

    let store = store::RedisSession::start(&cfg.redis)?;
    logger::log_server_start(&addr, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    let state = Arc::new(config::AppState::new(cfg, store));
    server::start_server_loop(listener, state, shutdown).await;
    Ok(())
}
