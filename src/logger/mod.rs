//! Logger module
//!
//! Logging facade for the proxy:
//! - server lifecycle
//! - request entry/completion and access log lines
//! - store session events
//! - warnings and errors
//!
//! Before `init()` runs (and in tests) messages go straight to stdout/stderr.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::store::{Endpoint, StoreError};
use hyper::{Method, StatusCode, Uri};
use std::net::SocketAddr;

/// Lifecycle notification emitted by the store session
pub enum StoreEvent<'a> {
    Connected(&'a Endpoint),
    Ready,
    Disconnected,
    Error(&'a StoreError),
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("pagekv started");
    write_info(&format!("Listening on: http://{addr}"));
    match &config.redis.url {
        Some(_) => write_info("Store: redis (url)"),
        None => write_info("Store: redis"),
    }
    write_info(&format!(
        "Store reconnect interval: {:?}",
        config.redis.socket.reconnect_interval
    ));
    write_info(&format!("Access log format: {}", config.logging.access_log_format));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_shutdown() {
    write_info("[INFO] Shutdown requested, no longer accepting connections");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_request_start(method: &Method, uri: &Uri) {
    write_info(&format!("[INFO] {method} {uri} - Incoming request processing..."));
}

pub fn log_request_done(method: &Method, uri: &Uri, status: StatusCode) {
    write_info(&format!(
        "[INFO] {method} {uri} - Incoming request processed with status code {}",
        status.as_u16()
    ));
}

pub fn log_store_command(command: &str, key: &str) {
    write_info(&format!("[INFO] {command} key \"{key}\""));
}

pub fn log_store_event(event: &StoreEvent<'_>) {
    match event {
        StoreEvent::Connected(endpoint) => {
            write_info(&format!("[INFO] Store: Connected to {endpoint}"));
        }
        StoreEvent::Ready => write_info("[INFO] Store: Ready"),
        StoreEvent::Disconnected => write_info("[INFO] Store: Disconnected"),
        StoreEvent::Error(err) => write_error(&format!("[ERROR] Store: {err}")),
    }
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
