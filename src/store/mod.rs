//! Store module
//!
//! The key-value store seen by the page handlers: a small async trait over
//! the four commands the proxy needs, plus the connectivity flags used to
//! gate requests before any command is sent.

mod session;

pub use session::{Endpoint, RedisSession};

use async_trait::async_trait;
use hyper::body::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Failure of a store session or of a single store command
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store session is not ready")]
    NotReady,
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("store connection: {0}")]
    Io(#[from] std::io::Error),
    #[error("store connection timed out after {0:?}")]
    Timeout(Duration),
    #[error("unsupported store address: {0}")]
    UnsupportedAddress(String),
}

/// Shared session to the key-value store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Transport-level connection is established
    fn is_open(&self) -> bool;
    /// Handshake is complete and commands are accepted
    fn is_ready(&self) -> bool;
    /// Number of keys among `[key]` that exist
    async fn exists(&self, key: &str) -> Result<i64, StoreError>;
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError>;
    async fn set(&self, key: &str, value: Bytes) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// A session is usable only when it is both open and ready.
pub fn is_store_ready<S: PageStore + ?Sized>(store: &S) -> bool {
    store.is_open() && store.is_ready()
}
