//! Request handler module
//!
//! Method dispatch, store-readiness gating and the page handlers that
//! translate HTTP verbs into store commands.

pub mod pages;
pub mod router;

pub use router::handle_request;

use crate::http::BoxError;
use crate::store::StoreError;
use thiserror::Error;

/// Failure inside a page handler; always answered with 500
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to read request body: {0}")]
    Body(#[source] BoxError),
    #[error("handler panicked: {0}")]
    Panicked(String),
}
