// Application state module
// Shared, read-only state handed to every connection task

use std::sync::Arc;

use super::types::Config;

/// Application state
///
/// The store session is injected rather than reached through a global, so a
/// test double can stand in for Redis.
pub struct AppState<S: ?Sized> {
    pub config: Config,
    pub store: Arc<S>,
}

impl<S: ?Sized> AppState<S> {
    pub const fn new(config: Config, store: Arc<S>) -> Self {
        Self { config, store }
    }
}
