//! Application state shared across handlers.

use crate::catalog::Catalog;
use crate::config::Config;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Catalog service.
    pub catalog: Catalog,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}
