//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::content::ContentStore;
use crate::health::HealthState;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, the content store for served
/// files, and the togglable health state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub content: Arc<ContentStore>,
    pub health: HealthState,
}

impl AppState {
    /// Creates a new application state with a fresh (healthy) health toggle.
    pub fn new(config: AppConfig, content: ContentStore) -> Self {
        Self {
            config: Arc::new(config),
            content: Arc::new(content),
            health: HealthState::new(),
        }
    }
}
