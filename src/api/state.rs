//! Application state for the Severance Settlement Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, StatutoryConfig};

/// Shared application state.
///
/// Holds the statutory configuration, loaded once and read by every
/// request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        self.config.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_config() {
        let state = AppState::new(ConfigLoader::load("./config/clt-2025").unwrap());
        let clone = state.clone();
        assert!(std::ptr::eq(state.config(), clone.config()));
    }
}
