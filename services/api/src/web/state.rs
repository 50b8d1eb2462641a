//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use courseware_core::ports::{CatalogStore, ObjectStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub blobs: Arc<dyn ObjectStore>,
    pub config: Arc<Config>,
}
