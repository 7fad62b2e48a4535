//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use student_results_core::ports::{DatabaseService, ViewRenderer};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub views: Arc<dyn ViewRenderer>,
    pub config: Arc<Config>,
}
