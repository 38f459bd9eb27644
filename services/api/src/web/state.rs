//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use daily_spark_core::service::DailyQuoteService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: DailyQuoteService,
    pub config: Arc<Config>,
}
