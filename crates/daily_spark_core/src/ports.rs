//! crates/daily_spark_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete data store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Assignment, Quote};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the external data store.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Port (Trait)
//=========================================================================================

/// The persistence contract for quotes, sessions and daily assignments.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Make sure a session row exists for `session_id`. Idempotent; a lost
    /// race with a concurrent insert must not be reported as an error.
    async fn ensure_session(&self, session_id: &str) -> PortResult<()>;

    /// The most recent assignment for `session_id` that is still valid at
    /// `now` (latest `shown_at` wins), joined to its quote content.
    async fn find_active_assignment(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> PortResult<Option<(Quote, DateTime<Utc>)>>;

    /// Up to `limit` quote ids most recently shown to `session_id`,
    /// ordered by `shown_at` descending.
    async fn recent_quote_ids(&self, session_id: &str, limit: i64) -> PortResult<Vec<Uuid>>;

    /// The full universe of quote ids.
    async fn all_quote_ids(&self) -> PortResult<Vec<Uuid>>;

    /// Full content for a single quote.
    async fn get_quote(&self, quote_id: Uuid) -> PortResult<Quote>;

    /// Persist a new assignment. Prior rows are never touched.
    async fn insert_assignment(&self, assignment: &Assignment) -> PortResult<()>;
}
