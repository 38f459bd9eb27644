//! crates/daily_spark_core/src/service.rs
//!
//! The request orchestrator: ensure the session exists, return a still-valid
//! assignment if there is one, otherwise select a fresh quote and persist the
//! new assignment. Transport-agnostic; the HTTP layer maps `ServiceError`
//! onto status codes.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::domain::{validity_window, Assignment, DailyQuote, RECENT_WINDOW};
use crate::ports::{PortError, QuoteStore};
use crate::selection::choose_quote_id;

/// Errors the orchestrator can surface to its caller.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("sessionId is required")]
    MissingSessionId,
    #[error("No quotes available")]
    NoQuotesAvailable,
    #[error(transparent)]
    Store(#[from] PortError),
}

/// Stateless per-request service over a shared [`QuoteStore`].
#[derive(Clone)]
pub struct DailyQuoteService {
    store: Arc<dyn QuoteStore>,
}

impl DailyQuoteService {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    /// Resolve the daily quote for `session_id` as of `now`.
    ///
    /// A valid assignment is returned as-is with `is_new = false`. Otherwise
    /// a quote is chosen avoiding the session's last [`RECENT_WINDOW`]
    /// assignments, stored with a fresh 24-hour validity window, and
    /// returned with `is_new = true`.
    pub async fn get_daily_quote(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<DailyQuote, ServiceError> {
        if session_id.trim().is_empty() {
            return Err(ServiceError::MissingSessionId);
        }

        // Session creation losing a race with a concurrent request is
        // harmless: the read path below filters on the id either way.
        if let Err(e) = self.store.ensure_session(session_id).await {
            warn!(session_id, error = %e, "could not ensure session record; continuing");
        }

        if let Some((quote, expires_at)) =
            self.store.find_active_assignment(session_id, now).await?
        {
            return Ok(DailyQuote {
                quote,
                expires_at,
                is_new: false,
            });
        }

        let recent = self.store.recent_quote_ids(session_id, RECENT_WINDOW).await?;
        let universe = self.store.all_quote_ids().await?;

        let chosen = choose_quote_id(&universe, &recent, &mut rand::rng())
            .ok_or(ServiceError::NoQuotesAvailable)?;
        let quote = self.store.get_quote(chosen).await?;

        let expires_at = now + validity_window();
        let assignment = Assignment {
            session_id: session_id.to_owned(),
            quote_id: quote.id,
            shown_at: now,
            expires_at,
        };
        self.store.insert_assignment(&assignment).await?;

        Ok(DailyQuote {
            quote,
            expires_at,
            is_new: true,
        })
    }
}
