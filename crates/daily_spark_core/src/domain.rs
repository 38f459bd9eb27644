//! crates/daily_spark_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// How many of a session's most recent assignments are excluded when
/// picking the next quote.
pub const RECENT_WINDOW: i64 = 50;

/// How long an assignment stays valid: a rolling 24-hour window from the
/// moment it was issued, not a midnight-aligned calendar day.
pub fn validity_window() -> Duration {
    Duration::hours(24)
}

/// A motivational quote. Seed data; never mutated or deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: Uuid,
    pub text: String,
    pub author: Option<String>,
}

/// An unauthenticated usage context, identified by an opaque
/// client-generated token.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
}

/// One issuance of a quote to a session. Rows are never updated; an expired
/// assignment is superseded by inserting a newer one.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub session_id: String,
    pub quote_id: Uuid,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The result handed back to callers: the quote of the day, when it stops
/// being valid, and whether this request minted it.
#[derive(Debug, Clone)]
pub struct DailyQuote {
    pub quote: Quote,
    pub expires_at: DateTime<Utc>,
    pub is_new: bool,
}
