//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `QuoteStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_spark_core::domain::{Assignment, Quote};
use daily_spark_core::ports::{PortError, PortResult, QuoteStore};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `QuoteStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct QuoteRecord {
    id: Uuid,
    text: String,
    author: Option<String>,
}
impl QuoteRecord {
    fn to_domain(self) -> Quote {
        Quote {
            id: self.id,
            text: self.text,
            author: self.author,
        }
    }
}

#[derive(FromRow)]
struct ActiveAssignmentRecord {
    id: Uuid,
    text: String,
    author: Option<String>,
    expires_at: DateTime<Utc>,
}
impl ActiveAssignmentRecord {
    fn to_domain(self) -> (Quote, DateTime<Utc>) {
        (
            Quote {
                id: self.id,
                text: self.text,
                author: self.author,
            },
            self.expires_at,
        )
    }
}

//=========================================================================================
// `QuoteStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuoteStore for DbAdapter {
    async fn ensure_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO user_sessions (session_id) VALUES ($1) ON CONFLICT (session_id) DO NOTHING",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn find_active_assignment(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> PortResult<Option<(Quote, DateTime<Utc>)>> {
        let record = sqlx::query_as::<_, ActiveAssignmentRecord>(
            "SELECT q.id, q.text, q.author, d.expires_at \
             FROM daily_quotes d \
             JOIN quotes q ON q.id = d.quote_id \
             WHERE d.session_id = $1 AND d.expires_at >= $2 \
             ORDER BY d.shown_at DESC \
             LIMIT 1",
        )
        .bind(session_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(|r| r.to_domain()))
    }

    async fn recent_quote_ids(&self, session_id: &str, limit: i64) -> PortResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT quote_id FROM daily_quotes \
             WHERE session_id = $1 \
             ORDER BY shown_at DESC \
             LIMIT $2",
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn all_quote_ids(&self) -> PortResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM quotes")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn get_quote(&self, quote_id: Uuid) -> PortResult<Quote> {
        let record =
            sqlx::query_as::<_, QuoteRecord>("SELECT id, text, author FROM quotes WHERE id = $1")
                .bind(quote_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| match e {
                    sqlx::Error::RowNotFound => {
                        PortError::NotFound(format!("Quote {} not found", quote_id))
                    }
                    _ => PortError::Unexpected(e.to_string()),
                })?;
        Ok(record.to_domain())
    }

    async fn insert_assignment(&self, assignment: &Assignment) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO daily_quotes (session_id, quote_id, shown_at, expires_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&assignment.session_id)
        .bind(assignment.quote_id)
        .bind(assignment.shown_at)
        .bind(assignment.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}
