//! services/api/src/web/rest.rs
//!
//! Contains the Axum handler for the REST API endpoint and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use daily_spark_core::domain::{DailyQuote, Quote};
use daily_spark_core::service::ServiceError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        daily_quote_handler,
    ),
    components(
        schemas(DailyQuoteRequest, DailyQuoteResponse, QuotePayload, ErrorResponse)
    ),
    tags(
        (name = "Daily Spark API", description = "API endpoint serving one motivational quote per session per 24 hours.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The request payload: the client's opaque session token.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuoteRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// A single quote as it appears on the wire.
#[derive(Serialize, ToSchema)]
pub struct QuotePayload {
    pub id: Uuid,
    pub text: String,
    pub author: Option<String>,
}

impl From<Quote> for QuotePayload {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            text: q.text,
            author: q.author,
        }
    }
}

/// The successful response: the session's quote of the day.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuoteResponse {
    pub quote: QuotePayload,
    pub expires_at: DateTime<Utc>,
    pub is_new: bool,
}

impl From<DailyQuote> for DailyQuoteResponse {
    fn from(d: DailyQuote) -> Self {
        Self {
            quote: d.quote.into(),
            expires_at: d.expires_at,
            is_new: d.is_new,
        }
    }
}

/// The error payload for 400/500 responses.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

//=========================================================================================
// REST API Handler
//=========================================================================================

/// Fetch (or mint) the daily quote for a session.
///
/// Returns the session's still-valid assignment if one exists, otherwise
/// assigns a fresh quote valid for the next 24 hours.
#[utoipa::path(
    post,
    path = "/daily-quote",
    request_body = DailyQuoteRequest,
    responses(
        (status = 200, description = "The session's quote of the day", body = DailyQuoteResponse),
        (status = 400, description = "Missing or empty sessionId", body = ErrorResponse),
        (status = 500, description = "No quotes configured, or an unexpected store error", body = ErrorResponse)
    )
)]
pub async fn daily_quote_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DailyQuoteRequest>,
) -> Result<Json<DailyQuoteResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = req.session_id.unwrap_or_default();

    match state.service.get_daily_quote(&session_id, Utc::now()).await {
        Ok(daily) => Ok(Json(DailyQuoteResponse::from(daily))),
        Err(e) => {
            let status = match &e {
                ServiceError::MissingSessionId => StatusCode::BAD_REQUEST,
                ServiceError::NoQuotesAvailable | ServiceError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!("Failed to resolve daily quote: {:?}", e);
            }
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use async_trait::async_trait;
    use chrono::Duration;
    use daily_spark_core::domain::Assignment;
    use daily_spark_core::ports::{PortResult, QuoteStore};
    use daily_spark_core::service::DailyQuoteService;
    use std::net::SocketAddr;
    use std::sync::Mutex;
    use tracing::Level;

    struct FakeStore {
        quotes: Vec<Quote>,
        assignments: Mutex<Vec<Assignment>>,
    }

    impl FakeStore {
        fn new(quotes: Vec<Quote>) -> Self {
            Self {
                quotes,
                assignments: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuoteStore for FakeStore {
        async fn ensure_session(&self, _session_id: &str) -> PortResult<()> {
            Ok(())
        }

        async fn find_active_assignment(
            &self,
            session_id: &str,
            now: DateTime<Utc>,
        ) -> PortResult<Option<(Quote, DateTime<Utc>)>> {
            let assignments = self.assignments.lock().unwrap();
            Ok(assignments
                .iter()
                .filter(|a| a.session_id == session_id && a.expires_at >= now)
                .max_by_key(|a| a.shown_at)
                .map(|a| {
                    let quote = self.quotes.iter().find(|q| q.id == a.quote_id).unwrap();
                    (quote.clone(), a.expires_at)
                }))
        }

        async fn recent_quote_ids(&self, _session_id: &str, _limit: i64) -> PortResult<Vec<Uuid>> {
            Ok(Vec::new())
        }

        async fn all_quote_ids(&self) -> PortResult<Vec<Uuid>> {
            Ok(self.quotes.iter().map(|q| q.id).collect())
        }

        async fn get_quote(&self, quote_id: Uuid) -> PortResult<Quote> {
            Ok(self
                .quotes
                .iter()
                .find(|q| q.id == quote_id)
                .cloned()
                .unwrap())
        }

        async fn insert_assignment(&self, assignment: &Assignment) -> PortResult<()> {
            self.assignments.lock().unwrap().push(assignment.clone());
            Ok(())
        }
    }

    fn test_state(quotes: Vec<Quote>) -> Arc<AppState> {
        Arc::new(AppState {
            service: DailyQuoteService::new(Arc::new(FakeStore::new(quotes))),
            config: Arc::new(Config {
                bind_address: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
                database_url: "postgres://unused".to_string(),
                log_level: Level::INFO,
            }),
        })
    }

    fn sample_quotes() -> Vec<Quote> {
        vec![Quote {
            id: Uuid::new_v4(),
            text: "Well done is better than well said.".into(),
            author: Some("Benjamin Franklin".into()),
        }]
    }

    #[tokio::test]
    async fn missing_session_id_maps_to_bad_request() {
        let state = test_state(sample_quotes());

        let result = daily_quote_handler(
            State(state),
            Json(DailyQuoteRequest { session_id: None }),
        )
        .await;

        let (status, Json(body)) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "sessionId is required");
    }

    #[tokio::test]
    async fn empty_universe_maps_to_server_error() {
        let state = test_state(Vec::new());

        let result = daily_quote_handler(
            State(state),
            Json(DailyQuoteRequest {
                session_id: Some("session_x".into()),
            }),
        )
        .await;

        let (status, Json(body)) = result.err().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "No quotes available");
    }

    #[tokio::test]
    async fn valid_request_returns_quote_payload() {
        let quotes = sample_quotes();
        let state = test_state(quotes.clone());

        let result = daily_quote_handler(
            State(state),
            Json(DailyQuoteRequest {
                session_id: Some("session_x".into()),
            }),
        )
        .await;

        let Json(body) = result.ok().unwrap();
        assert!(body.is_new);
        assert!(quotes.iter().any(|q| q.id == body.quote.id));
        assert_eq!(body.quote.text, quotes[0].text);
    }

    #[test]
    fn response_serializes_with_camel_case_keys() {
        let response = DailyQuoteResponse {
            quote: QuotePayload {
                id: Uuid::nil(),
                text: "Fall seven times and stand up eight.".into(),
                author: None,
            },
            expires_at: Utc::now() + Duration::hours(24),
            is_new: true,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("expiresAt").is_some());
        assert_eq!(json["isNew"], serde_json::Value::Bool(true));
        assert_eq!(json["quote"]["author"], serde_json::Value::Null);
    }

    #[test]
    fn request_tolerates_absent_session_id_field() {
        let req: DailyQuoteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.session_id.is_none());
    }
}
