//! services/cli/src/state.rs
//!
//! Client-local persisted state: the session token plus the cached quote of
//! the day. Strictly a display optimization; the server stays authoritative
//! and the cache is dropped as soon as its expiry passes.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A quote as received from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteView {
    pub id: Uuid,
    pub text: String,
    pub author: Option<String>,
}

/// The last-received quote together with its validity deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedQuote {
    pub quote: QuoteView,
    pub expires_at: DateTime<Utc>,
}

/// Everything the client remembers between runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientState {
    pub session_id: String,
    #[serde(default)]
    pub cached: Option<CachedQuote>,
}

impl ClientState {
    /// Loads the state file, or starts a fresh session when the file does not
    /// exist yet. An unreadable file also starts fresh rather than aborting;
    /// the only cost is a new session identity.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(state) => Ok(state),
                Err(_) => Ok(Self::fresh()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::fresh()),
            Err(e) => Err(e).with_context(|| format!("could not read {}", path.display())),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("could not write {}", path.display()))
    }

    /// Drops the cached quote once its expiry has passed.
    pub fn clear_expired(&mut self, now: DateTime<Utc>) {
        if let Some(cached) = &self.cached {
            if cached.expires_at <= now {
                self.cached = None;
            }
        }
    }

    fn fresh() -> Self {
        Self {
            session_id: new_session_id(),
            cached: None,
        }
    }
}

/// Default location of the state file: `<data dir>/daily-spark/state.json`.
pub fn default_state_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine the user data directory")?;
    Ok(base.join("daily-spark").join("state.json"))
}

/// Generates an opaque session token: a millisecond timestamp plus a short
/// random suffix. Not collision-resistant, which is acceptable here.
pub fn new_session_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!(
        "session_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_cached(expires_at: DateTime<Utc>) -> CachedQuote {
        CachedQuote {
            quote: QuoteView {
                id: Uuid::new_v4(),
                text: "Little by little, one travels far.".into(),
                author: None,
            },
            expires_at,
        }
    }

    #[test]
    fn session_id_has_expected_shape() {
        let id = new_session_id();
        assert!(id.starts_with("session_"));
        assert_eq!(id.split('_').count(), 3);
        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn state_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = ClientState {
            session_id: new_session_id(),
            cached: Some(sample_cached(Utc::now() + Duration::hours(12))),
        };
        state.save(&path).unwrap();

        let loaded = ClientState::load_or_create(&path).unwrap();
        assert_eq!(loaded.session_id, state.session_id);
        assert_eq!(
            loaded.cached.as_ref().unwrap().quote.text,
            state.cached.as_ref().unwrap().quote.text
        );
    }

    #[test]
    fn missing_file_creates_a_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let state = ClientState::load_or_create(&path).unwrap();
        assert!(state.session_id.starts_with("session_"));
        assert!(state.cached.is_none());
    }

    #[test]
    fn expired_cache_is_cleared_on_load_check() {
        let now = Utc::now();
        let mut state = ClientState {
            session_id: new_session_id(),
            cached: Some(sample_cached(now - Duration::seconds(1))),
        };
        state.clear_expired(now);
        assert!(state.cached.is_none());
    }

    #[test]
    fn still_valid_cache_survives_load_check() {
        let now = Utc::now();
        let mut state = ClientState {
            session_id: new_session_id(),
            cached: Some(sample_cached(now + Duration::seconds(1))),
        };
        state.clear_expired(now);
        assert!(state.cached.is_some());
    }

    #[test]
    fn corrupt_file_starts_over_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json at all").unwrap();

        let state = ClientState::load_or_create(&path).unwrap();
        assert!(state.cached.is_none());
    }
}
