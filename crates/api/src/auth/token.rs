//! Cached bearer credential for the upstream raffle backend.
//!
//! The backend exchanges service credentials for a short-lived token. This
//! cache holds the current token and re-exchanges ahead of expiry instead
//! of minting a fresh one per request. Credentials stop here; the rule
//! engine never sees them.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::backend::BackendError;

/// Response from the backend's `POST /auth/token` exchange.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Short-lived upstream bearer token with refresh-ahead caching.
pub struct TokenCache {
    client_id: String,
    client_secret: String,
    refresh_margin: Duration,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(client_id: String, client_secret: String, refresh_margin_secs: i64) -> Self {
        Self {
            client_id,
            client_secret,
            refresh_margin: Duration::seconds(refresh_margin_secs),
            cached: RwLock::new(None),
        }
    }

    /// Current bearer token, exchanging credentials when the cache is empty
    /// or the cached token is inside the refresh margin.
    pub async fn bearer(
        &self,
        client: &reqwest::Client,
        base_url: &str,
    ) -> Result<String, BackendError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at - self.refresh_margin > Utc::now() {
                return Ok(cached.token.clone());
            }
        }

        let response = client
            .post(format!("{base_url}/auth/token"))
            .json(&serde_json::json!({
                "client_id": self.client_id,
                "client_secret": self.client_secret,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let exchanged: TokenResponse = response.json().await?;
        let expires_at = Utc::now() + Duration::seconds(exchanged.expires_in);
        let bearer = exchanged.token.clone();
        *self.cached.write().await = Some(CachedToken {
            token: exchanged.token,
            expires_at,
        });

        tracing::debug!(%expires_at, "Refreshed upstream bearer token");
        Ok(bearer)
    }
}
