//! REST client for the upstream raffle/prize backend.
//!
//! The backend owns all durable state; this service only reads raffle and
//! prize records and forwards validated writes. Wire shapes follow the
//! backend's column naming (`Int_*`, `VC_*`, `Dec_*`, `Dt_*`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tombola_core::datetime;
use tombola_core::prize::{Prize, PrizeType, PrizeWritePayload};
use tombola_core::raffle::SaleWindow;
use tombola_core::types::DbId;

use crate::auth::token::TokenCache;
use crate::config::ServerConfig;

/// Errors from the upstream backend layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A record came back in a shape the domain types reject.
    #[error("Backend returned an invalid record: {0}")]
    InvalidRecord(String),
}

// ---------------------------------------------------------------------------
// Upstream record shapes
// ---------------------------------------------------------------------------

/// A raffle as returned by the backend, reduced to the fields the prize
/// rules need.
#[derive(Debug, Clone, Deserialize)]
pub struct RaffleRecord {
    #[serde(rename = "Int_Raffle_ID")]
    pub id: DbId,
    #[serde(rename = "Dt_SalesOpen")]
    pub sales_open: String,
    #[serde(rename = "Dt_SalesClose")]
    pub sales_close: String,
}

impl RaffleRecord {
    /// The raffle's sale window. Absent/sentinel dates are invalid here: a
    /// raffle without a sale window cannot anchor any prize rules.
    pub fn sale_window(&self) -> Result<SaleWindow, BackendError> {
        SaleWindow::from_raw(&self.sales_open, &self.sales_close)
            .map_err(|e| BackendError::InvalidRecord(e.to_string()))
    }
}

/// A prize as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeRecord {
    #[serde(rename = "Int_Prize_ID")]
    pub id: DbId,
    #[serde(rename = "Int_Place")]
    pub place: u32,
    #[serde(rename = "Int_Prize_Type")]
    pub prize_type: i32,
    #[serde(rename = "Int_AutomatedDraw", default)]
    pub automated_draw: i32,
    #[serde(rename = "VC_Description", default)]
    pub description: String,
    #[serde(rename = "Int_PrizeValuePercent", default)]
    pub value_percent: i32,
    #[serde(rename = "Dec_Value")]
    pub value: f64,
    #[serde(rename = "Dt_Draw", default)]
    pub draw: String,
    #[serde(rename = "Int_Ticket_ID", default)]
    pub winning_ticket_id: Option<DbId>,
}

impl PrizeRecord {
    /// Convert to the domain [`Prize`] type, normalizing the draw date
    /// (unset sentinel becomes `None`) and the percentage flag.
    pub fn to_prize(&self) -> Result<Prize, BackendError> {
        let prize_type = PrizeType::from_code(self.prize_type).ok_or_else(|| {
            BackendError::InvalidRecord(format!("unknown prize type code {}", self.prize_type))
        })?;
        let draw_date = datetime::parse_optional(&self.draw)
            .map_err(|e| BackendError::InvalidRecord(e.to_string()))?;

        Ok(Prize {
            id: self.id,
            place: self.place,
            prize_type,
            is_percentage: self.value_percent != 0,
            amount: self.value,
            description: self.description.clone(),
            draw_date,
            winning_ticket_id: self.winning_ticket_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the raffle/prize backend, with bearer-token auth.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenCache,
}

impl BackendClient {
    /// Build a client from server configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.backend_base_url.trim_end_matches('/').to_string(),
            tokens: TokenCache::new(
                config.backend_client_id.clone(),
                config.backend_client_secret.clone(),
                config.token_refresh_margin_secs,
            ),
        }
    }

    async fn bearer(&self) -> Result<String, BackendError> {
        self.tokens.bearer(&self.client, &self.base_url).await
    }

    /// Fetch a single raffle.
    pub async fn fetch_raffle(&self, raffle_id: DbId) -> Result<RaffleRecord, BackendError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/raffles/{raffle_id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// List all prizes attached to a raffle.
    pub async fn list_prizes(&self, raffle_id: DbId) -> Result<Vec<PrizeRecord>, BackendError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/raffles/{raffle_id}/prizes", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Create a prize from a validated write payload.
    pub async fn create_prize(
        &self,
        raffle_id: DbId,
        payload: &PrizeWritePayload,
    ) -> Result<PrizeRecord, BackendError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .post(format!("{}/raffles/{raffle_id}/prizes", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Update a prize from a validated write payload.
    pub async fn update_prize(
        &self,
        prize_id: DbId,
        payload: &PrizeWritePayload,
    ) -> Result<PrizeRecord, BackendError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .put(format!("{}/prizes/{prize_id}", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Delete a prize. The backend does not guard the top prize itself;
    /// callers must check `can_delete_prize` first.
    pub async fn delete_prize(&self, prize_id: DbId) -> Result<(), BackendError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .delete(format!("{}/prizes/{prize_id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::Api { status, body })
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::Api { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prize_record_sentinel_draw_becomes_absent() {
        let record: PrizeRecord = serde_json::from_value(json!({
            "Int_Prize_ID": 7,
            "Int_Place": 2,
            "Int_Prize_Type": 3,
            "Dec_Value": 250.0,
            "Dt_Draw": "0000-00-00 00:00:00",
        }))
        .unwrap();
        let prize = record.to_prize().unwrap();
        assert!(prize.draw_date.is_none());
        assert_eq!(prize.prize_type, PrizeType::EarlyBird);
        assert!(!prize.is_percentage);
    }

    #[test]
    fn prize_record_unknown_type_rejected() {
        let record: PrizeRecord = serde_json::from_value(json!({
            "Int_Prize_ID": 7,
            "Int_Place": 2,
            "Int_Prize_Type": 42,
            "Dec_Value": 250.0,
        }))
        .unwrap();
        assert!(record.to_prize().is_err());
    }

    #[test]
    fn raffle_record_requires_real_window() {
        let record: RaffleRecord = serde_json::from_value(json!({
            "Int_Raffle_ID": 1,
            "Dt_SalesOpen": "0000-00-00 00:00:00",
            "Dt_SalesClose": "2025-06-30 18:00:00",
        }))
        .unwrap();
        assert!(record.sale_window().is_err());
    }
}
