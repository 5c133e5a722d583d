//! Orphanages API client.
//!
//! Thin reqwest wrapper around the two read endpoints the map needs:
//! `GET /orphanages` and `GET /orphanages/{id}`. Payload parsing lives in
//! `parse_orphanages` / `parse_orphanage` so it can be tested without a server.

use crate::config::ApiConfig;
use crate::models::LocationRecord;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const CONNECT_TIMEOUT_SECS: u64 = 5;
const USER_AGENT: &str = concat!("orphanmap/", env!("CARGO_PKG_VERSION"));

/// Every way a fetch can fail before it reaches the screen.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build http client: {0}")]
    ClientBuild(String),
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read access to the orphanages service.
///
/// The screens are generic over this trait so they can run against the
/// real HTTP client or an in-memory fake.
pub trait OrphanageApi: Send + Sync + 'static {
    /// `GET orphanages`, no parameters.
    fn list_orphanages(
        &self,
    ) -> impl Future<Output = Result<Vec<LocationRecord>, ApiError>> + Send;

    /// `GET orphanages/{id}`.
    fn get_orphanage(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<LocationRecord, ApiError>> + Send;
}

/// HTTP client for the orphanages service
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Request {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!("GET {} answered {}", url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("GET {} answered {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}

impl OrphanageApi for ApiClient {
    async fn list_orphanages(&self) -> Result<Vec<LocationRecord>, ApiError> {
        let body = self.get_text("orphanages").await?;
        parse_orphanages(&body)
    }

    async fn get_orphanage(&self, id: i64) -> Result<LocationRecord, ApiError> {
        let body = self.get_text(&format!("orphanages/{}", id)).await?;
        parse_orphanage(&body)
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Parse the listing payload. Order is preserved exactly as sent.
pub fn parse_orphanages(body: &str) -> Result<Vec<LocationRecord>, ApiError> {
    parse(body)
}

/// Parse a single orphanage payload.
pub fn parse_orphanage(body: &str) -> Result<LocationRecord, ApiError> {
    parse(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orphanages_preserves_order() {
        let body = r#"[
            {"id": 7, "name": "Casa Lar", "latitude": -20.28, "longitude": -50.54},
            {"id": 3, "name": "Abrigo Esperanca", "latitude": -20.29, "longitude": -50.55}
        ]"#;
        let records = parse_orphanages(body).unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_orphanages("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = parse_orphanages(r#"{"error": "boom"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = parse_orphanages(r#"[{"id": "seven", "name": "x"}]"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_parse_single_orphanage() {
        let record =
            parse_orphanage(r#"{"id": 42, "name": "Lar", "latitude": 1.5, "longitude": 2.5}"#)
                .unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.longitude, 2.5);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:3333/".to_string(),
            timeout_secs: 5,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.endpoint("orphanages"), "http://localhost:3333/orphanages");
        assert_eq!(client.endpoint("/orphanages/4"), "http://localhost:3333/orphanages/4");
    }
}
