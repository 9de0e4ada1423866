//! REST client for the pinning service.
//!
//! Endpoints:
//! - `GET  /ipfs/pin-status/{cid}`: raw claim record
//! - `POST /ipfs/pin-claim/`: record a claim, replies `{success, message?}`
//! - `GET  /ipfs/unprocessed-pins`: records whose `validClaim` is still null

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::PinningService;
use pinclaim_core::types::{ClaimSubmission, RawClaim};
use pinclaim_core::PinClaimConfig;

/// HTTP pinning service client.
pub struct HttpPinningService {
    config: PinClaimConfig,
    http_client: reqwest::Client,
}

impl HttpPinningService {
    /// Creates a client for the pinning service named in `config`.
    pub fn with_config(config: &PinClaimConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PinClaimError::ConfigError(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            http_client,
        })
    }

    /// Appends `cid` to the pin-status endpoint as one percent-encoded path segment.
    fn pin_status_url(&self, cid: &str) -> Result<Url> {
        let endpoint = self.config.pin_service_endpoint("/ipfs/pin-status/");
        let mut url = Url::parse(&endpoint).map_err(|e| PinClaimError::ConfigError(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| PinClaimError::ConfigError(format!("{endpoint} cannot take a path")))?
            .pop_if_empty()
            .push(cid);
        Ok(url)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(upstream_error(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl PinningService for HttpPinningService {
    #[instrument(skip(self))]
    async fn get_claim(&self, cid: &str) -> Result<RawClaim> {
        let url = self.pin_status_url(cid)?;
        let body = self.get_json(url.as_str()).await?;

        match body {
            Value::Object(fields) => Ok(RawClaim::from(fields)),
            other => {
                warn!(cid, body = %other, "Pin status body is not an object");
                Ok(RawClaim::default())
            }
        }
    }

    #[instrument(skip(self, submission), fields(cid = %submission.cid))]
    async fn submit_claim(&self, submission: &ClaimSubmission) -> Result<()> {
        let url = self.config.pin_service_endpoint("/ipfs/pin-claim/");

        let response = self
            .http_client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(upstream_error(status, &text));
        }

        let reply: SubmitReply = serde_json::from_str(&text)?;
        if !reply.success {
            return Err(PinClaimError::UpstreamService(
                reply.message.unwrap_or_else(|| "pin claim rejected".into()),
            ));
        }

        debug!("Pin claim recorded by service");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_unprocessed(&self) -> Result<Vec<RawClaim>> {
        let url = self.config.pin_service_endpoint("/ipfs/unprocessed-pins");
        let body = self.get_json(&url).await?;

        let entries = match body {
            Value::Null => Vec::new(),
            Value::Array(entries) => entries,
            other => {
                return Err(PinClaimError::UpstreamService(format!(
                    "Unexpected unprocessed-pins body: {other}"
                )))
            }
        };

        let claims: Vec<RawClaim> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(fields) => Some(RawClaim::from(fields)),
                other => {
                    warn!(entry = %other, "Skipping unprocessed entry that is not an object");
                    None
                }
            })
            .collect();

        debug!(count = claims.len(), "Listed unprocessed claims");
        Ok(claims)
    }
}

#[derive(Debug, Deserialize)]
struct SubmitReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a non-2xx reply to `UpstreamService`, keeping the service's own message when it sent one.
fn upstream_error(status: reqwest::StatusCode, body: &str) -> PinClaimError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
    PinClaimError::UpstreamService(message)
}
