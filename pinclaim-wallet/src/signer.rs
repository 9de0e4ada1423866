//! Claim generator backed by a signer service.
//!
//! The signer holds the wallet keys. It burns the tokens, broadcasts the
//! proof-of-burn and claim transactions, and replies with both txids.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::ClaimGenerator;
use pinclaim_core::types::{ClaimTxids, PinClaimRequest, Wallet};
use pinclaim_core::PinClaimConfig;

/// Generates pin claims through the signer service.
pub struct SignerClaimGenerator {
    endpoint: String,
    http_client: reqwest::Client,
}

impl SignerClaimGenerator {
    /// Creates a generator for the signer named in `config`.
    pub fn with_config(config: &PinClaimConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PinClaimError::ConfigError(e.to_string()))?;

        Ok(Self {
            endpoint: config.signer_endpoint("/pin-claim"),
            http_client,
        })
    }
}

#[async_trait]
impl ClaimGenerator for SignerClaimGenerator {
    #[instrument(skip(self, wallet, request), fields(wallet = %wallet.name, cid = %request.cid))]
    async fn create_pin_claim(&self, wallet: &Wallet, request: &PinClaimRequest) -> Result<ClaimTxids> {
        let body = SignerRequest {
            wallet_name: &wallet.name,
            address: &wallet.address,
            request,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PinClaimError::ClaimGenerationFailed(format!(
                "signer replied {}: {}",
                status, text
            )));
        }

        let txids: ClaimTxids = response
            .json()
            .await
            .map_err(|e| PinClaimError::ClaimGenerationFailed(e.to_string()))?;

        if txids.pob_txid.is_empty() || txids.claim_txid.is_empty() {
            return Err(PinClaimError::ClaimGenerationFailed(
                "signer returned an empty txid".into(),
            ));
        }

        info!(pob_txid = %txids.pob_txid, claim_txid = %txids.claim_txid, "Pin claim broadcast");
        Ok(txids)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignerRequest<'a> {
    wallet_name: &'a str,
    address: &'a str,
    #[serde(flatten)]
    request: &'a PinClaimRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinclaim_core::types::TokenHoldings;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn wallet() -> Wallet {
        Wallet {
            name: "payer".into(),
            address: "bitcoincash:qz".into(),
            holdings: TokenHoldings::default(),
        }
    }

    fn request() -> PinClaimRequest {
        PinClaimRequest {
            cid: "bafy".into(),
            filename: "a.txt".into(),
            file_size_in_megabytes: 0.5,
        }
    }

    #[tokio::test]
    async fn test_create_pin_claim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pin-claim"))
            .and(body_json(json!({
                "walletName": "payer",
                "address": "bitcoincash:qz",
                "cid": "bafy",
                "filename": "a.txt",
                "fileSizeInMegabytes": 0.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pobTxid": "pob",
                "claimTxid": "claim"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = SignerClaimGenerator::with_config(&PinClaimConfig::with_base_url(server.uri())).unwrap();
        let txids = generator.create_pin_claim(&wallet(), &request()).await.unwrap();
        assert_eq!(txids.pob_txid, "pob");
        assert_eq!(txids.claim_txid, "claim");
    }

    #[tokio::test]
    async fn test_signer_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "insufficient BCH" })))
            .mount(&server)
            .await;

        let generator = SignerClaimGenerator::with_config(&PinClaimConfig::with_base_url(server.uri())).unwrap();
        let err = generator.create_pin_claim(&wallet(), &request()).await.unwrap_err();
        assert!(matches!(err, PinClaimError::ClaimGenerationFailed(ref m) if m.contains("insufficient BCH")));
    }
}
