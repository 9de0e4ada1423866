//! IPFS upload client implementation.
//!
//! Files are posted as multipart form data to the pinning service's
//! `/ipfs/pin-local-file/` endpoint, which adds them to its IPFS node.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::StorageUploader;
use pinclaim_core::PinClaimConfig;

const UPLOAD_PATH: &str = "/ipfs/pin-local-file/";

/// IPFS client for upload operations.
pub struct IpfsUploadClient {
    endpoint: String,
    max_upload_bytes: u64,
    http_client: reqwest::Client,
}

impl IpfsUploadClient {
    /// Creates a new upload client with the given config.
    pub fn with_config(config: &PinClaimConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PinClaimError::ConfigError(e.to_string()))?;

        Ok(Self {
            endpoint: config.pin_service_endpoint(UPLOAD_PATH),
            max_upload_bytes: config.max_upload_bytes,
            http_client,
        })
    }

    /// Uploads a local file and returns its CID.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn upload_file(&self, path: &Path, filename: &str) -> Result<String> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PinClaimError::FileNotFound(path.to_path_buf()),
            _ => PinClaimError::IoError(e),
        })?;

        if metadata.len() > self.max_upload_bytes {
            return Err(PinClaimError::UploadFailed(format!(
                "{} is {} bytes, limit is {}",
                filename,
                metadata.len(),
                self.max_upload_bytes
            )));
        }

        let data = tokio::fs::read(path).await?;

        let file_part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| PinClaimError::UploadFailed(e.to_string()))?;

        let form = reqwest::multipart::Form::new().part("file", file_part);

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PinClaimError::UploadFailed(format!(
                "Upload failed with status {}: {}",
                status, text
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PinClaimError::UploadFailed(e.to_string()))?;

        if !body.success {
            return Err(PinClaimError::UpstreamService(
                body.message.unwrap_or_else(|| "upload rejected".into()),
            ));
        }

        let cid = body
            .cid
            .ok_or_else(|| PinClaimError::UploadFailed("response carried no CID".into()))?;
        validate_cid(&cid)?;

        debug!(%cid, "Uploaded to IPFS");
        Ok(cid)
    }
}

#[async_trait]
impl StorageUploader for IpfsUploadClient {
    async fn upload(&self, path: &Path, filename: &str) -> Result<String> {
        self.upload_file(path, filename).await
    }
}

/// A CID from the storage network must be a single non-empty alphanumeric token.
fn validate_cid(cid: &str) -> Result<()> {
    if cid.is_empty() {
        return Err(PinClaimError::UploadFailed("response carried an empty CID".into()));
    }
    if !cid.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PinClaimError::UploadFailed(format!("CID '{}' contains invalid characters", cid)));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    cid: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
