//! Client configuration.
//!
//! One explicit struct carries every service location. It is built once at
//! process start and handed to each client's constructor.

use std::path::PathBuf;

use url::Url;

use crate::constants::*;
use crate::error::{PinClaimError, Result};

/// Service locations and local paths used by the pin claim clients.
#[derive(Clone, Debug, PartialEq)]
pub struct PinClaimConfig {
    /// Pinning service base URL (status, claims, uploads)
    pub pin_service_url: String,
    /// Wallet REST service base URL (UTXO and token sync)
    pub wallet_rest_url: String,
    /// Signer service base URL (proof-of-burn and claim broadcast)
    pub signer_url: String,
    /// Directory local files are uploaded from
    pub files_dir: PathBuf,
    /// Directory holding named wallet files
    pub wallets_dir: PathBuf,
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
    /// Largest file accepted for upload
    pub max_upload_bytes: u64,
}

impl Default for PinClaimConfig {
    fn default() -> Self {
        Self {
            pin_service_url: DEFAULT_PIN_SERVICE_URL.into(),
            wallet_rest_url: DEFAULT_WALLET_URL.into(),
            signer_url: DEFAULT_SIGNER_URL.into(),
            files_dir: PathBuf::from(DEFAULT_FILES_DIR),
            wallets_dir: PathBuf::from(DEFAULT_WALLETS_DIR),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl PinClaimConfig {
    /// Loads `.env` if present, then reads overrides from the environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            pin_service_url: std::env::var("PIN_SERVICE_URL")
                .unwrap_or(defaults.pin_service_url),
            wallet_rest_url: std::env::var("WALLET_URL").unwrap_or(defaults.wallet_rest_url),
            signer_url: std::env::var("SIGNER_URL").unwrap_or(defaults.signer_url),
            files_dir: std::env::var("FILES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.files_dir),
            wallets_dir: std::env::var("WALLETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.wallets_dir),
            timeout_seconds: std::env::var("HTTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            max_upload_bytes: defaults.max_upload_bytes,
        }
    }

    /// Points every HTTP collaborator at one base URL (useful for local stacks and tests).
    pub fn with_base_url(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            pin_service_url: base.clone(),
            wallet_rest_url: base.clone(),
            signer_url: base,
            ..Default::default()
        }
    }

    /// Checks that every service URL parses as an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pin_service_url", &self.pin_service_url),
            ("wallet_rest_url", &self.wallet_rest_url),
            ("signer_url", &self.signer_url),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| PinClaimError::ConfigError(format!("{name} '{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(PinClaimError::ConfigError(format!(
                    "{name} '{value}': unsupported scheme '{}'",
                    parsed.scheme()
                )));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(PinClaimError::ConfigError("timeout_seconds must be positive".into()));
        }

        Ok(())
    }

    /// Joins `path` onto the pinning service base URL.
    pub fn pin_service_endpoint(&self, path: &str) -> String {
        join_url(&self.pin_service_url, path)
    }

    /// Joins `path` onto the wallet REST base URL.
    pub fn wallet_endpoint(&self, path: &str) -> String {
        join_url(&self.wallet_rest_url, path)
    }

    /// Joins `path` onto the signer base URL.
    pub fn signer_endpoint(&self, path: &str) -> String {
        join_url(&self.signer_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
