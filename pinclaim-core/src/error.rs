//! Error types for the pin claim lifecycle.
//!
//! This module provides the error taxonomy using `thiserror`.
//! Upstream messages are kept verbatim so operators see what the service said.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `PinClaimError`.
pub type Result<T> = std::result::Result<T, PinClaimError>;

/// Main error type for all pin claim operations.
#[derive(Debug, Error)]
pub enum PinClaimError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required flag or field was absent or empty.
    #[error("{0}")]
    MissingArgument(String),

    /// Local file absent at the expected path.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Filename that would resolve outside the files directory.
    #[error("Invalid filename '{0}': must name a file inside the files directory")]
    InvalidFilename(String),

    /// A record fetched from the pinning service lacks a field needed to act on it.
    #[error("Claim record for '{cid}' is missing '{field}'")]
    IncompleteRecord { cid: String, field: &'static str },

    // ═══════════════════════════════════════════════════════════════════════════
    // LIFECYCLE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Wallet lacks the token required for a paid operation.
    #[error("Wallet does not contain tokens with id {token_id}. Please add tokens to the wallet before renewing a pin claim.")]
    InsufficientFunds { token_id: String },

    /// Renewal requested but the claim never confirmed on the ledger.
    #[error("Unable to determine expiration time for the pin claim on '{0}'.")]
    MissingExpiration(String),

    /// Reprocess requested for a record the pinning service already validated.
    #[error("Pin claim for '{cid}' was already validated (validClaim = {valid})")]
    AlreadyValidated { cid: String, valid: bool },

    /// The ledger claim exists but the pinning service did not record it.
    ///
    /// Displays the root cause unchanged; the minted txids stay reachable for
    /// reprocessing.
    #[error("{source}")]
    UnrecordedClaim {
        cid: String,
        pob_txid: String,
        claim_txid: String,
        #[source]
        source: Box<PinClaimError>,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // COLLABORATOR ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Non-success response from the pinning service, message verbatim.
    #[error("{0}")]
    UpstreamService(String),

    /// Network-level failure from any HTTP call.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Storage upload rejected or unreadable.
    #[error("IPFS upload failed: {0}")]
    UploadFailed(String),

    /// Wallet could not be opened or synced.
    #[error("Wallet error: {0}")]
    WalletError(String),

    /// Proof-of-burn or claim transaction could not be generated.
    #[error("Pin claim generation failed: {0}")]
    ClaimGenerationFailed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION / STORAGE / CONFIG
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PinClaimError {
    /// Returns true if the failure happened on the wire rather than in the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, PinClaimError::Transport(_))
    }

    /// Returns true if this error was raised before any I/O.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            PinClaimError::MissingArgument(_)
                | PinClaimError::FileNotFound(_)
                | PinClaimError::InvalidFilename(_)
                | PinClaimError::IncompleteRecord { .. }
                | PinClaimError::ConfigError(_)
        )
    }

    /// Returns `(cid, pob_txid, claim_txid)` when a ledger claim was minted but not recorded.
    pub fn ledger_txids(&self) -> Option<(&str, &str, &str)> {
        match self {
            PinClaimError::UnrecordedClaim {
                cid,
                pob_txid,
                claim_txid,
                ..
            } => Some((cid, pob_txid, claim_txid)),
            _ => None,
        }
    }
}
