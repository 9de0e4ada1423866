//! Contracts for the collaborators the lifecycle depends on.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling the coordinators to be driven by HTTP clients in production and by
//! in-memory doubles in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ClaimSubmission, ClaimTxids, PinClaimRequest, RawClaim, Wallet};

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE UPLOAD
// ═══════════════════════════════════════════════════════════════════════════════

/// Uploads a local file to the content-addressed storage network.
#[async_trait]
pub trait StorageUploader: Send + Sync {
    /// Uploads the file at `path` under `filename` and returns its CID.
    async fn upload(&self, path: &Path, filename: &str) -> Result<String>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PINNING SERVICE
// ═══════════════════════════════════════════════════════════════════════════════

/// Record keeper for claim metadata and validity.
#[async_trait]
pub trait PinningService: Send + Sync {
    /// Fetches the raw claim record for a CID.
    ///
    /// Partial bodies are returned as-is; callers apply their own presence checks.
    async fn get_claim(&self, cid: &str) -> Result<RawClaim>;

    /// Records a claim.
    ///
    /// A `{success: false, message}` reply becomes `UpstreamService(message)`.
    async fn submit_claim(&self, submission: &ClaimSubmission) -> Result<()>;

    /// Lists every claim whose validity is still unresolved.
    async fn list_unprocessed(&self) -> Result<Vec<RawClaim>>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// WALLET
// ═══════════════════════════════════════════════════════════════════════════════

/// Opens named wallets.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Opens and syncs the wallet called `name`.
    ///
    /// The returned wallet belongs to the calling workflow alone.
    async fn instance_wallet(&self, name: &str) -> Result<Wallet>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLAIM GENERATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Burns tokens and writes the claim transaction to the ledger.
///
/// Once this returns `Ok`, the burn is final.
#[async_trait]
pub trait ClaimGenerator: Send + Sync {
    /// Generates a proof-of-burn and claim transaction pair paid by `wallet`.
    async fn create_pin_claim(&self, wallet: &Wallet, request: &PinClaimRequest) -> Result<ClaimTxids>;
}
