//! Pin Claim Orchestrator.
//!
//! Claims a new file in two phases:
//!
//! 1. Pay on the ledger: upload the file, open the wallet, burn tokens and
//!    write the claim transaction.
//! 2. Register with the pinning service.
//!
//! The burn in phase one is final. If phase two fails, the error carries both
//! txids so the claim can be repaired with the reprocessing workflow.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::{ClaimGenerator, PinningService, StorageUploader, WalletProvider};
use pinclaim_core::types::{upload_megabytes, ClaimReceipt, ClaimSubmission, PinClaimRequest};

use crate::flags::{require_filename, require_wallet_name};

/// Drives upload → proof-of-burn/claim → service notification for a new file.
#[derive(Clone)]
pub struct PinClaimOrchestrator {
    uploader: Arc<dyn StorageUploader>,
    wallets: Arc<dyn WalletProvider>,
    generator: Arc<dyn ClaimGenerator>,
    service: Arc<dyn PinningService>,
    files_dir: PathBuf,
}

impl PinClaimOrchestrator {
    /// Creates an orchestrator reading local files from `files_dir`.
    pub fn new(
        uploader: Arc<dyn StorageUploader>,
        wallets: Arc<dyn WalletProvider>,
        generator: Arc<dyn ClaimGenerator>,
        service: Arc<dyn PinningService>,
        files_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            uploader,
            wallets,
            generator,
            service,
            files_dir: files_dir.into(),
        }
    }

    /// Resolves `filename` inside the files directory and returns its path and size in binary megabytes.
    ///
    /// Only plain relative names are accepted; absolute paths and `..` are rejected.
    pub async fn file_size(&self, filename: &str) -> Result<(PathBuf, f64)> {
        let relative = Path::new(filename);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(PinClaimError::InvalidFilename(filename.to_string()));
        }

        let path = self.files_dir.join(relative);
        let metadata = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PinClaimError::FileNotFound(path.clone()),
            _ => PinClaimError::IoError(e),
        })?;

        if !metadata.is_file() {
            return Err(PinClaimError::FileNotFound(path));
        }

        Ok((path, upload_megabytes(metadata.len())))
    }

    /// Uploads a file from the files directory without claiming it.
    #[instrument(skip(self))]
    pub async fn upload(&self, filename: &str) -> Result<String> {
        require_filename(filename)?;

        let (path, _) = self.file_size(filename).await?;
        let cid = self.uploader.upload(&path, filename).await?;

        info!(%cid, "File uploaded");
        Ok(cid)
    }

    /// Uploads `filename`, pays for its claim with wallet `wallet_name`, and registers the claim.
    #[instrument(skip(self))]
    pub async fn pin_claim_file(&self, filename: &str, wallet_name: &str) -> Result<ClaimReceipt> {
        require_filename(filename)?;
        require_wallet_name(wallet_name)?;

        let (path, file_size_in_megabytes) = self.file_size(filename).await?;
        debug!(file_size_in_megabytes, "Measured file");

        let cid = self.uploader.upload(&path, filename).await?;
        debug!(%cid, "Uploaded file");

        let wallet = self.wallets.instance_wallet(wallet_name).await?;
        debug!(address = %wallet.address, "Wallet ready");

        let request = PinClaimRequest {
            cid: cid.clone(),
            filename: filename.to_string(),
            file_size_in_megabytes,
        };
        let txids = self.generator.create_pin_claim(&wallet, &request).await?;
        info!(%cid, pob_txid = %txids.pob_txid, claim_txid = %txids.claim_txid, "Proof-of-burn and claim broadcast");

        let submission = ClaimSubmission {
            cid: cid.clone(),
            filename: filename.to_string(),
            claim_txid: txids.claim_txid.clone(),
            proof_of_burn_txid: txids.pob_txid.clone(),
            address: wallet.address.clone(),
        };

        if let Err(source) = self.service.submit_claim(&submission).await {
            warn!(
                %cid,
                pob_txid = %txids.pob_txid,
                claim_txid = %txids.claim_txid,
                error = %source,
                "Claim is on the ledger but not recorded by the pinning service"
            );
            return Err(PinClaimError::UnrecordedClaim {
                cid,
                pob_txid: txids.pob_txid,
                claim_txid: txids.claim_txid,
                source: Box::new(source),
            });
        }

        info!(%cid, "Pin claim recorded");
        Ok(ClaimReceipt { cid, txids })
    }
}
