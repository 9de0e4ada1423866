//! In-memory pinning service.
//!
//! Keeps claim records in process, keyed by CID. Suitable for tests and for
//! exercising the lifecycle without a running service.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::PinningService;
use pinclaim_core::types::{ClaimSubmission, ClaimValidity, RawClaim};

/// In-memory pinning service.
#[derive(Debug, Default)]
pub struct MemoryPinService {
    /// Primary storage: CID → record
    claims: RwLock<BTreeMap<String, RawClaim>>,
    /// Every submission received, in order
    submissions: RwLock<Vec<ClaimSubmission>>,
    /// Messages to reject upcoming submissions with
    rejections: RwLock<VecDeque<String>>,
}

impl MemoryPinService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service preloaded with records.
    pub fn with_claims(claims: impl IntoIterator<Item = RawClaim>) -> Self {
        let service = Self::new();
        for claim in claims {
            service.insert(claim);
        }
        service
    }

    /// Inserts or replaces a record.
    pub fn insert(&self, claim: RawClaim) {
        let cid = claim.cid_or_empty().to_string();
        self.claims.write().insert(cid, claim);
    }

    /// Sets the validity flag of a stored record, as the service's validator would.
    pub fn set_validity(&self, cid: &str, validity: ClaimValidity) -> Result<()> {
        let mut claims = self.claims.write();
        let claim = claims
            .get_mut(cid)
            .ok_or_else(|| PinClaimError::UpstreamService(format!("CID {} not found!", cid)))?;
        claim.valid_claim = validity;
        Ok(())
    }

    /// Rejects the next submission with `{success: false, message}`.
    pub fn reject_next_submission(&self, message: impl Into<String>) {
        self.rejections.write().push_back(message.into());
    }

    /// Returns a copy of a stored record.
    pub fn claim(&self, cid: &str) -> Option<RawClaim> {
        self.claims.read().get(cid).cloned()
    }

    /// Returns every submission received so far.
    pub fn submissions(&self) -> Vec<ClaimSubmission> {
        self.submissions.read().clone()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.claims.read().len()
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.claims.read().is_empty()
    }
}

#[async_trait]
impl PinningService for MemoryPinService {
    #[instrument(skip(self))]
    async fn get_claim(&self, cid: &str) -> Result<RawClaim> {
        self.claim(cid)
            .ok_or_else(|| PinClaimError::UpstreamService(format!("CID {} not found!", cid)))
    }

    #[instrument(skip(self, submission), fields(cid = %submission.cid))]
    async fn submit_claim(&self, submission: &ClaimSubmission) -> Result<()> {
        self.submissions.write().push(submission.clone());

        if let Some(message) = self.rejections.write().pop_front() {
            debug!(%message, "Rejecting submission");
            return Err(PinClaimError::UpstreamService(message));
        }

        let mut claims = self.claims.write();
        let claim = claims.entry(submission.cid.clone()).or_default();
        claim.cid = Some(submission.cid.clone());
        claim.filename = Some(submission.filename.clone());
        claim.address = Some(submission.address.clone());
        claim.proof_of_burn_txid = Some(submission.proof_of_burn_txid.clone());
        claim.claim_txid = Some(submission.claim_txid.clone());
        // A new submission has to be validated again.
        claim.valid_claim = ClaimValidity::Unvalidated;

        debug!("Recorded claim");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_unprocessed(&self) -> Result<Vec<RawClaim>> {
        Ok(self
            .claims
            .read()
            .values()
            .filter(|c| c.valid_claim.is_unprocessed())
            .cloned()
            .collect())
    }
}
