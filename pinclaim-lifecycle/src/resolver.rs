//! Pin Status Resolver.
//!
//! Fetches the record the pinning service holds for a CID and enriches it with
//! its claim window. Read-only, and deliberately loose: a partial body comes
//! back as a partial record and callers decide which fields they need.

use std::sync::Arc;

use tracing::{debug, instrument};

use pinclaim_core::error::Result;
use pinclaim_core::traits::PinningService;
use pinclaim_core::types::ClaimRecord;

use crate::flags::require_cid;

/// Resolves claim records for CIDs.
#[derive(Clone)]
pub struct PinStatusResolver {
    service: Arc<dyn PinningService>,
}

impl PinStatusResolver {
    /// Creates a resolver over the given pinning service.
    pub fn new(service: Arc<dyn PinningService>) -> Self {
        Self { service }
    }

    /// Returns the current record for `cid` with `claimTime`/`expirationTime` when derivable.
    #[instrument(skip(self))]
    pub async fn resolve(&self, cid: &str) -> Result<ClaimRecord> {
        require_cid(cid)?;

        let raw = self.service.get_claim(cid).await?;
        let record = ClaimRecord::from_raw(raw);

        match record.window {
            Some(window) => debug!(
                claim_time = %window.claim_time_iso(),
                expiration_time = %window.expiration_time_iso(),
                "Resolved claim window"
            ),
            None => debug!("Claim has no ledger time yet"),
        }

        Ok(record)
    }
}
