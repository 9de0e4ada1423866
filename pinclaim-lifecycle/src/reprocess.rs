//! Reprocessing Coordinator.
//!
//! Repairs claims that exist on the ledger but were never validated by the
//! pinning service. Replays the stored identity fields; nothing is uploaded or
//! burned again.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::PinningService;
use pinclaim_core::types::{ClaimSubmission, ClaimValidity, RawClaim};

use crate::flags::require_cid;

/// Lists unprocessed claims and resubmits them one CID at a time.
#[derive(Clone)]
pub struct ReprocessingCoordinator {
    service: Arc<dyn PinningService>,
}

impl ReprocessingCoordinator {
    /// Creates a coordinator over the given pinning service.
    pub fn new(service: Arc<dyn PinningService>) -> Self {
        Self { service }
    }

    /// Returns every record whose validity is still undetermined.
    #[instrument(skip(self))]
    pub async fn list_unprocessed(&self) -> Result<Vec<RawClaim>> {
        let claims: Vec<RawClaim> = self
            .service
            .list_unprocessed()
            .await?
            .into_iter()
            .filter(|c| c.valid_claim.is_unprocessed())
            .collect();

        debug!(count = claims.len(), "Listed unprocessed claims");
        Ok(claims)
    }

    /// Resubmits the stored claim for `cid` and returns what was posted.
    #[instrument(skip(self))]
    pub async fn reprocess(&self, cid: &str) -> Result<ClaimSubmission> {
        require_cid(cid)?;

        let raw = self.service.get_claim(cid).await?;
        match raw.valid_claim {
            ClaimValidity::Unvalidated => {}
            ClaimValidity::Valid => return Err(already_validated(cid, true)),
            ClaimValidity::Invalid => return Err(already_validated(cid, false)),
        }

        let submission = ClaimSubmission::from_raw(&raw)?;
        self.service.submit_claim(&submission).await?;

        info!(claim_txid = %submission.claim_txid, "Claim resubmitted");
        Ok(submission)
    }
}

fn already_validated(cid: &str, valid: bool) -> PinClaimError {
    PinClaimError::AlreadyValidated {
        cid: cid.to_string(),
        valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinclaim_service::MemoryPinService;

    use crate::testing::confirmed_claim;

    fn pending_pair() -> Arc<MemoryPinService> {
        Arc::new(MemoryPinService::with_claims([
            confirmed_claim("bafy-one", 1_700_000_000),
            confirmed_claim("bafy-two", 1_700_000_100),
        ]))
    }

    #[tokio::test]
    async fn test_resubmitting_one_leaves_the_other_pending() {
        let service = pending_pair();
        let coordinator = ReprocessingCoordinator::new(service.clone());

        assert_eq!(coordinator.list_unprocessed().await.unwrap().len(), 2);

        let submission = coordinator.reprocess("bafy-one").await.unwrap();
        assert_eq!(submission.proof_of_burn_txid, "pob-bafy-one");
        assert_eq!(submission.claim_txid, "claim-bafy-one");
        assert_eq!(submission.filename, "report.pdf");

        let submitted = service.submissions();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].cid, "bafy-one");

        let other = service.claim("bafy-two").unwrap();
        assert_eq!(other, confirmed_claim("bafy-two", 1_700_000_100));
        assert_eq!(other.valid_claim, ClaimValidity::Unvalidated);
    }

    #[tokio::test]
    async fn test_listing_skips_resolved_records() {
        let service = pending_pair();
        service.set_validity("bafy-two", ClaimValidity::Valid).unwrap();

        let cids: Vec<_> = ReprocessingCoordinator::new(service)
            .list_unprocessed()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|c| c.cid)
            .collect();
        assert_eq!(cids, vec!["bafy-one"]);
    }

    #[tokio::test]
    async fn test_validated_claim_is_refused() {
        let service = pending_pair();
        service.set_validity("bafy-one", ClaimValidity::Invalid).unwrap();
        let coordinator = ReprocessingCoordinator::new(service.clone());

        let err = coordinator.reprocess("bafy-one").await.unwrap_err();
        assert!(matches!(err, PinClaimError::AlreadyValidated { valid: false, .. }));
        assert!(service.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_record_is_not_posted() {
        let mut claim = confirmed_claim("bafy", 1_700_000_000);
        claim.address = None;
        let service = Arc::new(MemoryPinService::with_claims([claim]));

        let err = ReprocessingCoordinator::new(service.clone())
            .reprocess("bafy")
            .await
            .unwrap_err();
        assert!(matches!(err, PinClaimError::IncompleteRecord { field: "address", .. }));
        assert!(service.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_service_rejection_propagates() {
        let service = pending_pair();
        service.reject_next_submission("claim transaction not found");

        let err = ReprocessingCoordinator::new(service)
            .reprocess("bafy-one")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "claim transaction not found");
    }

    #[tokio::test]
    async fn test_empty_cid() {
        let coordinator = ReprocessingCoordinator::new(pending_pair());
        assert!(matches!(
            coordinator.reprocess("").await,
            Err(PinClaimError::MissingArgument(_))
        ));
    }
}
