//! Renewal Coordinator.
//!
//! Re-establishes a one-year claim window for a CID that was claimed before.
//! Expiration is advisory: a claim that has not expired yet is renewed anyway,
//! with a warning.
//!
//! Renewal runs in two steps so callers can report what they are about to pay
//! for: [`RenewalCoordinator::prepare`] does every read and check, and
//! [`RenewalCoordinator::execute`] broadcasts the new claim.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use pinclaim_core::constants::PSF_TOKEN_ID;
use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::{ClaimGenerator, WalletProvider};
use pinclaim_core::types::{renewal_megabytes, ClaimRecord, ClaimTxids, PinClaimRequest, TokenBalance, Wallet};

use crate::flags::{require_cid, require_wallet_name};
use crate::resolver::PinStatusResolver;

/// Where a claim stands relative to its expiration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpirationStatus {
    /// The window has closed
    Expired,
    /// The window is still open; renewal is pre-emptive
    NotYetExpired,
}

/// A checked renewal that has not been paid for yet.
#[derive(Clone, Debug)]
pub struct RenewalPlan {
    /// Content identifier to renew
    pub cid: String,
    /// Expiration status observed while preparing
    pub status: ExpirationStatus,
    /// Expiration time of the current claim
    pub expiration_time: DateTime<Utc>,
    /// Renewal token balance held by the paying wallet
    pub balance: TokenBalance,
    wallet: Wallet,
    request: PinClaimRequest,
}

/// Result of a renewal.
#[derive(Clone, Debug, PartialEq)]
pub struct RenewalReceipt {
    /// Renewed content identifier
    pub cid: String,
    /// The new transaction pair
    pub txids: ClaimTxids,
    /// Expiration status observed before renewing
    pub status: ExpirationStatus,
    /// Expiration time of the previous claim
    pub expiration_time: DateTime<Utc>,
    /// Renewal token balance held by the paying wallet
    pub balance: TokenBalance,
}

/// Drives status → expiration → token check → new claim for an existing CID.
#[derive(Clone)]
pub struct RenewalCoordinator {
    resolver: PinStatusResolver,
    wallets: Arc<dyn WalletProvider>,
    generator: Arc<dyn ClaimGenerator>,
    token_id: String,
}

impl RenewalCoordinator {
    /// Creates a coordinator that requires the PSF token for renewals.
    pub fn new(
        resolver: PinStatusResolver,
        wallets: Arc<dyn WalletProvider>,
        generator: Arc<dyn ClaimGenerator>,
    ) -> Self {
        Self {
            resolver,
            wallets,
            generator,
            token_id: PSF_TOKEN_ID.to_string(),
        }
    }

    /// Requires a different token for renewals.
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = token_id.into();
        self
    }

    /// Compares the record's expiration time with `now`.
    pub fn check_expiration(
        &self,
        record: &ClaimRecord,
        now: DateTime<Utc>,
    ) -> Result<(ExpirationStatus, DateTime<Utc>)> {
        let expiration_time = record
            .expiration_time()
            .ok_or_else(|| PinClaimError::MissingExpiration(record.raw.cid_or_empty().to_string()))?;

        let status = if expiration_time < now {
            ExpirationStatus::Expired
        } else {
            ExpirationStatus::NotYetExpired
        };
        Ok((status, expiration_time))
    }

    /// Token Sufficiency Checker: the wallet must hold a positive balance of the renewal token.
    pub fn check_tokens(&self, wallet: &Wallet) -> Result<TokenBalance> {
        wallet.require_token(&self.token_id)
    }

    /// Renews the claim on `cid`, paying with wallet `wallet_name`.
    pub async fn renew(&self, cid: &str, wallet_name: &str) -> Result<RenewalReceipt> {
        self.renew_at(cid, wallet_name, Utc::now()).await
    }

    /// Same as [`renew`](Self::renew) with an explicit current instant.
    pub async fn renew_at(&self, cid: &str, wallet_name: &str, now: DateTime<Utc>) -> Result<RenewalReceipt> {
        let plan = self.prepare_at(cid, wallet_name, now).await?;
        self.execute(plan).await
    }

    /// Runs every check a renewal needs without broadcasting anything.
    pub async fn prepare(&self, cid: &str, wallet_name: &str) -> Result<RenewalPlan> {
        self.prepare_at(cid, wallet_name, Utc::now()).await
    }

    /// Same as [`prepare`](Self::prepare) with an explicit current instant.
    #[instrument(skip(self, now))]
    pub async fn prepare_at(&self, cid: &str, wallet_name: &str, now: DateTime<Utc>) -> Result<RenewalPlan> {
        require_cid(cid)?;
        require_wallet_name(wallet_name)?;

        let record = self.resolver.resolve(cid).await?;
        let (status, expiration_time) = self.check_expiration(&record, now)?;
        match status {
            ExpirationStatus::Expired => debug!(%expiration_time, "Claim has expired"),
            ExpirationStatus::NotYetExpired => warn!(
                %expiration_time,
                "Pin claim has not expired yet, renewing anyway"
            ),
        }

        let wallet = self.wallets.instance_wallet(wallet_name).await?;
        let balance = self.check_tokens(&wallet)?;
        debug!(qty = balance.qty, ticker = ?balance.ticker, "Token balance sufficient");

        let file_size = record.raw.file_size.ok_or_else(|| PinClaimError::IncompleteRecord {
            cid: cid.to_string(),
            field: "fileSize",
        })?;
        let filename = match record.raw.filename.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(PinClaimError::IncompleteRecord {
                    cid: cid.to_string(),
                    field: "filename",
                })
            }
        };

        let request = PinClaimRequest {
            cid: cid.to_string(),
            filename,
            file_size_in_megabytes: renewal_megabytes(file_size),
        };

        Ok(RenewalPlan {
            cid: cid.to_string(),
            status,
            expiration_time,
            balance,
            wallet,
            request,
        })
    }

    /// Burns tokens and writes the new claim for a prepared renewal.
    #[instrument(skip(self, plan), fields(cid = %plan.cid))]
    pub async fn execute(&self, plan: RenewalPlan) -> Result<RenewalReceipt> {
        let txids = self.generator.create_pin_claim(&plan.wallet, &plan.request).await?;
        info!(pob_txid = %txids.pob_txid, claim_txid = %txids.claim_txid, "Pin claim renewed");

        Ok(RenewalReceipt {
            cid: plan.cid,
            txids,
            status: plan.status,
            expiration_time: plan.expiration_time,
            balance: plan.balance,
        })
    }
}
