//! # PinClaim Lifecycle
//!
//! Workflows that move a file from "uploaded, unclaimed" to "claimed, valid",
//! through expiration and renewal, plus repair of claims the pinning service
//! never validated.
//!
//! - [`PinStatusResolver`]: claim record for a CID, enriched with its claim window
//! - [`PinClaimOrchestrator`]: upload → proof-of-burn + claim → service notification
//! - [`RenewalCoordinator`]: status → expiration → token check → new claim
//! - [`ReprocessingCoordinator`]: list unprocessed claims and resubmit one
//!
//! Every workflow is a strict sequence: one request in flight at a time, no
//! retries, the first failure ends the workflow.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pinclaim_core::PinClaimConfig;
//! use pinclaim_lifecycle::PinClaimClient;
//!
//! let client = PinClaimClient::from_config(PinClaimConfig::from_env())?;
//! let receipt = client.orchestrator().pin_claim_file("report.pdf", "payer").await?;
//! println!("{} claimed in {}", receipt.cid, receipt.txids.claim_txid);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod flags;
mod orchestrator;
mod renewal;
mod reprocess;
mod resolver;

#[cfg(test)]
mod testing;

pub use client::PinClaimClient;
pub use flags::{require_cid, require_filename, require_wallet_name};
pub use orchestrator::PinClaimOrchestrator;
pub use renewal::{ExpirationStatus, RenewalCoordinator, RenewalPlan, RenewalReceipt};
pub use reprocess::ReprocessingCoordinator;
pub use resolver::PinStatusResolver;
