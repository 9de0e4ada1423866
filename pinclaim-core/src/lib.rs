//! # PinClaim Core
//!
//! Core types, errors, and traits for the pin claim lifecycle.
//!
//! This crate provides the foundational building blocks used by all other pinclaim crates:
//!
//! - **Types**: Claim records, validity flag, claim windows, token holdings
//! - **Errors**: The error taxonomy shared by every workflow
//! - **Constants**: Token ids, size units, service defaults
//! - **Traits**: Contracts for the storage, pinning, wallet and ledger collaborators
//! - **Config**: Explicit configuration passed into every client
//!
//! ## Example
//!
//! ```rust
//! use pinclaim_core::{ClaimRecord, RawClaim};
//!
//! let raw: RawClaim = serde_json::from_str(
//!     r#"{"cid":"bafy","claimTxDetails":{"time":1700000000},"validClaim":null}"#,
//! ).unwrap();
//! let record = ClaimRecord::from_raw(raw);
//! assert_eq!(record.claim_time_iso().as_deref(), Some("2023-11-14T22:13:20.000Z"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::PinClaimConfig;
pub use constants::*;
pub use error::{PinClaimError, Result};
pub use traits::*;
pub use types::*;
