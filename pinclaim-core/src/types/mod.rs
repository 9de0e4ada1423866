//! Domain types for the pin claim lifecycle.
//!
//! - [`RawClaim`] / [`ClaimRecord`]: claim metadata as stored by the pinning service
//! - [`ClaimWindow`]: claim time and one-year expiration derived from the ledger
//! - [`TokenHoldings`] / [`Wallet`]: token balances of an initialized wallet
//! - size helpers: megabyte scales used for fee sizing

mod claim;
mod size;
mod wallet;
pub mod window;

pub use claim::*;
pub use size::*;
pub use wallet::*;
pub use window::ClaimWindow;
