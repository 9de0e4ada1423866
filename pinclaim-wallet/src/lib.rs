//! # PinClaim Wallet
//!
//! Adapters for the wallet module and the proof-of-burn claim generator.
//!
//! - [`ConsumerWalletProvider`]: opens a named wallet file and syncs its token
//!   UTXOs through the wallet REST service
//! - [`SignerClaimGenerator`]: asks the signer service holding the wallet keys
//!   to broadcast the proof-of-burn and claim transactions
//!
//! Keys never pass through this crate; only addresses are read from wallet files.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod consumer;
mod signer;
mod store;

pub use consumer::ConsumerWalletProvider;
pub use signer::SignerClaimGenerator;
