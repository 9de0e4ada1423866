//! # PinClaim Service
//!
//! Clients for the pinning service that records claim metadata and validity.
//!
//! - **Http**: talks to a running pinning service over its REST API
//! - **Memory**: in-process service for tests and offline dry runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use pinclaim_core::{PinClaimConfig, PinningService};
//! use pinclaim_service::HttpPinningService;
//!
//! let service = HttpPinningService::with_config(&PinClaimConfig::from_env())?;
//! let raw = service.get_claim("bafy...").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod http;
mod memory;

pub use http::HttpPinningService;
pub use memory::MemoryPinService;

// Re-export the trait from core
pub use pinclaim_core::traits::PinningService;
