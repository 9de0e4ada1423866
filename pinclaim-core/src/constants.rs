//! Protocol constants for the pin claim lifecycle.
//!
//! The two megabyte scales are deliberately distinct: new uploads are sized in
//! binary megabytes while renewals size the stored byte count in decimal
//! megabytes. Both feed the fee calculation of the claim generator.

// ═══════════════════════════════════════════════════════════════════════════════
// TOKENS
// ═══════════════════════════════════════════════════════════════════════════════

/// Token id of the PSF utility token the pinning service charges in.
/// A positive balance is required before a renewal is generated.
pub const PSF_TOKEN_ID: &str = "38e97c5d7d3585a2cbf3f9580c82ca33985f9cb0845d4dcce220cb709f9538b0";

// ═══════════════════════════════════════════════════════════════════════════════
// FILE SIZE UNITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Bytes per megabyte when sizing a local file for a new pin claim (1024 * 1024).
pub const BYTES_PER_BINARY_MEGABYTE: f64 = 1_048_576.0;

/// Bytes per megabyte when sizing a stored record for a renewal (10^6).
pub const BYTES_PER_DECIMAL_MEGABYTE: f64 = 1_000_000.0;

/// Largest file accepted by the storage upload endpoint (150 MB).
pub const MAX_UPLOAD_BYTES: u64 = 150 * 1_000_000;

// ═══════════════════════════════════════════════════════════════════════════════
// CLAIM WINDOW
// ═══════════════════════════════════════════════════════════════════════════════

/// Length of a claim window in calendar years.
pub const CLAIM_PERIOD_YEARS: i32 = 1;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default pinning service base URL (also hosts the storage upload endpoint).
pub const DEFAULT_PIN_SERVICE_URL: &str = "http://localhost:5031";

/// Default wallet REST service used to sync UTXOs and token holdings.
pub const DEFAULT_WALLET_URL: &str = "https://free-bch.fullstack.cash";

/// Default signer service that broadcasts proof-of-burn and claim transactions.
pub const DEFAULT_SIGNER_URL: &str = "http://localhost:5040";

/// Default directory that local files are uploaded from.
pub const DEFAULT_FILES_DIR: &str = "files";

/// Default directory holding named wallet files.
pub const DEFAULT_WALLETS_DIR: &str = ".wallets";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
