//! File size conversions used for fee sizing.

use crate::constants::{BYTES_PER_BINARY_MEGABYTE, BYTES_PER_DECIMAL_MEGABYTE};

/// Size of a local file being claimed for the first time (bytes / 1,048,576).
pub fn upload_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_BINARY_MEGABYTE
}

/// Size of an already stored file being renewed (bytes / 1,000,000).
pub fn renewal_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_DECIMAL_MEGABYTE
}
