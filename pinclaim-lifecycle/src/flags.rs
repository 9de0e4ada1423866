//! Argument presence checks, run before any I/O.

use pinclaim_core::error::{PinClaimError, Result};

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PinClaimError::MissingArgument(message.to_string()));
    }
    Ok(())
}

/// CID must be non-empty.
pub fn require_cid(cid: &str) -> Result<()> {
    require(cid, "You must specify a CID with the -c flag.")
}

/// Wallet name must be non-empty.
pub fn require_wallet_name(name: &str) -> Result<()> {
    require(name, "You must specify a wallet name with the -n flag.")
}

/// Filename must be non-empty.
pub fn require_filename(filename: &str) -> Result<()> {
    require(filename, "You must specify a filename with the -f flag.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_arguments_pass() {
        assert!(require_cid("bafy").is_ok());
        assert!(require_wallet_name("payer").is_ok());
        assert!(require_filename("a.txt").is_ok());
    }

    #[test]
    fn test_empty_arguments_fail() {
        let err = require_cid("").unwrap_err();
        assert!(matches!(err, PinClaimError::MissingArgument(_)));
        assert_eq!(err.to_string(), "You must specify a CID with the -c flag.");
        assert!(require_wallet_name("  ").is_err());
        assert!(require_filename("").is_err());
    }
}
