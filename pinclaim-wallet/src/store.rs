//! Named wallet files.
//!
//! Each wallet lives in `<wallets_dir>/<name>.json`:
//!
//! ```json
//! { "wallet": { "cashAddress": "bitcoincash:..." } }
//! ```
//!
//! Only the cash address is read. Other fields (mnemonic, keys, SLP address,
//! description) are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use pinclaim_core::error::{PinClaimError, Result};

/// Public part of a stored wallet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WalletInfo {
    /// Cash address that pays for claims
    pub cash_address: String,
}

/// A wallet file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct WalletFile {
    pub wallet: WalletInfo,
}

/// Directory of named wallet files.
#[derive(Clone, Debug)]
pub(crate) struct WalletStore {
    dir: PathBuf,
}

impl WalletStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the wallet file for `name`.
    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Loads the wallet called `name`.
    #[instrument(skip(self))]
    pub async fn load(&self, name: &str) -> Result<WalletFile> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(PinClaimError::WalletError(format!("invalid wallet name '{}'", name)));
        }

        let path = self.path_for(name);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                PinClaimError::WalletError(format!("wallet '{}' not found at {}", name, path.display()))
            }
            _ => PinClaimError::IoError(e),
        })?;

        let file: WalletFile = serde_json::from_slice(&bytes)
            .map_err(|e| PinClaimError::WalletError(format!("wallet '{}' is unreadable: {}", name, e)))?;

        debug!(address = %file.wallet.cash_address, "Loaded wallet file");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WALLET_JSON: &str = r#"{
        "wallet": {
            "mnemonic": "ignored words",
            "cashAddress": "bitcoincash:qzv3zz2trz0xgp6a96lu4m6vp2nkwag0kvg8nfhq4m",
            "slpAddress": "simpleledger:qzv3zz2trz0xgp6a96lu4m6vp2nkwag0kvgzm2rlny"
        },
        "description": "pin payments"
    }"#;

    #[tokio::test]
    async fn test_load_wallet() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("alice.json"), WALLET_JSON).unwrap();

        let store = WalletStore::new(dir.path());
        let file = store.load("alice").await.unwrap();
        assert_eq!(
            file.wallet.cash_address,
            "bitcoincash:qzv3zz2trz0xgp6a96lu4m6vp2nkwag0kvg8nfhq4m"
        );
    }

    #[tokio::test]
    async fn test_missing_wallet() {
        let dir = tempdir().unwrap();
        let store = WalletStore::new(dir.path());
        let err = store.load("nobody").await.unwrap_err();
        assert!(matches!(err, PinClaimError::WalletError(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_like_names() {
        let store = WalletStore::new("/tmp");
        assert!(store.load("../etc/passwd").await.is_err());
        assert!(store.load("").await.is_err());
    }
}
