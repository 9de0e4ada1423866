//! Wallet provider backed by the wallet REST service.
//!
//! Opening a wallet reads its address from the wallet store, then syncs the
//! address's token UTXOs with `POST /bch/utxos`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::WalletProvider;
use pinclaim_core::types::{TokenHoldings, Wallet};
use pinclaim_core::PinClaimConfig;

use crate::store::WalletStore;

/// Opens wallets from disk and syncs them through the wallet REST service.
pub struct ConsumerWalletProvider {
    store: WalletStore,
    utxos_url: String,
    http_client: reqwest::Client,
}

impl ConsumerWalletProvider {
    /// Creates a provider using the wallets directory and wallet URL from `config`.
    pub fn with_config(config: &PinClaimConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PinClaimError::ConfigError(e.to_string()))?;

        Ok(Self {
            store: WalletStore::new(&config.wallets_dir),
            utxos_url: config.wallet_endpoint("/bch/utxos"),
            http_client,
        })
    }

    /// Fetches the categorized token UTXOs of `address`.
    #[instrument(skip(self))]
    pub async fn sync_holdings(&self, address: &str) -> Result<TokenHoldings> {
        let response = self
            .http_client
            .post(&self.utxos_url)
            .json(&UtxosRequest { address })
            .send()
            .await
            .map_err(|e| PinClaimError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PinClaimError::WalletError(format!(
                "UTXO sync failed with status {}: {}",
                status, text
            )));
        }

        let entries: Vec<AddressUtxos> = response
            .json()
            .await
            .map_err(|e| PinClaimError::WalletError(e.to_string()))?;

        let holdings = entries
            .into_iter()
            .find(|entry| entry.address.as_deref().map_or(true, |a| a == address))
            .map(|entry| entry.slp_utxos)
            .unwrap_or_default();

        debug!(tokens = holdings.merged().count(), "Synced token UTXOs");
        Ok(holdings)
    }
}

#[async_trait]
impl WalletProvider for ConsumerWalletProvider {
    #[instrument(skip(self))]
    async fn instance_wallet(&self, name: &str) -> Result<Wallet> {
        let file = self.store.load(name).await?;
        let address = file.wallet.cash_address;
        let holdings = self.sync_holdings(&address).await?;

        Ok(Wallet {
            name: name.to_string(),
            address,
            holdings,
        })
    }
}

#[derive(Debug, Serialize)]
struct UtxosRequest<'a> {
    address: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressUtxos {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    slp_utxos: TokenHoldings,
}
