//! In-process collaborators for lifecycle tests.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;

use pinclaim_core::error::{PinClaimError, Result};
use pinclaim_core::traits::{ClaimGenerator, StorageUploader, WalletProvider};
use pinclaim_core::types::{
    ClaimTxDetails, ClaimTxids, PinClaimRequest, RawClaim, TokenCategory, TokenHoldings, TokenUtxo,
    Wallet,
};
use pinclaim_core::PSF_TOKEN_ID;

pub const ADDRESS: &str = "bitcoincash:qzv3zz2trz0xgp6a96lu4m6vp2nkwag0kvg8nfhq4m";

/// A complete, unvalidated record confirmed on the ledger at `time`.
pub fn confirmed_claim(cid: &str, time: i64) -> RawClaim {
    RawClaim {
        cid: Some(cid.into()),
        filename: Some("report.pdf".into()),
        address: Some(ADDRESS.into()),
        proof_of_burn_txid: Some(format!("pob-{cid}")),
        claim_txid: Some(format!("claim-{cid}")),
        file_size: Some(2_500_000),
        claim_tx_details: Some(ClaimTxDetails {
            time: Some(time),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn wallet_with_psf(name: &str, qty: &str) -> Wallet {
    Wallet {
        name: name.into(),
        address: ADDRESS.into(),
        holdings: TokenHoldings {
            type1: TokenCategory {
                tokens: vec![TokenUtxo {
                    token_id: PSF_TOKEN_ID.into(),
                    qty_str: qty.into(),
                    ticker: Some("PSF".into()),
                }],
            },
            ..Default::default()
        },
    }
}

#[derive(Default)]
pub struct FakeUploader {
    pub cid: String,
    pub uploads: Mutex<Vec<String>>,
    pub failure: Option<String>,
}

impl FakeUploader {
    pub fn returning(cid: &str) -> Self {
        Self {
            cid: cid.into(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl StorageUploader for FakeUploader {
    async fn upload(&self, _path: &Path, filename: &str) -> Result<String> {
        self.uploads.lock().push(filename.to_string());
        match &self.failure {
            Some(message) => Err(PinClaimError::UploadFailed(message.clone())),
            None => Ok(self.cid.clone()),
        }
    }
}

#[derive(Default)]
pub struct FakeWallets {
    pub wallets: HashMap<String, Wallet>,
    pub opened: Mutex<Vec<String>>,
}

impl FakeWallets {
    pub fn with(wallet: Wallet) -> Self {
        let mut wallets = HashMap::new();
        wallets.insert(wallet.name.clone(), wallet);
        Self {
            wallets,
            ..Default::default()
        }
    }
}

#[async_trait]
impl WalletProvider for FakeWallets {
    async fn instance_wallet(&self, name: &str) -> Result<Wallet> {
        self.opened.lock().push(name.to_string());
        self.wallets
            .get(name)
            .cloned()
            .ok_or_else(|| PinClaimError::WalletError(format!("wallet '{name}' not found")))
    }
}

#[derive(Default)]
pub struct RecordingGenerator {
    pub requests: Mutex<Vec<PinClaimRequest>>,
    pub failure: Option<String>,
}

impl RecordingGenerator {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ClaimGenerator for RecordingGenerator {
    async fn create_pin_claim(&self, _wallet: &Wallet, request: &PinClaimRequest) -> Result<ClaimTxids> {
        let n = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            requests.len()
        };

        if let Some(message) = &self.failure {
            return Err(PinClaimError::ClaimGenerationFailed(message.clone()));
        }

        Ok(ClaimTxids {
            pob_txid: format!("pob-new-{n}"),
            claim_txid: format!("claim-new-{n}"),
        })
    }
}
