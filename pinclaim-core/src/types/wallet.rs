//! Wallet token holdings.
//!
//! A synced wallet reports its token UTXOs in three categories (type-1
//! fungible tokens, group tokens and NFTs). Balances are aggregated per token
//! id across all three.

use serde::{Deserialize, Serialize};

use crate::error::{PinClaimError, Result};

/// A single token UTXO held by the wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUtxo {
    /// Token id
    pub token_id: String,
    /// Quantity as a decimal string
    pub qty_str: String,
    /// Ticker symbol, if the indexer knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

impl TokenUtxo {
    /// Quantity held by this UTXO; unparseable quantities count as zero.
    pub fn quantity(&self) -> f64 {
        self.qty_str.trim().parse().unwrap_or(0.0)
    }
}

/// Token UTXOs of one category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenCategory {
    /// Token UTXOs in this category
    #[serde(default)]
    pub tokens: Vec<TokenUtxo>,
}

/// Categorized token UTXOs of a wallet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenHoldings {
    /// Fungible type-1 tokens
    #[serde(default)]
    pub type1: TokenCategory,
    /// Group tokens
    #[serde(default)]
    pub group: TokenCategory,
    /// NFTs
    #[serde(default)]
    pub nft: TokenCategory,
}

/// Aggregated balance of one token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Token id
    pub token_id: String,
    /// Ticker symbol of the first UTXO that carried one
    pub ticker: Option<String>,
    /// Total quantity
    pub qty: f64,
}

impl TokenHoldings {
    /// All token UTXOs, type-1 first, then group, then NFTs.
    pub fn merged(&self) -> impl Iterator<Item = &TokenUtxo> {
        self.type1
            .tokens
            .iter()
            .chain(self.group.tokens.iter())
            .chain(self.nft.tokens.iter())
    }

    /// Per-token balances, in order of first appearance.
    pub fn balances(&self) -> Vec<TokenBalance> {
        let mut balances: Vec<TokenBalance> = Vec::new();

        for utxo in self.merged() {
            match balances.iter_mut().find(|b| b.token_id == utxo.token_id) {
                Some(balance) => {
                    balance.qty += utxo.quantity();
                    if balance.ticker.is_none() {
                        balance.ticker = utxo.ticker.clone();
                    }
                }
                None => balances.push(TokenBalance {
                    token_id: utxo.token_id.clone(),
                    ticker: utxo.ticker.clone(),
                    qty: utxo.quantity(),
                }),
            }
        }

        balances
    }

    /// Balance of a single token, if the wallet holds any UTXO of it.
    pub fn balance_of(&self, token_id: &str) -> Option<TokenBalance> {
        self.balances().into_iter().find(|b| b.token_id == token_id)
    }
}

/// An initialized wallet, exclusively owned by the workflow that opened it.
#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
    /// Name the wallet was opened by
    pub name: String,
    /// Address that pays for and owns claims
    pub address: String,
    /// Synced token holdings
    pub holdings: TokenHoldings,
}

impl Wallet {
    /// Confirms the wallet holds a positive balance of `token_id`.
    ///
    /// A zero balance fails exactly like an absent token.
    pub fn require_token(&self, token_id: &str) -> Result<TokenBalance> {
        match self.holdings.balance_of(token_id) {
            Some(balance) if balance.qty > 0.0 => Ok(balance),
            _ => Err(PinClaimError::InsufficientFunds {
                token_id: token_id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utxo(token_id: &str, qty: &str) -> TokenUtxo {
        TokenUtxo {
            token_id: token_id.into(),
            qty_str: qty.into(),
            ticker: None,
        }
    }

    fn wallet(holdings: TokenHoldings) -> Wallet {
        Wallet {
            name: "test".into(),
            address: "bitcoincash:qz".into(),
            holdings,
        }
    }

    #[test]
    fn test_balances_merge_all_categories() {
        let holdings = TokenHoldings {
            type1: TokenCategory {
                tokens: vec![utxo("psf", "1.5"), utxo("other", "3")],
            },
            group: TokenCategory {
                tokens: vec![utxo("psf", "2")],
            },
            nft: TokenCategory {
                tokens: vec![utxo("nft-1", "1")],
            },
        };

        let balances = holdings.balances();
        assert_eq!(balances.len(), 3);
        assert_eq!(holdings.balance_of("psf").unwrap().qty, 3.5);
        assert_eq!(holdings.balance_of("nft-1").unwrap().qty, 1.0);
        assert!(holdings.balance_of("missing").is_none());
    }

    #[test]
    fn test_require_token_positive_balance() {
        let w = wallet(TokenHoldings {
            nft: TokenCategory {
                tokens: vec![utxo("psf", "0.25")],
            },
            ..Default::default()
        });
        assert_eq!(w.require_token("psf").unwrap().qty, 0.25);
    }

    #[test]
    fn test_zero_balance_fails_like_absent() {
        let zero = wallet(TokenHoldings {
            type1: TokenCategory {
                tokens: vec![utxo("psf", "0")],
            },
            ..Default::default()
        });
        let absent = wallet(TokenHoldings::default());

        let zero_err = zero.require_token("psf").unwrap_err();
        let absent_err = absent.require_token("psf").unwrap_err();
        assert!(matches!(zero_err, PinClaimError::InsufficientFunds { .. }));
        assert_eq!(zero_err.to_string(), absent_err.to_string());
    }

    #[test]
    fn test_holdings_from_wire() {
        let holdings: TokenHoldings = serde_json::from_str(
            r#"{"type1":{"tokens":[{"tokenId":"psf","qtyStr":"10","ticker":"PSF"}],"mintBatons":[]},"nft":{}}"#,
        )
        .unwrap();
        let balance = holdings.balance_of("psf").unwrap();
        assert_eq!(balance.ticker.as_deref(), Some("PSF"));
        assert_eq!(balance.qty, 10.0);
        assert!(holdings.group.tokens.is_empty());
    }
}
