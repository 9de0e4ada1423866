//! Claim records as known by the pinning service.
//!
//! The service returns loosely shaped JSON. [`RawClaim`] keeps every field
//! optional and preserves unknown fields so a record can be displayed or
//! replayed without losing data. A known field whose value has an unexpected
//! type is kept verbatim with the unknown fields instead of failing the whole
//! record. [`ClaimRecord`] adds the derived claim window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{PinClaimError, Result};
use crate::types::window::ClaimWindow;

/// Validity of a claim as decided by the pinning service.
///
/// On the wire this is `null`, `true` or `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Option<bool>")]
pub enum ClaimValidity {
    /// Not yet checked against the ledger
    #[default]
    Unvalidated,
    /// Checked and accepted
    Valid,
    /// Checked and rejected
    Invalid,
}

impl ClaimValidity {
    /// Unprocessed claims are the only candidates for reprocessing.
    pub fn is_unprocessed(self) -> bool {
        match self {
            ClaimValidity::Unvalidated => true,
            ClaimValidity::Valid | ClaimValidity::Invalid => false,
        }
    }
}

impl From<Option<bool>> for ClaimValidity {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => ClaimValidity::Unvalidated,
            Some(true) => ClaimValidity::Valid,
            Some(false) => ClaimValidity::Invalid,
        }
    }
}

impl From<ClaimValidity> for Option<bool> {
    fn from(value: ClaimValidity) -> Self {
        match value {
            ClaimValidity::Unvalidated => None,
            ClaimValidity::Valid => Some(true),
            ClaimValidity::Invalid => Some(false),
        }
    }
}

/// Ledger details of the claim transaction.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClaimTxDetails {
    /// Ledger-confirmed UNIX time; absent until the transaction confirms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Remaining transaction details, kept for display
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for ClaimTxDetails {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            time: take(&mut fields, "time", whole_seconds),
            extra: fields,
        }
    }
}

impl<'de> Deserialize<'de> for ClaimTxDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}

/// A claim record exactly as returned by the pinning service.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClaim {
    /// Content identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// Display name chosen by the uploader
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Wallet address that paid for the claim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Proof-of-burn transaction id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_of_burn_txid: Option<String>,
    /// Claim transaction id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_txid: Option<String>,
    /// Stored file size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Ledger details of the claim transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_tx_details: Option<ClaimTxDetails>,
    /// Validity flag owned by the pinning service; anything but `true`/`false` is unvalidated
    pub valid_claim: ClaimValidity,
    /// Any other fields the service sent, plus known fields of an unexpected type
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawClaim {
    /// Ledger-confirmed claim time in seconds, when the claim has confirmed.
    pub fn ledger_time(&self) -> Option<i64> {
        self.claim_tx_details.as_ref().and_then(|details| details.time)
    }

    /// CID for messages, or an empty string when the service omitted it.
    pub fn cid_or_empty(&self) -> &str {
        self.cid.as_deref().unwrap_or_default()
    }
}

impl From<Map<String, Value>> for RawClaim {
    fn from(mut fields: Map<String, Value>) -> Self {
        let valid_claim: ClaimValidity = fields
            .remove("validClaim")
            .and_then(|v| v.as_bool())
            .into();

        Self {
            cid: take(&mut fields, "cid", text),
            filename: take(&mut fields, "filename", text),
            address: take(&mut fields, "address", text),
            proof_of_burn_txid: take(&mut fields, "proofOfBurnTxid", text),
            claim_txid: take(&mut fields, "claimTxid", text),
            file_size: take(&mut fields, "fileSize", whole_bytes),
            claim_tx_details: take(&mut fields, "claimTxDetails", |v| {
                v.as_object().cloned().map(ClaimTxDetails::from)
            }),
            valid_claim,
            extra: fields,
        }
    }
}

impl<'de> Deserialize<'de> for RawClaim {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}

/// Removes `key` from `fields` only when `convert` accepts its value.
fn take<T>(fields: &mut Map<String, Value>, key: &str, convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let converted = convert(fields.get(key)?)?;
    fields.remove(key);
    Some(converted)
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Accepts integers, floats (truncated) and numeric strings.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n.trunc())
}

fn whole_seconds(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| number(value).map(|n| n as i64))
}

fn whole_bytes(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| number(value).filter(|n| *n >= 0.0).map(|n| n as u64))
}

/// A claim record enriched with its claim window.
///
/// `claimTime` and `expirationTime` are present together, and only when the
/// claim transaction has a ledger time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClaimRecord {
    /// The record as returned by the pinning service
    #[serde(flatten)]
    pub raw: RawClaim,
    /// Derived claim window
    #[serde(flatten)]
    pub window: Option<ClaimWindow>,
}

impl ClaimRecord {
    /// Enriches a raw record with its claim window.
    pub fn from_raw(mut raw: RawClaim) -> Self {
        // Derived fields are always recomputed, never trusted from upstream.
        raw.extra.remove("claimTime");
        raw.extra.remove("expirationTime");

        let window = raw.ledger_time().and_then(ClaimWindow::from_ledger_seconds);
        Self { raw, window }
    }

    /// Claim time as an ISO-8601 string.
    pub fn claim_time_iso(&self) -> Option<String> {
        self.window.map(|w| w.claim_time_iso())
    }

    /// Expiration time as an ISO-8601 string.
    pub fn expiration_time_iso(&self) -> Option<String> {
        self.window.map(|w| w.expiration_time_iso())
    }

    /// Expiration time, when derivable.
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.window.map(|w| w.expiration_time)
    }

    /// `Some(true)` once expired, `None` when no window can be derived.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> Option<bool> {
        self.window.map(|w| w.is_expired_at(now))
    }
}

/// Body posted to the pinning service to record a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSubmission {
    /// Content identifier
    pub cid: String,
    /// Display name
    pub filename: String,
    /// Claim transaction id
    pub claim_txid: String,
    /// Proof-of-burn transaction id
    pub proof_of_burn_txid: String,
    /// Address that paid for the claim
    pub address: String,
}

impl ClaimSubmission {
    /// Rebuilds a submission from an existing record, requiring every identity field.
    pub fn from_raw(raw: &RawClaim) -> Result<Self> {
        let cid = raw.cid_or_empty().to_string();
        let require = |value: &Option<String>, field: &'static str| -> Result<String> {
            match value.as_deref() {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(PinClaimError::IncompleteRecord {
                    cid: cid.clone(),
                    field,
                }),
            }
        };

        Ok(Self {
            cid: require(&raw.cid, "cid")?,
            filename: require(&raw.filename, "filename")?,
            claim_txid: require(&raw.claim_txid, "claimTxid")?,
            proof_of_burn_txid: require(&raw.proof_of_burn_txid, "proofOfBurnTxid")?,
            address: require(&raw.address, "address")?,
        })
    }
}

/// Transaction ids returned by one claim generation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTxids {
    /// Proof-of-burn transaction id
    #[serde(rename = "pobTxid")]
    pub pob_txid: String,
    /// Claim transaction id
    #[serde(rename = "claimTxid")]
    pub claim_txid: String,
}

/// Parameters for generating a proof-of-burn and claim transaction pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinClaimRequest {
    /// Content identifier being claimed
    pub cid: String,
    /// Display name
    pub filename: String,
    /// File size used for fee sizing
    pub file_size_in_megabytes: f64,
}

/// Identity of a newly claimed file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    /// Content identifier assigned by the storage network
    pub cid: String,
    /// Ledger transaction ids
    #[serde(flatten)]
    pub txids: ClaimTxids,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawClaim {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validity_from_wire() {
        assert_eq!(raw(json!({ "validClaim": null })).valid_claim, ClaimValidity::Unvalidated);
        assert_eq!(raw(json!({ "validClaim": true })).valid_claim, ClaimValidity::Valid);
        assert_eq!(raw(json!({ "validClaim": false })).valid_claim, ClaimValidity::Invalid);
        assert_eq!(raw(json!({})).valid_claim, ClaimValidity::Unvalidated);
    }

    #[test]
    fn test_only_unvalidated_is_unprocessed() {
        assert!(ClaimValidity::Unvalidated.is_unprocessed());
        assert!(!ClaimValidity::Valid.is_unprocessed());
        assert!(!ClaimValidity::Invalid.is_unprocessed());
    }

    #[test]
    fn test_record_without_ledger_time_has_no_window() {
        for value in [
            json!({ "cid": "a" }),
            json!({ "cid": "a", "claimTxDetails": {} }),
            json!({ "cid": "a", "claimTxDetails": { "time": null } }),
        ] {
            let record = ClaimRecord::from_raw(raw(value));
            assert!(record.window.is_none());
            let out = serde_json::to_value(&record).unwrap();
            assert!(out.get("claimTime").is_none());
            assert!(out.get("expirationTime").is_none());
        }
    }

    #[test]
    fn test_record_with_ledger_time_is_enriched() {
        let record = ClaimRecord::from_raw(raw(json!({
            "cid": "bafy",
            "claimTxDetails": { "time": 1700000000, "blockhash": "00ab" },
            "dataPinned": true
        })));
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["claimTime"], "2023-11-14T22:13:20.000Z");
        assert_eq!(out["expirationTime"], "2024-11-14T22:13:20.000Z");
        assert_eq!(out["dataPinned"], true);
        assert_eq!(out["claimTxDetails"]["blockhash"], "00ab");
        assert_eq!(out["validClaim"], Value::Null);
    }

    #[test]
    fn test_upstream_derived_fields_are_ignored() {
        let record = ClaimRecord::from_raw(raw(json!({
            "cid": "bafy",
            "expirationTime": "2099-01-01T00:00:00.000Z"
        })));
        assert!(record.expiration_time().is_none());
        let out = serde_json::to_value(&record).unwrap();
        assert!(out.get("expirationTime").is_none());
    }

    #[test]
    fn test_submission_requires_identity_fields() {
        let complete = raw(json!({
            "cid": "bafy",
            "filename": "a.txt",
            "address": "bitcoincash:qz",
            "proofOfBurnTxid": "pob",
            "claimTxid": "claim"
        }));
        let submission = ClaimSubmission::from_raw(&complete).unwrap();
        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["proofOfBurnTxid"], "pob");
        assert_eq!(body["claimTxid"], "claim");

        let partial = raw(json!({ "cid": "bafy", "filename": "a.txt" }));
        match ClaimSubmission::from_raw(&partial) {
            Err(PinClaimError::IncompleteRecord { cid, field }) => {
                assert_eq!(cid, "bafy");
                assert_eq!(field, "claimTxid");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_string_file_size_is_read() {
        let claim = raw(json!({ "cid": "bafy", "fileSize": "1000000" }));
        assert_eq!(claim.cid.as_deref(), Some("bafy"));
        assert_eq!(claim.file_size, Some(1_000_000));
    }

    #[test]
    fn test_float_ledger_time_is_truncated() {
        let record = ClaimRecord::from_raw(raw(json!({ "claimTxDetails": { "time": 1700000000.0 } })));
        assert_eq!(record.raw.ledger_time(), Some(1_700_000_000));
        assert_eq!(record.claim_time_iso().as_deref(), Some("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn test_mistyped_fields_are_kept_verbatim() {
        let claim = raw(json!({
            "cid": "bafy",
            "claimTxDetails": "pending",
            "fileSize": { "bytes": 10 },
            "filename": 42,
            "validClaim": "maybe"
        }));
        assert!(claim.claim_tx_details.is_none());
        assert!(claim.file_size.is_none());
        assert!(claim.filename.is_none());
        assert_eq!(claim.valid_claim, ClaimValidity::Unvalidated);

        let out = serde_json::to_value(ClaimRecord::from_raw(claim)).unwrap();
        assert_eq!(out["claimTxDetails"], "pending");
        assert_eq!(out["fileSize"], json!({ "bytes": 10 }));
        assert_eq!(out["filename"], 42);
        assert_eq!(out["validClaim"], Value::Null);
        assert!(out.get("claimTime").is_none());
    }

    #[test]
    fn test_non_numeric_ledger_time_has_no_window() {
        let record = ClaimRecord::from_raw(raw(json!({ "claimTxDetails": { "time": "soon" } })));
        assert!(record.window.is_none());
        assert_eq!(record.raw.claim_tx_details.unwrap().extra["time"], "soon");
    }

    #[test]
    fn test_receipt_shape() {
        let receipt = ClaimReceipt {
            cid: "bafy".into(),
            txids: ClaimTxids {
                pob_txid: "pob".into(),
                claim_txid: "claim".into(),
            },
        };
        assert_eq!(
            serde_json::to_value(&receipt).unwrap(),
            json!({ "cid": "bafy", "pobTxid": "pob", "claimTxid": "claim" })
        );
    }
}
