//! Claim window calculation.
//!
//! A claim is valid for one calendar year from the ledger-confirmed time of its
//! claim transaction. The year is added on the calendar, so the window keeps the
//! same month, day and time of day; a claim confirmed on 29 February expires on
//! 1 March of the following year.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::constants::CLAIM_PERIOD_YEARS;

/// Claim time and expiration time derived from a confirmed claim transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimWindow {
    /// Ledger-confirmed time of the claim transaction
    #[serde(serialize_with = "serialize_iso")]
    pub claim_time: DateTime<Utc>,
    /// End of the claim window
    #[serde(serialize_with = "serialize_iso")]
    pub expiration_time: DateTime<Utc>,
}

impl ClaimWindow {
    /// Derives the window from a ledger timestamp in UNIX seconds.
    ///
    /// Returns `None` when the timestamp is outside the representable range.
    pub fn from_ledger_seconds(seconds: i64) -> Option<Self> {
        let claim_time = DateTime::from_timestamp(seconds, 0)?;
        let expiration_time = add_calendar_years(claim_time, CLAIM_PERIOD_YEARS)?;
        Some(Self {
            claim_time,
            expiration_time,
        })
    }

    /// Returns true once `now` is past the expiration time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time < now
    }

    /// Claim time as an ISO-8601 string with millisecond precision.
    pub fn claim_time_iso(&self) -> String {
        format_iso(self.claim_time)
    }

    /// Expiration time as an ISO-8601 string with millisecond precision.
    pub fn expiration_time_iso(&self) -> String {
        format_iso(self.expiration_time)
    }
}

/// Adds whole calendar years, rolling 29 February over to 1 March.
pub fn add_calendar_years(time: DateTime<Utc>, years: i32) -> Option<DateTime<Utc>> {
    let year = time.year().checked_add(years)?;
    if let Some(shifted) = time.with_year(year) {
        return Some(shifted);
    }

    // Only 29 February lands here: the target year has no such day.
    let rolled = NaiveDate::from_ymd_opt(year, 3, 1)?.and_time(time.time());
    Some(rolled.and_utc())
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso(*time))
}
