//! Analysis windows
//!
//! A window is a closed-open range `[start, end)` of UTC instants. Callers
//! usually resolve a calendar month ("2026-03") or a trailing period into one.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest trailing window accepted from config (about a century)
pub const MAX_TRAILING_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SpendingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year-month`, from its first instant up to the first
    /// instant of the following month
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{:02}", year, month)))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| Error::InvalidData(format!("Month out of range: {}-{:02}", year, month)))?;

        Self::new(start_of_day(first), start_of_day(next))
    }

    /// Parse a `YYYY-MM` string into a month window
    pub fn parse_month(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("Invalid month '{}' (use YYYY-MM)", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Self::month(year, month)
    }

    /// The `days` days leading up to (and excluding) `now`
    pub fn trailing_days(now: DateTime<Utc>, days: u32) -> Result<Self> {
        let out_of_range =
            || Error::InvalidData(format!("Trailing window of {} days is out of range", days));

        let span = Duration::try_days(i64::from(days)).ok_or_else(out_of_range)?;
        let start = now.checked_sub_signed(span).ok_or_else(out_of_range)?;
        Self::new(start, now)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Closed-open membership test
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}
