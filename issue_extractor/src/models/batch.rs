use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The logical day a pipeline run operates on.
///
/// This is the single partition key threading through all three stages:
/// the object-store key, the landing rows, and the fact rows are all scoped
/// by it, and every stage fully replaces its own artifacts for the date on
/// re-run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchDate(NaiveDate);

impl BatchDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The upstream `since` filter value for this date: midnight UTC.
    ///
    /// This captures anything *updated* on or after the date start, not
    /// strictly records created within the day. The downstream
    /// delete-then-replace design relies on exactly this behavior, so it is
    /// kept as-is.
    pub fn since_timestamp(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }
}

impl fmt::Display for BatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for BatchDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}
