use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::InvalidTermsError;

/// 1-based position of an installment within its schedule
pub type SequenceNumber = u32;

/// installment frequency, drives both rate conversion and due-date stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Periodicity {
    /// one calendar month between due dates
    Monthly,
    /// seven calendar days between due dates
    Weekly,
}

impl Periodicity {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Periodicity::Monthly => 12,
            Periodicity::Weekly => 52,
        }
    }

    /// step a date forward by one period, `None` past the end of the calendar
    ///
    /// Monthly steps clamp to the last day of a shorter month (Jan 31 -> Feb 29).
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Periodicity::Monthly => date.checked_add_months(Months::new(1)),
            Periodicity::Weekly => date.checked_add_signed(Duration::days(7)),
        }
    }

    /// date `periods` steps after `date`, `None` past the end of the calendar
    ///
    /// Chained monthly steps only ever clamp the day downwards, so when this
    /// succeeds every intermediate due date is in range too.
    pub fn advance_by(&self, date: NaiveDate, periods: u32) -> Option<NaiveDate> {
        match self {
            Periodicity::Monthly => date.checked_add_months(Months::new(periods)),
            Periodicity::Weekly => date.checked_add_signed(Duration::days(7 * i64::from(periods))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "MONTHLY",
            Periodicity::Weekly => "WEEKLY",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = InvalidTermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MONTHLY" => Ok(Periodicity::Monthly),
            "WEEKLY" => Ok(Periodicity::Weekly),
            _ => Err(InvalidTermsError::UnsupportedPeriodicity {
                value: s.to_string(),
            }),
        }
    }
}

// accepts the same spellings as `FromStr`, so json and command line input agree
impl<'de> Deserialize<'de> for Periodicity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// loan term fields, named in validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TermsField {
    Principal,
    AnnualRatePercent,
    TenureCount,
    Periodicity,
    StartDate,
}

impl fmt::Display for TermsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermsField::Principal => "principal",
            TermsField::AnnualRatePercent => "annualRatePercent",
            TermsField::TenureCount => "tenureCount",
            TermsField::Periodicity => "periodicity",
            TermsField::StartDate => "startDate",
        };
        f.write_str(name)
    }
}

/// repayment status of a single installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstallmentStatus {
    /// nothing received yet
    Pending,
    /// some of interest or principal received
    Partial,
    /// interest and principal fully received
    Paid,
}
