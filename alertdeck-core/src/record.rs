//! Alert record model
//!
//! Global invariants enforced:
//! - The reason category set is closed (exactly six variants)
//! - Calendar fields are derived from the timestamp, never stored

use anyhow::Result;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of alert reason categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    #[serde(rename = "SWIFT High-Risk")]
    SwiftHighRisk,
    #[serde(rename = "Missing Approval")]
    MissingApproval,
    #[serde(rename = "Extreme Risk")]
    ExtremeRisk,
    #[serde(rename = "Unusual Transaction")]
    UnusualTransaction,
    #[serde(rename = "Expired Documentation")]
    ExpiredDocumentation,
    #[serde(rename = "Pending Signature")]
    PendingSignature,
}

impl Reason {
    /// All categories in sampling order
    pub const ALL: [Reason; 6] = [
        Reason::SwiftHighRisk,
        Reason::MissingApproval,
        Reason::ExtremeRisk,
        Reason::UnusualTransaction,
        Reason::ExpiredDocumentation,
        Reason::PendingSignature,
    ];

    /// Sampling weights in percent, aligned with `ALL` (sums to 100)
    pub const WEIGHTS_PERCENT: [u32; 6] = [10, 20, 5, 30, 20, 15];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::SwiftHighRisk => "SWIFT High-Risk",
            Reason::MissingApproval => "Missing Approval",
            Reason::ExtremeRisk => "Extreme Risk",
            Reason::UnusualTransaction => "Unusual Transaction",
            Reason::ExpiredDocumentation => "Expired Documentation",
            Reason::PendingSignature => "Pending Signature",
        }
    }

    /// Whether this category counts as critical for KPI purposes
    /// (label contains "Risk", matching the live-loop base metric)
    pub fn is_critical(&self) -> bool {
        self.as_str().contains("Risk")
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamp truncated to year + month granularity, used as a grouping key
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        MonthPeriod { year, month }
    }

    /// Derive the month period from a timestamp
    pub fn from_timestamp(ts: &DateTime<Utc>) -> Self {
        MonthPeriod {
            year: ts.year(),
            month: ts.month(),
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = anyhow::Error;

    /// Parse a `YYYY-MM` month period string
    fn from_str(s: &str) -> Result<Self> {
        let (year_str, month_str) = s
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("invalid month period '{}' (expected YYYY-MM)", s))?;
        let year: i32 = year_str
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid year in month period '{}'", s))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid month in month period '{}'", s))?;
        if !(1..=12).contains(&month) {
            anyhow::bail!("month in '{}' must be between 01 and 12", s);
        }
        Ok(MonthPeriod { year, month })
    }
}

/// One synthetic alert event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AlertRecord {
    pub timestamp: DateTime<Utc>,
    pub reason: Reason,
}

impl AlertRecord {
    /// Calendar year of the event
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Year + month grouping key of the event
    pub fn month_period(&self) -> MonthPeriod {
        MonthPeriod::from_timestamp(&self.timestamp)
    }

    /// English month name (fixed locale for deterministic output)
    pub fn month_name(&self) -> &'static str {
        match self.timestamp.month() {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }

    /// Display string in `DD/MM/YYYY HH:MM:SS` form
    pub fn formatted(&self) -> String {
        format!(
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}",
            self.timestamp.day(),
            self.timestamp.month(),
            self.timestamp.year(),
            self.timestamp.hour(),
            self.timestamp.minute(),
            self.timestamp.second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reason_labels_are_closed_set() {
        let labels: Vec<&str> = Reason::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "SWIFT High-Risk",
                "Missing Approval",
                "Extreme Risk",
                "Unusual Transaction",
                "Expired Documentation",
                "Pending Signature",
            ]
        );
    }

    #[test]
    fn test_weights_sum_to_100() {
        assert_eq!(Reason::WEIGHTS_PERCENT.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_critical_reasons() {
        assert!(Reason::SwiftHighRisk.is_critical());
        assert!(Reason::ExtremeRisk.is_critical());
        assert!(!Reason::MissingApproval.is_critical());
        assert!(!Reason::UnusualTransaction.is_critical());
        assert!(!Reason::ExpiredDocumentation.is_critical());
        assert!(!Reason::PendingSignature.is_critical());
    }

    #[test]
    fn test_month_period_display_and_parse() {
        let period = MonthPeriod::new(2025, 6);
        assert_eq!(period.to_string(), "2025-06");
        let parsed: MonthPeriod = "2025-06".parse().unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_month_period_parse_rejects_bad_input() {
        assert!("2025".parse::<MonthPeriod>().is_err());
        assert!("2025-13".parse::<MonthPeriod>().is_err());
        assert!("2025-00".parse::<MonthPeriod>().is_err());
        assert!("abcd-01".parse::<MonthPeriod>().is_err());
    }

    #[test]
    fn test_month_period_ordering() {
        let a = MonthPeriod::new(2024, 12);
        let b = MonthPeriod::new(2025, 1);
        assert!(a < b);
    }

    #[test]
    fn test_derived_fields_consistent_with_timestamp() {
        let record = AlertRecord {
            timestamp: Utc.with_ymd_and_hms(2023, 4, 7, 13, 5, 9).unwrap(),
            reason: Reason::PendingSignature,
        };
        assert_eq!(record.year(), 2023);
        assert_eq!(record.month_period(), MonthPeriod::new(2023, 4));
        assert_eq!(record.month_name(), "April");
        assert_eq!(record.formatted(), "07/04/2023 13:05:09");
    }
}
