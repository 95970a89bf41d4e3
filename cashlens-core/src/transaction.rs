//! Canonical transaction record produced by schema normalization.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::merchant::{is_internal_transfer, normalize_merchant};

/// Calendar year-month used as the grouping key for time-based aggregation.
///
/// Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A normalized bank transaction.
///
/// Built once from source text; derived fields are computed in [`Transaction::new`]
/// and never change afterwards, so the type only exposes accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    description: String,
    /// Positive = inflow, negative = outflow
    amount: f64,
    /// File or label the row came from
    source: String,

    month_key: MonthKey,
    merchant_key: String,
    is_internal_transfer: bool,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        source: impl Into<String>,
    ) -> Self {
        let description = description.into();
        let merchant_key = normalize_merchant(&description);
        let is_internal_transfer = is_internal_transfer(&merchant_key);

        Self {
            date,
            description,
            amount,
            source: source.into(),
            month_key: MonthKey::from_date(date),
            merchant_key,
            is_internal_transfer,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn month_key(&self) -> MonthKey {
        self.month_key
    }

    pub fn merchant_key(&self) -> &str {
        &self.merchant_key
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Returns true if money came in (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }

    /// Returns true if money went out (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_internal_transfer(&self) -> bool {
        self.is_internal_transfer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_derived_fields() {
        let t = Transaction::new(date(2024, 2, 1), "NETFLIX.COM", -15.99, "card.csv");
        assert_eq!(t.merchant_key(), "NETFLIXCOM");
        assert_eq!(t.month_key().to_string(), "2024-02");
        assert_eq!(t.day_of_month(), 1);
        assert!(t.is_outflow());
        assert!(!t.is_inflow());
        assert_eq!(t.abs_amount(), 15.99);
        assert!(!t.is_internal_transfer());
    }

    #[test]
    fn test_flow_flags_are_exclusive() {
        for amount in [-10.0, -0.01, 0.0, 0.01, 2500.0] {
            let t = Transaction::new(date(2024, 1, 5), "X", amount, "a.csv");
            if amount == 0.0 {
                assert!(!t.is_inflow() && !t.is_outflow());
            } else {
                assert!(t.is_inflow() ^ t.is_outflow());
            }
        }
    }

    #[test]
    fn test_transfer_flag_from_description() {
        let t = Transaction::new(date(2024, 3, 9), "Transfer to Savings", -200.0, "a.csv");
        assert!(t.is_internal_transfer());
    }

    #[test]
    fn test_month_key_ordering_and_serde() {
        let dec = MonthKey { year: 2023, month: 12 };
        let jan = MonthKey { year: 2024, month: 1 };
        assert!(dec < jan);
        assert_eq!(MonthKey::from_date(date(2023, 12, 31)), dec);
        assert_eq!(serde_json::to_string(&jan).unwrap(), "\"2024-01\"");
    }

    #[test]
    fn test_serialized_transaction_keeps_origin() {
        let t = Transaction::new(date(2024, 2, 1), "NETFLIX.COM", -15.99, "card.csv");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["source"], "card.csv");
        assert_eq!(json["month_key"], "2024-02");
        assert_eq!(json["merchant_key"], "NETFLIXCOM");
    }
}
