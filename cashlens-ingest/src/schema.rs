//! Schema inference: map an arbitrary bank CSV layout onto [`Transaction`].
//!
//! Headers are matched case-insensitively by substring, first match wins. Sign
//! handling is one of two strategies, chosen once per file by probing which
//! columns exist:
//!
//! - [`AmountStrategy::SingleAmount`]: one `amount` column, optionally with a
//!   DR/CR indicator column that overrides the sign.
//! - [`AmountStrategy::SplitDebitCredit`]: separate debit/withdrawal and
//!   credit/deposit columns, amount = credit − debit.

use cashlens_core::Transaction;
use tracing::{debug, warn};

use crate::dates::parse_date_day_first;
use crate::error::{IngestError, Result, SchemaConcept};
use crate::money::parse_money;
use crate::types::{NormalizedStatement, RawStatement};

const DATE_HINTS: &[&str] = &["date"];
const DESCRIPTION_HINTS: &[&str] = &[
    "description",
    "details",
    "narration",
    "memo",
    "payee",
    "merchant",
    "reference",
];
const AMOUNT_HINTS: &[&str] = &["amount"];
const INDICATOR_HINTS: &[&str] = &["dr/cr", "debit/credit", "dc flag", "credit/debit", "cr/dr"];
const DEBIT_HINTS: &[&str] = &["debit", "withdrawal"];
const CREDIT_HINTS: &[&str] = &["credit", "deposit"];

/// How the signed amount is read from a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountStrategy {
    SingleAmount {
        amount: usize,
        indicator: Option<usize>,
    },
    SplitDebitCredit {
        debit: Option<usize>,
        credit: Option<usize>,
    },
}

impl AmountStrategy {
    fn probe(headers: &[String]) -> Option<Self> {
        if let Some(amount) = find_column(headers, AMOUNT_HINTS) {
            return Some(AmountStrategy::SingleAmount {
                amount,
                indicator: find_column(headers, INDICATOR_HINTS),
            });
        }

        let debit = find_column(headers, DEBIT_HINTS);
        let credit = find_column(headers, CREDIT_HINTS);
        if debit.is_none() && credit.is_none() {
            return None;
        }
        Some(AmountStrategy::SplitDebitCredit { debit, credit })
    }

    fn signed_amount(&self, row: &[String]) -> f64 {
        match *self {
            AmountStrategy::SingleAmount { amount, indicator } => {
                let value = parse_money(cell(row, Some(amount)));
                match indicator {
                    Some(idx) => apply_indicator(value, cell(row, Some(idx))),
                    None => value,
                }
            }
            AmountStrategy::SplitDebitCredit { debit, credit } => {
                let debit = debit.map(|i| parse_money(cell(row, Some(i)))).unwrap_or(0.0);
                let credit = credit.map(|i| parse_money(cell(row, Some(i)))).unwrap_or(0.0);
                credit - debit
            }
        }
    }
}

/// `DR` forces the amount negative, `CR` forces it positive. CR is checked
/// last, so an indicator containing both reads as a credit.
fn apply_indicator(value: f64, indicator: &str) -> f64 {
    let flag = indicator.trim().to_uppercase();
    let mut out = value;
    if flag.contains("DR") {
        out = -out.abs();
    }
    if flag.contains("CR") {
        out = out.abs();
    }
    out
}

fn find_column(headers: &[String], hints: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let lower = h.to_lowercase();
        hints.iter().any(|k| lower.contains(k))
    })
}

fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

/// Column layout detected for one statement file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNormalizer {
    origin: String,
    date: usize,
    description: Option<usize>,
    amount: AmountStrategy,
}

impl SchemaNormalizer {
    /// Probe the headers and pick columns plus an amount strategy.
    pub fn detect(origin: &str, headers: &[String]) -> Result<Self> {
        let schema_err = |missing| IngestError::Schema {
            origin: origin.to_string(),
            missing,
            columns: headers.to_vec(),
        };

        let date = find_column(headers, DATE_HINTS).ok_or_else(|| schema_err(SchemaConcept::Date))?;

        let description = find_column(headers, DESCRIPTION_HINTS)
            .or_else(|| (0..headers.len()).find(|&i| i != date));

        let amount = AmountStrategy::probe(headers).ok_or_else(|| schema_err(SchemaConcept::Amount))?;

        debug!(
            origin,
            date_column = %headers[date],
            description_column = ?description.map(|i| &headers[i]),
            strategy = ?amount,
            "detected statement schema"
        );

        Ok(Self {
            origin: origin.to_string(),
            date,
            description,
            amount,
        })
    }

    /// Build a transaction from one row; `None` when the date does not parse.
    pub fn normalize_row(&self, row: &[String]) -> Option<Transaction> {
        let date_text = cell(row, Some(self.date));
        let Some(date) = parse_date_day_first(date_text) else {
            debug!(origin = %self.origin, date = date_text, "dropping row with unparseable date");
            return None;
        };

        Some(Transaction::new(
            date,
            cell(row, self.description),
            self.amount.signed_amount(row),
            self.origin.as_str(),
        ))
    }

    /// Normalize every row of a statement whose layout this normalizer was detected from.
    pub fn normalize_rows(&self, raw: &RawStatement) -> NormalizedStatement {
        let mut transactions = Vec::with_capacity(raw.rows.len());
        let mut dropped_rows = 0usize;

        for row in &raw.rows {
            match self.normalize_row(row) {
                Some(txn) => transactions.push(txn),
                None => dropped_rows += 1,
            }
        }

        if dropped_rows > 0 {
            warn!(
                origin = %raw.origin,
                dropped_rows,
                "rows with unparseable dates were dropped"
            );
        }

        NormalizedStatement {
            origin: raw.origin.clone(),
            transactions,
            dropped_rows,
        }
    }
}

/// Detect the schema of `raw` and normalize all its rows.
pub fn normalize(raw: &RawStatement) -> Result<NormalizedStatement> {
    let normalizer = SchemaNormalizer::detect(&raw.origin, &raw.headers)?;
    Ok(normalizer.normalize_rows(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn headers(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn raw(cols: &[&str], rows: &[&[&str]]) -> RawStatement {
        RawStatement::new("test.csv", headers(cols), rows.iter().map(|r| row(r)).collect())
    }

    #[test]
    fn test_single_amount_schema() {
        let stmt = raw(
            &["Transaction Date", "Description", "Amount"],
            &[&["01/02/2024", "NETFLIX.COM", "-15.99"], &["03/02/2024", "Payroll ACME", "$2,500.00"]],
        );
        let out = normalize(&stmt).unwrap();
        assert_eq!(out.transactions.len(), 2);
        assert_eq!(out.dropped_rows, 0);

        let first = &out.transactions[0];
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(first.merchant_key(), "NETFLIXCOM");
        assert_eq!(first.amount(), -15.99);
        assert_eq!(out.transactions[1].amount(), 2500.0);
    }

    #[test]
    fn test_indicator_column_overrides_sign() {
        let stmt = raw(
            &["Date", "Narration", "Amount", "Dr/Cr"],
            &[
                &["01/02/2024", "CAFE", "50.00", "DR"],
                &["02/02/2024", "REFUND", "50.00", "CR"],
                &["03/02/2024", "ODD", "-50.00", " cr "],
            ],
        );
        let out = normalize(&stmt).unwrap();
        let amounts: Vec<f64> = out.transactions.iter().map(|t| t.amount()).collect();
        assert_eq!(amounts, vec![-50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_indicator_with_both_flags_reads_as_credit() {
        assert_eq!(apply_indicator(20.0, "DR/CR"), 20.0);
        assert_eq!(apply_indicator(20.0, ""), 20.0);
        assert_eq!(apply_indicator(-20.0, "unknown"), -20.0);
    }

    #[test]
    fn test_split_debit_credit_schema() {
        let stmt = raw(
            &["Posting Date", "Details", "Withdrawals", "Deposits", "Balance"],
            &[
                &["05/01/2024", "WOOLWORTHS", "82.10", "", "1000"],
                &["06/01/2024", "SALARY ACME", "", "3,200.00", "4200"],
            ],
        );
        let normalizer = SchemaNormalizer::detect(&stmt.origin, &stmt.headers).unwrap();
        assert_eq!(
            normalizer.amount,
            AmountStrategy::SplitDebitCredit { debit: Some(2), credit: Some(3) }
        );

        let out = normalizer.normalize_rows(&stmt);
        assert_eq!(out.transactions[0].amount(), -82.10);
        assert_eq!(out.transactions[1].amount(), 3200.0);
    }

    #[test]
    fn test_split_with_only_debit_column() {
        let stmt = raw(&["Date", "Memo", "Debit"], &[&["05/01/2024", "RENT", "1500"]]);
        let out = normalize(&stmt).unwrap();
        assert_eq!(out.transactions[0].amount(), -1500.0);
    }

    #[test]
    fn test_amount_column_wins_over_split_columns() {
        let cols = headers(&["Date", "Payee", "Debit Amount", "Credit Amount"]);
        let normalizer = SchemaNormalizer::detect("x.csv", &cols).unwrap();
        assert_eq!(
            normalizer.amount,
            AmountStrategy::SingleAmount { amount: 2, indicator: None }
        );
    }

    #[test]
    fn test_description_falls_back_to_first_non_date_column() {
        let cols = headers(&["Value", "Date", "Amount"]);
        let normalizer = SchemaNormalizer::detect("x.csv", &cols).unwrap();
        assert_eq!(normalizer.description, Some(0));

        let cols = headers(&["Date", "Text", "Amount"]);
        let normalizer = SchemaNormalizer::detect("x.csv", &cols).unwrap();
        assert_eq!(normalizer.description, Some(1));
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let cols = headers(&["POSTED DATE", "MERCHANT NAME", "AMOUNT (AUD)"]);
        let normalizer = SchemaNormalizer::detect("x.csv", &cols).unwrap();
        assert_eq!(normalizer.date, 0);
        assert_eq!(normalizer.description, Some(1));
    }

    #[test]
    fn test_missing_date_column_is_schema_error() {
        let cols = headers(&["When", "Description", "Amount"]);
        let err = SchemaNormalizer::detect("bank.csv", &cols).unwrap_err();
        match err {
            IngestError::Schema { origin, missing, columns } => {
                assert_eq!(origin, "bank.csv");
                assert_eq!(missing, SchemaConcept::Date);
                assert_eq!(columns, cols);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_amount_columns_is_schema_error() {
        let cols = headers(&["Date", "Description", "Balance"]);
        let err = SchemaNormalizer::detect("bank.csv", &cols).unwrap_err();
        assert!(matches!(err, IngestError::Schema { missing: SchemaConcept::Amount, .. }));
    }

    #[test]
    fn test_bad_dates_are_dropped_and_counted() {
        let stmt = raw(
            &["Date", "Description", "Amount"],
            &[
                &["01/02/2024", "A", "-1"],
                &["", "B", "-2"],
                &["Opening balance", "C", "-3"],
                &["02/02/2024", "D", "-4"],
            ],
        );
        let out = normalize(&stmt).unwrap();
        assert_eq!(out.transactions.len(), 2);
        assert_eq!(out.dropped_rows, 2);
        assert_eq!(out.transactions[1].description(), "D");
    }

    #[test]
    fn test_short_rows_read_missing_cells_as_empty() {
        let stmt = raw(&["Date", "Description", "Amount"], &[&["01/02/2024", "ONLY DESC"]]);
        let out = normalize(&stmt).unwrap();
        assert_eq!(out.transactions[0].amount(), 0.0);
        assert!(!out.transactions[0].is_inflow());
        assert!(!out.transactions[0].is_outflow());
    }
}
