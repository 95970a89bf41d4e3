//! Monthly inflow / outflow / savings.

use std::collections::BTreeMap;

use cashlens_core::{MonthKey, Transaction};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashflow {
    pub month_key: MonthKey,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub savings: f64,
    /// Every row of the month, internal transfers included
    pub tx_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowSummary {
    pub average_monthly_savings: f64,
    pub average_monthly_spend: f64,
    pub months: Vec<MonthlyCashflow>,
}

#[derive(Default)]
struct MonthTotals {
    inflow: f64,
    outflow: f64,
}

/// Per-month totals with internal transfers excluded.
///
/// A month is listed only if it has a non-transfer inflow or outflow; its
/// `tx_count` still counts every row dated in that month.
pub fn compute_monthly_summary(txns: &[Transaction]) -> CashflowSummary {
    let mut totals: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();
    let mut counts: BTreeMap<MonthKey, usize> = BTreeMap::new();

    for t in txns {
        *counts.entry(t.month_key()).or_insert(0) += 1;

        if t.is_internal_transfer() {
            continue;
        }
        if t.is_inflow() {
            totals.entry(t.month_key()).or_default().inflow += t.amount();
        } else if t.is_outflow() {
            totals.entry(t.month_key()).or_default().outflow += t.abs_amount();
        }
    }

    let months: Vec<MonthlyCashflow> = totals
        .into_iter()
        .map(|(month_key, m)| MonthlyCashflow {
            month_key,
            total_inflow: m.inflow,
            total_outflow: m.outflow,
            savings: m.inflow - m.outflow,
            tx_count: counts.get(&month_key).copied().unwrap_or(0),
        })
        .collect();

    CashflowSummary {
        average_monthly_savings: mean(months.iter().map(|m| m.savings)),
        average_monthly_spend: mean(months.iter().map(|m| m.total_outflow)),
        months,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(y: i32, m: u32, d: u32, desc: &str, amount: f64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), desc, amount, "t.csv")
    }

    #[test]
    fn test_savings_excludes_transfers() {
        let txns = vec![
            txn(2024, 1, 1, "PAYROLL ACME", 3000.0),
            txn(2024, 1, 3, "COLES", -200.0),
            txn(2024, 1, 4, "TRANSFER TO SAVINGS", -1000.0),
            txn(2024, 1, 5, "TRANSFER FROM CHEQUE", 1000.0),
            txn(2024, 2, 1, "PAYROLL ACME", 3000.0),
            txn(2024, 2, 9, "RENT", -1500.0),
        ];
        let s = compute_monthly_summary(&txns);
        assert_eq!(s.months.len(), 2);

        let jan = &s.months[0];
        assert_eq!(jan.month_key.to_string(), "2024-01");
        assert_eq!(jan.total_inflow, 3000.0);
        assert_eq!(jan.total_outflow, 200.0);
        assert_eq!(jan.savings, 2800.0);
        assert_eq!(jan.tx_count, 4);

        let feb = &s.months[1];
        assert_eq!(feb.savings, 1500.0);
        assert_eq!(s.average_monthly_savings, (2800.0 + 1500.0) / 2.0);
        assert_eq!(s.average_monthly_spend, (200.0 + 1500.0) / 2.0);
    }

    #[test]
    fn test_transfer_only_month_is_not_listed() {
        let txns = vec![
            txn(2024, 1, 1, "COLES", -50.0),
            txn(2024, 2, 1, "TRANSFER TO SAVINGS", -100.0),
        ];
        let s = compute_monthly_summary(&txns);
        assert_eq!(s.months.len(), 1);
        assert_eq!(s.months[0].month_key.to_string(), "2024-01");
    }

    #[test]
    fn test_months_sorted_across_years() {
        let txns = vec![txn(2024, 1, 1, "A", -1.0), txn(2023, 12, 1, "B", -1.0)];
        let s = compute_monthly_summary(&txns);
        let keys: Vec<String> = s.months.iter().map(|m| m.month_key.to_string()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn test_empty_input() {
        let s = compute_monthly_summary(&[]);
        assert!(s.months.is_empty());
        assert_eq!(s.average_monthly_savings, 0.0);
        assert_eq!(s.average_monthly_spend, 0.0);
    }
}
