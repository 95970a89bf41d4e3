//! Recurring expense detection: same merchant, roughly the same amount, across months.

use std::collections::{BTreeMap, BTreeSet};

use cashlens_core::{MacroCategory, MerchantCategory, MonthKey, Transaction};
use serde::Serialize;
use tracing::debug;

use crate::category_rules::CategoryRules;
use crate::config::AnalyzerConfig;

/// A merchant + rounded amount combination seen across multiple months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringGroup {
    pub merchant: String,
    pub rounded_amount: f64,
    pub tx_count: usize,
    pub month_count: usize,
    pub avg_amount: f64,
    pub avg_day: f64,
    pub category: MerchantCategory,
    pub macro_category: MacroCategory,
    pub estimated_monthly_cost: f64,
}

/// Round half to even at `decimals` places.
pub fn round_amount(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

#[derive(Default)]
struct GroupStats {
    rounded_amount: f64,
    tx_count: usize,
    months: BTreeSet<MonthKey>,
    amount_sum: f64,
    day_sum: u64,
}

/// Group non-transfer outflows by `(merchant_key, rounded amount)` and keep the
/// groups that meet the month and transaction thresholds.
///
/// Unmapped categories default to the Lifestyle bucket here.
pub fn detect_recurring_expenses(
    txns: &[Transaction],
    rules: &CategoryRules,
    config: &AnalyzerConfig,
) -> Vec<RecurringGroup> {
    let scale = 10f64.powi(config.amount_round_decimals as i32);
    let mut groups: BTreeMap<(String, i64), GroupStats> = BTreeMap::new();

    for t in txns.iter().filter(|t| t.is_outflow() && !t.is_internal_transfer()) {
        let rounded = round_amount(t.abs_amount(), config.amount_round_decimals);
        let key = (t.merchant_key().to_string(), (rounded * scale).round() as i64);

        let g = groups.entry(key).or_default();
        g.rounded_amount = rounded;
        g.tx_count += 1;
        g.months.insert(t.month_key());
        g.amount_sum += t.abs_amount();
        g.day_sum += u64::from(t.day_of_month());
    }

    let recurring: Vec<RecurringGroup> = groups
        .into_iter()
        .filter(|(_, g)| {
            g.months.len() >= config.recurring_min_months && g.tx_count >= config.recurring_min_tx
        })
        .map(|((merchant, _), g)| {
            let category = rules.classify(&merchant);
            let macro_category = category.macro_category().unwrap_or(MacroCategory::Lifestyle);
            let month_count = g.months.len();
            let avg_amount = g.amount_sum / g.tx_count as f64;

            RecurringGroup {
                rounded_amount: g.rounded_amount,
                tx_count: g.tx_count,
                month_count,
                avg_amount,
                avg_day: g.day_sum as f64 / g.tx_count as f64,
                category,
                macro_category,
                estimated_monthly_cost: avg_amount * g.tx_count as f64 / month_count.max(1) as f64,
                merchant,
            }
        })
        .collect();

    debug!(groups = recurring.len(), "recurring expenses detected");
    recurring
}
