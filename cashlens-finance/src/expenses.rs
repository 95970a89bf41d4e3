//! Expense rollups by micro and macro category, plus leakage hotspots.

use std::collections::{BTreeMap, BTreeSet};

use cashlens_core::{MacroCategory, MerchantCategory, MonthKey, Transaction};
use serde::Serialize;

use crate::category_rules::CategoryRules;
use crate::recurring::RecurringGroup;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroSpend {
    pub macro_category: MacroCategory,
    pub total_spend: f64,
    pub month_count: usize,
    pub avg_monthly_spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: MerchantCategory,
    pub macro_category: MacroCategory,
    pub total_spend: f64,
    pub month_count: usize,
    pub avg_monthly_spend: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub by_macro_category: Vec<MacroSpend>,
    pub by_category: Vec<CategorySpend>,
    pub recurring_essential: Vec<RecurringGroup>,
    pub recurring_lifestyle: Vec<RecurringGroup>,
    pub leakage_hotspots: Vec<RecurringGroup>,
}

#[derive(Default)]
struct SpendStats {
    total: f64,
    months: BTreeSet<MonthKey>,
}

impl SpendStats {
    fn add(&mut self, t: &Transaction) {
        self.total += t.abs_amount();
        self.months.insert(t.month_key());
    }

    fn avg_monthly(&self) -> f64 {
        self.total / self.months.len().max(1) as f64
    }
}

/// Top Lifestyle recurring charges by estimated monthly cost.
///
/// The sort is stable, so equal costs keep their input order.
pub fn leakage_hotspots(recurring: &[RecurringGroup], top_n: usize) -> Vec<RecurringGroup> {
    let mut lifestyle: Vec<RecurringGroup> = recurring
        .iter()
        .filter(|r| r.macro_category == MacroCategory::Lifestyle)
        .cloned()
        .collect();
    lifestyle.sort_by(|a, b| b.estimated_monthly_cost.total_cmp(&a.estimated_monthly_cost));
    lifestyle.truncate(top_n);
    lifestyle
}

/// Roll up non-transfer outflows and split the recurring list by macro bucket.
///
/// Unmapped categories are reported under the Unknown macro bucket here.
pub fn summarise_expenses(
    txns: &[Transaction],
    recurring: &[RecurringGroup],
    rules: &CategoryRules,
    hotspot_count: usize,
) -> ExpenseSummary {
    // keyed by label so the rollups come out alphabetically
    let mut by_macro: BTreeMap<&'static str, (MacroCategory, SpendStats)> = BTreeMap::new();
    let mut by_category: BTreeMap<&'static str, (MerchantCategory, SpendStats)> = BTreeMap::new();

    for t in txns.iter().filter(|t| t.is_outflow() && !t.is_internal_transfer()) {
        let category = rules.classify(t.merchant_key());
        let macro_category = category.macro_category().unwrap_or(MacroCategory::Unknown);

        by_category
            .entry(category.label())
            .or_insert_with(|| (category, SpendStats::default()))
            .1
            .add(t);
        by_macro
            .entry(macro_category.label())
            .or_insert_with(|| (macro_category, SpendStats::default()))
            .1
            .add(t);
    }

    let by_macro_category = by_macro
        .into_values()
        .map(|(macro_category, s)| MacroSpend {
            macro_category,
            total_spend: s.total,
            month_count: s.months.len(),
            avg_monthly_spend: s.avg_monthly(),
        })
        .collect();

    let by_category = by_category
        .into_values()
        .map(|(category, s)| CategorySpend {
            category,
            macro_category: category.macro_category().unwrap_or(MacroCategory::Unknown),
            total_spend: s.total,
            month_count: s.months.len(),
            avg_monthly_spend: s.avg_monthly(),
        })
        .collect();

    let recurring_essential = recurring
        .iter()
        .filter(|r| r.macro_category == MacroCategory::Essential)
        .cloned()
        .collect();
    let recurring_lifestyle = recurring
        .iter()
        .filter(|r| r.macro_category == MacroCategory::Lifestyle)
        .cloned()
        .collect();

    ExpenseSummary {
        by_macro_category,
        by_category,
        recurring_essential,
        recurring_lifestyle,
        leakage_hotspots: leakage_hotspots(recurring, hotspot_count),
    }
}
