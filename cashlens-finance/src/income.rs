//! Income source grouping and salary / side-gig classification.

use std::collections::{BTreeMap, BTreeSet};

use cashlens_core::{IncomeType, MacroCategory, MonthKey, Transaction};
use serde::Serialize;
use tracing::debug;

use crate::config::IncomeRules;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeSource {
    pub merchant: String,
    pub tx_count: usize,
    pub month_count: usize,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub avg_monthly_amount: f64,
    pub income_type: IncomeType,
    pub macro_category: MacroCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeSummary {
    pub sources: Vec<IncomeSource>,
    pub total_avg_monthly_income: f64,
}

#[derive(Default)]
struct SourceStats {
    tx_count: usize,
    months: BTreeSet<MonthKey>,
    total: f64,
}

/// Decide what kind of income a grouped inflow stream is.
///
/// In order: employer keyword match, salary keywords with enough history and
/// volume, small average amounts as side gigs, everything else as other income.
pub fn classify_income(
    merchant_key: &str,
    tx_count: usize,
    month_count: usize,
    total_amount: f64,
    employer_keyword: &str,
    rules: &IncomeRules,
) -> IncomeType {
    let employer = employer_keyword.trim().to_uppercase();
    if !employer.is_empty() && merchant_key.contains(&employer) {
        return IncomeType::Salary;
    }

    let salary_like = rules
        .salary_keywords
        .iter()
        .any(|k| merchant_key.contains(k.to_uppercase().as_str()));
    if salary_like
        && month_count >= rules.salary_min_months
        && tx_count >= rules.salary_min_tx
        && total_amount >= rules.salary_min_total
    {
        return IncomeType::Salary;
    }

    let avg_amount = if tx_count == 0 { 0.0 } else { total_amount / tx_count as f64 };
    if avg_amount < rules.side_gig_max_avg && tx_count >= 1 {
        return IncomeType::SideGig;
    }

    IncomeType::Other
}

/// Group non-transfer inflows by merchant key and classify each source.
pub fn summarise_income_sources(
    txns: &[Transaction],
    employer_keyword: &str,
    rules: &IncomeRules,
) -> IncomeSummary {
    let mut groups: BTreeMap<&str, SourceStats> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_inflow() && !t.is_internal_transfer()) {
        let g = groups.entry(t.merchant_key()).or_default();
        g.tx_count += 1;
        g.months.insert(t.month_key());
        g.total += t.amount();
    }

    let sources: Vec<IncomeSource> = groups
        .into_iter()
        .map(|(merchant, g)| {
            let month_count = g.months.len();
            IncomeSource {
                merchant: merchant.to_string(),
                tx_count: g.tx_count,
                month_count,
                total_amount: g.total,
                avg_amount: g.total / g.tx_count as f64,
                avg_monthly_amount: g.total / month_count.max(1) as f64,
                income_type: classify_income(
                    merchant,
                    g.tx_count,
                    month_count,
                    g.total,
                    employer_keyword,
                    rules,
                ),
                macro_category: MacroCategory::Income,
            }
        })
        .collect();

    let total_avg_monthly_income: f64 = sources.iter().map(|s| s.avg_monthly_amount).sum();
    debug!(sources = sources.len(), total_avg_monthly_income, "income sources grouped");

    IncomeSummary {
        sources,
        total_avg_monthly_income,
    }
}
