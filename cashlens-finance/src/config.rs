//! Analyzer thresholds. Defaults reproduce the reference behaviour.

use serde::{Deserialize, Serialize};

use crate::category_rules::{CategoryRule, CategoryRules};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Distinct months a merchant+amount pair must span to count as recurring
    pub recurring_min_months: usize,
    /// Transactions a merchant+amount pair needs to count as recurring
    pub recurring_min_tx: usize,
    /// Decimal places of the recurring amount key (0 = whole currency unit)
    pub amount_round_decimals: u32,
    /// Length of the leakage hotspot list
    pub hotspot_count: usize,
    /// Number of statement files a run requires
    pub expected_sources: usize,
    /// Put the count of rows dropped for bad dates into the report metadata
    pub report_dropped_rows: bool,
    /// Extra keyword rules, evaluated before the built-in table
    pub rules: Vec<CategoryRule>,
    pub income: IncomeRules,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            recurring_min_months: 2,
            recurring_min_tx: 2,
            amount_round_decimals: 0,
            hotspot_count: 10,
            expected_sources: 3,
            report_dropped_rows: false,
            rules: Vec::new(),
            income: IncomeRules::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn category_rules(&self) -> CategoryRules {
        CategoryRules::with_extra_rules(&self.rules)
    }
}

/// Salary / side-gig heuristics for grouped inflows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeRules {
    pub salary_keywords: Vec<String>,
    pub salary_min_months: usize,
    pub salary_min_tx: usize,
    pub salary_min_total: f64,
    /// Sources averaging below this per transaction are side gigs
    pub side_gig_max_avg: f64,
}

impl Default for IncomeRules {
    fn default() -> Self {
        Self {
            salary_keywords: vec![
                "DIRECT CREDIT".to_string(),
                "PAYROLL".to_string(),
                "SALARY".to_string(),
            ],
            salary_min_months: 2,
            salary_min_tx: 2,
            salary_min_total: 3000.0,
            side_gig_max_avg: 1000.0,
        }
    }
}
