//! Assemble the full analysis report from a transaction set.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use cashlens_core::{MonthKey, Transaction};
use serde::Serialize;

use crate::cashflow::{compute_monthly_summary, CashflowSummary};
use crate::config::AnalyzerConfig;
use crate::expenses::{summarise_expenses, ExpenseSummary};
use crate::income::{summarise_income_sources, IncomeSummary};
use crate::loader::load_statements;
use crate::recurring::{detect_recurring_expenses, RecurringGroup};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub total_transactions: usize,
    pub total_inflow_transactions: usize,
    pub total_outflow_transactions: usize,
    pub months_covered: Vec<MonthKey>,
    /// `None` when there are no transactions at all
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub cashflow: CashflowSummary,
    pub income: IncomeSummary,
    pub expenses: ExpenseSummary,
    pub recurring_expenses_raw: Vec<RecurringGroup>,
}

/// Run every aggregation over an already-normalized transaction set.
pub fn analyze_transactions(
    txns: &[Transaction],
    dropped_rows: usize,
    employer_keyword: &str,
    config: &AnalyzerConfig,
) -> AnalysisReport {
    let rules = config.category_rules();

    let cashflow = compute_monthly_summary(txns);
    let recurring = detect_recurring_expenses(txns, &rules, config);
    let income = summarise_income_sources(txns, employer_keyword, &config.income);
    let expenses = summarise_expenses(txns, &recurring, &rules, config.hotspot_count);

    let months_covered: Vec<MonthKey> = txns
        .iter()
        .map(|t| t.month_key())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let meta = ReportMeta {
        total_transactions: txns.len(),
        total_inflow_transactions: txns.iter().filter(|t| t.is_inflow()).count(),
        total_outflow_transactions: txns.iter().filter(|t| t.is_outflow()).count(),
        months_covered,
        start_date: txns.iter().map(|t| t.date()).min().map(|d| d.format(DATE_FORMAT).to_string()),
        end_date: txns.iter().map(|t| t.date()).max().map(|d| d.format(DATE_FORMAT).to_string()),
        dropped_rows: config.report_dropped_rows.then_some(dropped_rows),
    };

    AnalysisReport {
        meta,
        cashflow,
        income,
        expenses,
        recurring_expenses_raw: recurring,
    }
}

/// Load the statement files and analyze them in one pass.
pub fn analyse_bank_statements<P: AsRef<Path>>(
    paths: &[P],
    employer_keyword: &str,
    config: &AnalyzerConfig,
) -> Result<AnalysisReport> {
    let loaded = load_statements(paths, config)?;
    Ok(analyze_transactions(
        &loaded.transactions,
        loaded.dropped_rows,
        employer_keyword,
        config,
    ))
}
