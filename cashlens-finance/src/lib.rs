//! cashlens-finance: category rules, cashflow / recurring / income / expense
//! aggregation, and report assembly over normalized statements.

pub mod cashflow;
pub mod category_rules;
pub mod config;
pub mod expenses;
pub mod income;
pub mod loader;
pub mod recurring;
pub mod report;

pub use category_rules::{categorize, CategoryRule, CategoryRules};
pub use config::{AnalyzerConfig, IncomeRules};
pub use loader::{load_statements, LoadedStatements};
pub use report::{analyse_bank_statements, analyze_transactions, AnalysisReport};
