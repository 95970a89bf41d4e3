//! Spending categories, macro buckets and income types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Micro category assigned to outflows by keyword rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MerchantCategory {
    #[serde(rename = "Rent")]
    Rent,
    #[serde(rename = "Rego")]
    Rego,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Phone & Internet")]
    PhoneInternet,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Eating Out")]
    EatingOut,
    #[serde(rename = "Subscriptions")]
    Subscriptions,
    #[serde(rename = "Parking")]
    Parking,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl MerchantCategory {
    /// Display label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            MerchantCategory::Rent => "Rent",
            MerchantCategory::Rego => "Rego",
            MerchantCategory::Insurance => "Insurance",
            MerchantCategory::Utilities => "Utilities",
            MerchantCategory::PhoneInternet => "Phone & Internet",
            MerchantCategory::Transport => "Transport",
            MerchantCategory::Groceries => "Groceries",
            MerchantCategory::EatingOut => "Eating Out",
            MerchantCategory::Subscriptions => "Subscriptions",
            MerchantCategory::Parking => "Parking",
            MerchantCategory::Shopping => "Shopping",
            MerchantCategory::Entertainment => "Entertainment",
            MerchantCategory::Unknown => "Unknown",
        }
    }

    /// Macro bucket for this category, `None` when unmapped.
    ///
    /// Callers pick their own fallback: recurring detection treats unmapped
    /// charges as Lifestyle, expense rollups report them as Unknown.
    pub fn macro_category(&self) -> Option<MacroCategory> {
        match self {
            MerchantCategory::Rent
            | MerchantCategory::Rego
            | MerchantCategory::Insurance
            | MerchantCategory::Utilities
            | MerchantCategory::Groceries
            | MerchantCategory::Transport
            | MerchantCategory::PhoneInternet => Some(MacroCategory::Essential),
            MerchantCategory::Subscriptions
            | MerchantCategory::EatingOut
            | MerchantCategory::Parking
            | MerchantCategory::Shopping
            | MerchantCategory::Entertainment => Some(MacroCategory::Lifestyle),
            MerchantCategory::Unknown => None,
        }
    }
}

impl fmt::Display for MerchantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse bucket that micro categories roll up into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MacroCategory {
    #[serde(rename = "Essential")]
    Essential,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Lifestyle")]
    Lifestyle,
    /// Only produced by the expense rollup for unmapped categories
    #[serde(rename = "Unknown")]
    Unknown,
}

impl MacroCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MacroCategory::Essential => "Essential",
            MacroCategory::Income => "Income",
            MacroCategory::Lifestyle => "Lifestyle",
            MacroCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MacroCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a grouped income stream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IncomeType {
    #[serde(rename = "Salary")]
    Salary,
    #[serde(rename = "Side gig / Misc")]
    SideGig,
    #[serde(rename = "Other income")]
    Other,
}

impl IncomeType {
    pub fn label(&self) -> &'static str {
        match self {
            IncomeType::Salary => "Salary",
            IncomeType::SideGig => "Side gig / Misc",
            IncomeType::Other => "Other income",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_mapping() {
        assert_eq!(MerchantCategory::Rent.macro_category(), Some(MacroCategory::Essential));
        assert_eq!(MerchantCategory::PhoneInternet.macro_category(), Some(MacroCategory::Essential));
        assert_eq!(MerchantCategory::Subscriptions.macro_category(), Some(MacroCategory::Lifestyle));
        assert_eq!(MerchantCategory::Parking.macro_category(), Some(MacroCategory::Lifestyle));
        assert_eq!(MerchantCategory::Unknown.macro_category(), None);
    }

    #[test]
    fn test_serialized_labels_match_display() {
        for cat in [
            MerchantCategory::PhoneInternet,
            MerchantCategory::EatingOut,
            MerchantCategory::Unknown,
        ] {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.label()));
        }
        assert_eq!(serde_json::to_string(&IncomeType::SideGig).unwrap(), "\"Side gig / Misc\"");
    }
}
