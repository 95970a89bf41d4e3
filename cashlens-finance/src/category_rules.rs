//! Deterministic keyword rules mapping merchant keys to spending categories.
//!
//! Rules are evaluated top to bottom and the first rule with a matching keyword
//! wins, so order matters where keywords overlap ("TRANSPORT DEPT" is Rego, not
//! Transport). Classification only looks at the merchant key, never at amount
//! or date.

use cashlens_core::MerchantCategory;
use serde::{Deserialize, Serialize};

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: MerchantCategory,
    /// Upper-case substrings checked against the merchant key
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: MerchantCategory, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_uppercase()).collect(),
        }
    }

    pub fn matches(&self, merchant_key: &str) -> bool {
        self.keywords.iter().any(|k| merchant_key.contains(k.as_str()))
    }
}

const BUILTIN_RULES: &[(MerchantCategory, &[&str])] = &[
    (MerchantCategory::Rent, &["RENT", "REALESTATE", "REALTY"]),
    (MerchantCategory::Rego, &["REGISTRATION", " REGO", "TRANSPORT DEPT"]),
    (MerchantCategory::Insurance, &["INSURANCE", "NRMA", "AAMI", "ALLIANZ"]),
    (
        MerchantCategory::Utilities,
        &["ENERGY", "POWER", "AGL", "ELECTRICITY", "WATER", "GAS"],
    ),
    (MerchantCategory::PhoneInternet, &["OPTUS", "TELSTRA", "VODAFONE", "AMAYSIM"]),
    (MerchantCategory::Transport, &["UBER", "TRANSLINK", "GO CARD"]),
    (
        MerchantCategory::Groceries,
        &["COLES", "WOOLWORTHS", "ALDI", "IGA", "GROCER"],
    ),
    (MerchantCategory::EatingOut, &["MCDONALDS", "SUSHI", "CAFE", "BUTCHER"]),
    (
        MerchantCategory::Subscriptions,
        &["NETFLIX", "SPOTIFY", "APPLECOMBILL", "CHATGPT", "AMZNPRIME"],
    ),
    (MerchantCategory::Parking, &["PARKING", "WESTFIELD", "SHOPPING"]),
];

/// Ordered, extensible rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(category, keywords)| CategoryRule::new(*category, keywords))
                .collect(),
        }
    }
}

impl CategoryRules {
    /// Built-in table with `extra` rules evaluated ahead of it.
    pub fn with_extra_rules(extra: &[CategoryRule]) -> Self {
        let mut rules: Vec<CategoryRule> = extra
            .iter()
            .map(|r| CategoryRule {
                category: r.category,
                keywords: r.keywords.iter().map(|k| k.to_uppercase()).collect(),
            })
            .collect();
        rules.extend(Self::default().rules);
        Self { rules }
    }

    /// First matching rule's category, `Unknown` if none match.
    pub fn classify(&self, merchant_key: &str) -> MerchantCategory {
        let key = merchant_key.to_uppercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&key))
            .map(|rule| rule.category)
            .unwrap_or(MerchantCategory::Unknown)
    }
}

/// Categorize a merchant key with the built-in table.
pub fn categorize(merchant_key: &str) -> MerchantCategory {
    CategoryRules::default().classify(merchant_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashlens_core::normalize_merchant;

    fn cat_of(description: &str) -> MerchantCategory {
        categorize(&normalize_merchant(description))
    }

    #[test]
    fn test_netflix_is_subscription() {
        assert_eq!(cat_of("NETFLIX.COM"), MerchantCategory::Subscriptions);
        assert_eq!(cat_of("Apple.com/bill"), MerchantCategory::Subscriptions);
    }

    #[test]
    fn test_groceries_and_eating_out() {
        assert_eq!(cat_of("WOOLWORTHS 1234 SYDNEY"), MerchantCategory::Groceries);
        assert_eq!(cat_of("Sushi Train Chermside"), MerchantCategory::EatingOut);
    }

    #[test]
    fn test_earlier_rules_preempt_later_ones() {
        // TRANSPORT DEPT is listed under Rego before Transport gets a look
        assert_eq!(cat_of("QLD TRANSPORT DEPT"), MerchantCategory::Rego);
        // shopping centres are filed under Parking
        assert_eq!(cat_of("WESTFIELD CARINDALE"), MerchantCategory::Parking);
        // "PARENT" contains RENT and Rent comes first
        assert_eq!(cat_of("PARENTS CAFE"), MerchantCategory::Rent);
    }

    #[test]
    fn test_rego_needs_leading_space() {
        assert_eq!(cat_of("QLD REGO RENEWAL"), MerchantCategory::Rego);
        assert_eq!(cat_of("REGO ONLINE"), MerchantCategory::Unknown);
    }

    #[test]
    fn test_unmatched_is_unknown() {
        assert_eq!(cat_of("BUNNINGS WAREHOUSE"), MerchantCategory::Unknown);
        assert_eq!(cat_of(""), MerchantCategory::Unknown);
    }

    #[test]
    fn test_extra_rules_run_first() {
        let extra = vec![CategoryRule::new(MerchantCategory::Entertainment, &["netflix"])];
        let rules = CategoryRules::with_extra_rules(&extra);
        assert_eq!(rules.classify("NETFLIXCOM"), MerchantCategory::Entertainment);
        assert_eq!(rules.classify("SPOTIFY"), MerchantCategory::Subscriptions);
        assert_eq!(rules.rules.len(), BUILTIN_RULES.len() + 1);
    }
}
