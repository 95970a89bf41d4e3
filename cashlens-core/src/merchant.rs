//! Merchant key normalization and internal transfer detection.
//!
//! The merchant key is the grouping handle for everything downstream: recurring
//! charges, income sources and category rules all match against it.

use std::sync::LazyLock;

use regex::Regex;

/// Key used when a description normalizes to nothing.
pub const UNKNOWN_MERCHANT: &str = "UNKNOWN";

static NON_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z0-9 ]+").expect("static merchant pattern"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

/// Normalize a free-text description into a merchant key.
///
/// Upper-cases, drops everything that is not `A-Z`, `0-9` or a space, then
/// collapses whitespace. `"NETFLIX.COM"` becomes `"NETFLIXCOM"`.
pub fn normalize_merchant(description: &str) -> String {
    let upper = description.to_uppercase();
    let stripped = NON_KEY_CHARS.replace_all(&upper, "");
    let collapsed = SPACE_RUNS.replace_all(&stripped, " ");
    let key = collapsed.trim();

    if key.is_empty() {
        UNKNOWN_MERCHANT.to_string()
    } else {
        key.to_string()
    }
}

/// Money moved between the user's own accounts.
///
/// Anything whose normalized key mentions `TRANSFER` counts; these rows are
/// left out of income and spending totals.
pub fn is_internal_transfer(merchant_key: &str) -> bool {
    merchant_key.to_uppercase().contains("TRANSFER")
}
