//! Amount text → signed value.
//!
//! Bank exports write money as `$1,234.56`, `+$20`, `(15.00)` or leave the cell
//! blank. None of these are errors; anything unreadable counts as zero.

/// Parse a textual amount into a signed value.
///
/// Parenthesised values are always negative, whatever sign the text carried.
pub fn parse_money(raw: &str) -> f64 {
    let s = raw.trim();
    let parenthesised = s.contains('(') && s.contains(')');

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value: f64 = cleaned.parse().unwrap_or(0.0);
    if parenthesised { -value.abs() } else { value }
}
