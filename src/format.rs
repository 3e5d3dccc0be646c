//! Currency formatting
//!
//! Renders monetary amounts as US-dollar strings with thousands grouping and
//! zero decimal places, matching how figures appear in chat responses.

/// Sentinel rendered when an amount is not representable as a finite figure,
/// e.g. a debt payoff that never completes.
pub const TOO_LARGE: &str = "an amount too large to display";

/// Format an amount as a USD string with comma grouping and no cents.
///
/// `format_currency(2500.0)` → `"$2,500"`. Negative amounts render as
/// `"-$1,234"`. Infinite input renders as [`TOO_LARGE`] rather than
/// panicking; callers that can produce an infinite figure are expected to
/// branch on it before formatting if they want different wording.
pub fn format_currency(amount: f64) -> String {
    if amount.is_infinite() {
        return TOO_LARGE.to_string();
    }

    let negative = amount < 0.0;
    let whole = amount.abs().round() as u64;
    let grouped = group_thousands(whole);

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Insert comma separators into a non-negative integer amount.
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut groups: Vec<String> = Vec::new();
    while value > 0 {
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }

    let mut out = groups.pop().unwrap_or_default();
    // Leading group keeps no zero padding
    out = out.trim_start_matches('0').to_string();
    if out.is_empty() {
        out = "0".to_string();
    }
    for group in groups.iter().rev() {
        out.push(',');
        out.push_str(group);
    }
    out
}

/// Format a percentage with no decimal places, e.g. `50.0` → `"50%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}
