//! Entity extraction from free-form user text
//!
//! Pulls the two structured facts the router cares about — a dollar amount
//! and an age — out of a chat message using fixed patterns. Nothing here is
//! natural-language understanding; an absent match means "ask again", never
//! an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// First loosely-formatted numeric token: optional leading `$`, digits,
    /// optional comma thousands separators (`$5,000`, `3000`).
    static ref MONEY_RE: Regex = Regex::new(r"\$?\d+(?:,\d{3})*").unwrap();

    /// Dollar-prefixed amounts only, used to prefer `$6000` over a bare `30`
    /// when a message carries both an age and an income.
    static ref DOLLAR_RE: Regex = Regex::new(r"\$\d+(?:,\d{3})*").unwrap();

    /// Age phrases, three alternatives tried in order: "30 years old",
    /// "age 30", "I'm 30". The first non-empty capture group wins.
    static ref AGE_RE: Regex =
        Regex::new(r"(?i)(\d{1,3})\s*years?\s*old|\bage\s*(\d{1,3})|\bi'?m\s+(\d{1,3})\b").unwrap();
}

/// Extract the first numeric token from text, stripping `$` and commas.
///
/// Returns `None` when the text contains no such token. Only the first match
/// is considered; a message with several numbers yields only the leading one.
pub fn extract_number_from_text(text: &str) -> Option<f64> {
    MONEY_RE.find(text).and_then(|m| parse_amount(m.as_str()))
}

/// Extract an age from one of the fixed age phrases.
pub fn extract_age_from_text(text: &str) -> Option<u32> {
    let caps = AGE_RE.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Extract the amount an income keyword refers to.
///
/// Prefers a `$`-prefixed token anywhere in the message; otherwise takes the
/// first bare number that is not part of an age phrase, so "I'm 30 years old
/// and make $6000" stores 6000 as income, not 30.
pub fn extract_income_amount(text: &str) -> Option<f64> {
    if let Some(m) = DOLLAR_RE.find(text) {
        return parse_amount(m.as_str());
    }

    let age_span = AGE_RE.find(text).map(|m| (m.start(), m.end()));

    for m in MONEY_RE.find_iter(text) {
        if let Some((start, end)) = age_span {
            if m.start() >= start && m.end() <= end {
                continue;
            }
        }
        return parse_amount(m.as_str());
    }

    None
}

fn parse_amount(token: &str) -> Option<f64> {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dollar_amount_with_commas() {
        assert_eq!(
            extract_number_from_text("I make $5,000 per month"),
            Some(5000.0)
        );
    }

    #[test]
    fn test_extract_bare_number() {
        assert_eq!(extract_number_from_text("3000"), Some(3000.0));
    }

    #[test]
    fn test_no_number_returns_none() {
        assert_eq!(extract_number_from_text("no numbers here"), None);
    }

    #[test]
    fn test_only_first_number_is_extracted() {
        assert_eq!(
            extract_number_from_text("between 2000 and 3000"),
            Some(2000.0)
        );
    }

    #[test]
    fn test_age_years_old_phrase() {
        assert_eq!(extract_age_from_text("I am 30 years old"), Some(30));
        assert_eq!(extract_age_from_text("42 year old engineer"), Some(42));
    }

    #[test]
    fn test_age_keyword_phrase() {
        assert_eq!(extract_age_from_text("my age 45"), Some(45));
        assert_eq!(extract_age_from_text("age 27"), Some(27));
    }

    #[test]
    fn test_age_contraction_phrase() {
        assert_eq!(extract_age_from_text("I'm 30"), Some(30));
        assert_eq!(extract_age_from_text("im 55 and retired"), Some(55));
    }

    #[test]
    fn test_no_age_returns_none() {
        assert_eq!(extract_age_from_text("I make $5000 per month"), None);
    }

    #[test]
    fn test_income_prefers_dollar_amount_over_age() {
        let text = "I'm 30 years old and make $6000 per month";
        assert_eq!(extract_income_amount(text), Some(6000.0));
    }

    #[test]
    fn test_income_skips_bare_age_number() {
        let text = "I'm 30 years old and earn 4500 monthly";
        assert_eq!(extract_income_amount(text), Some(4500.0));
    }

    #[test]
    fn test_income_falls_back_to_first_number() {
        assert_eq!(extract_income_amount("I earn 3000"), Some(3000.0));
        assert_eq!(extract_income_amount("my salary"), None);
    }
}
