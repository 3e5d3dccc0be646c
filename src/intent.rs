//! Intent detection
//!
//! Classifies a user message into a financial topic via case-insensitive
//! keyword membership, evaluated as an ordered cascade — the first matching
//! rule wins. The order is a behavioral contract (e.g. "retirement fund"
//! must hit retirement before the emergency fund rule sees "fund") and is
//! pinned by tests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Budget,
    Retirement,
    EmergencyFund,
    Debt,
    Investment,
    StartOver,
    Unknown,
}

/// Static keyword lists — zero allocation
pub const INCOME_KEYWORDS: &[&str] = &["income", "salary", "make", "earn"];

const BUDGET_KEYWORDS: &[&str] = &["budget", "budgeting", "spending plan"];

const RETIREMENT_KEYWORDS: &[&str] = &["retire", "retirement", "401k", "pension"];

const EMERGENCY_KEYWORDS: &[&str] = &["emergency", "rainy day", "safety net"];

const DEBT_KEYWORDS: &[&str] = &["debt", "loan", "credit card", "owe", "pay off"];

const INVESTMENT_KEYWORDS: &[&str] = &["invest", "stock", "bond", "portfolio"];

const START_KEYWORDS: &[&str] = &["start", "begin", "new", "first"];

type Predicate = fn(&str) -> bool;

/// The ordered cascade. First match wins; `Unknown` is the unconditional
/// fallback when nothing matches.
pub const RULES: &[(Intent, Predicate)] = &[
    (Intent::Greeting, is_greeting),
    (Intent::Budget, is_budget),
    (Intent::Retirement, is_retirement),
    (Intent::EmergencyFund, is_emergency_fund),
    (Intent::Debt, is_debt),
    (Intent::Investment, is_investment),
    (Intent::StartOver, is_start_over),
];

/// Detect the intent of an already-lowercased message.
pub fn detect_intent(lowered: &str) -> Intent {
    RULES
        .iter()
        .find(|(_, applies)| applies(lowered))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Bare greetings only. "help me create a budget" must fall through to the
/// budget rule, so "help" matches only on its own.
fn is_greeting(t: &str) -> bool {
    let trimmed = t.trim().trim_end_matches(['!', '.', '?']);
    trimmed.contains("hello")
        || trimmed.contains("hey")
        || trimmed == "hi"
        || trimmed.starts_with("hi ")
        || trimmed.starts_with("hi,")
        || trimmed == "help"
}

fn is_budget(t: &str) -> bool {
    contains_any(t, BUDGET_KEYWORDS)
}

fn is_retirement(t: &str) -> bool {
    contains_any(t, RETIREMENT_KEYWORDS)
}

/// Suppressed when the message also mentions retirement, so "retirement
/// emergency" style phrasings stay on the retirement topic.
fn is_emergency_fund(t: &str) -> bool {
    contains_any(t, EMERGENCY_KEYWORDS) && !t.contains("retirement")
}

fn is_debt(t: &str) -> bool {
    contains_any(t, DEBT_KEYWORDS)
}

fn is_investment(t: &str) -> bool {
    contains_any(t, INVESTMENT_KEYWORDS)
}

fn is_start_over(t: &str) -> bool {
    contains_any(t, START_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_order_is_pinned() {
        let order: Vec<Intent> = RULES.iter().map(|(intent, _)| *intent).collect();
        assert_eq!(
            order,
            vec![
                Intent::Greeting,
                Intent::Budget,
                Intent::Retirement,
                Intent::EmergencyFund,
                Intent::Debt,
                Intent::Investment,
                Intent::StartOver,
            ]
        );
    }

    #[test]
    fn test_greetings() {
        assert_eq!(detect_intent("hello"), Intent::Greeting);
        assert_eq!(detect_intent("hey there"), Intent::Greeting);
        assert_eq!(detect_intent("hi"), Intent::Greeting);
        assert_eq!(detect_intent("help"), Intent::Greeting);
    }

    #[test]
    fn test_help_with_topic_is_not_a_greeting() {
        assert_eq!(detect_intent("help me create a budget"), Intent::Budget);
        assert_eq!(detect_intent("help me with my debt"), Intent::Debt);
    }

    #[test]
    fn test_topic_families() {
        assert_eq!(detect_intent("how should i budget"), Intent::Budget);
        assert_eq!(
            detect_intent("help me plan for retirement"),
            Intent::Retirement
        );
        assert_eq!(
            detect_intent("do i need an emergency fund"),
            Intent::EmergencyFund
        );
        assert_eq!(
            detect_intent("i have $5000 in credit card debt"),
            Intent::Debt
        );
        assert_eq!(detect_intent("how should i invest"), Intent::Investment);
    }

    #[test]
    fn test_retirement_wins_over_emergency() {
        assert_eq!(detect_intent("retirement fund advice"), Intent::Retirement);
        assert_eq!(
            detect_intent("emergency savings while saving for retirement"),
            Intent::Retirement
        );
    }

    #[test]
    fn test_start_over_and_fallback() {
        assert_eq!(detect_intent("where do i begin"), Intent::StartOver);
        assert_eq!(detect_intent("the weather is nice"), Intent::Unknown);
        assert_eq!(detect_intent("i make $5000 per month"), Intent::Unknown);
    }
}
