//! Core data models for the financial advisor chatbot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Phase of the conversation.
///
/// `ProvidingAdvice` is declared for forward compatibility but nothing in the
/// router currently transitions into it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Greeting,
    GatheringInfo,
    ProvidingAdvice,
}

//
// ================= User Financial Data =================
//

/// Facts accumulated about the user over the course of one session.
///
/// All monetary fields are monthly amounts unless noted. `risk_tolerance` and
/// `goals` are accepted and carried but no calculator reads them yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserFinancialData {
    pub income: Option<f64>,
    pub expenses: Option<f64>,
    pub age: Option<u32>,
    pub retirement_age: Option<u32>,
    pub current_savings: Option<f64>,
    pub debt: Option<f64>,
    pub risk_tolerance: Option<RiskTolerance>,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl UserFinancialData {
    /// Monthly expenses, falling back to 80% of income when never stated.
    pub fn expenses_or_default(&self) -> Option<f64> {
        self.expenses.or_else(|| self.income.map(|i| i * 0.8))
    }

    /// Retirement age, defaulting to 65.
    pub fn retirement_age_or_default(&self) -> u32 {
        self.retirement_age.unwrap_or(65)
    }

    /// Current savings, defaulting to 0.
    pub fn savings_or_default(&self) -> f64 {
        self.current_savings.unwrap_or(0.0)
    }
}

//
// ================= Conversation Context =================
//

/// Per-session conversation state threaded through the router.
///
/// The router takes a context by reference and returns an updated copy, so
/// the core carries no hidden mutable state. `last_topic` is recorded when a
/// topic stalls on missing facts; nothing reads it back yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationContext {
    pub user_data: UserFinancialData,
    pub conversation_state: ConversationState,
    pub last_topic: Option<String>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self {
            user_data: UserFinancialData::default(),
            conversation_state: ConversationState::Greeting,
            last_topic: None,
        }
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

//
// ================= Chat Message =================
//

/// A single message in the session transcript. Immutable once created;
/// history is append-only for the life of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_user: true,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_user: false,
            timestamp: Utc::now(),
        }
    }
}

//
// ================= Plan Results =================
//
// Value objects computed fresh from current user data on every matching
// intent; never stored.
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetPlan {
    pub income: f64,
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
    pub needs_percent: f64,
    pub wants_percent: f64,
    pub savings_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetirementPlan {
    pub years_to_retirement: f64,
    pub monthly_contribution: f64,
    pub projected_fund: f64,
    pub monthly_income_at_retirement: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmergencyFundPlan {
    pub target_amount: f64,
    pub remaining_amount: f64,
    pub monthly_set_aside: f64,
    /// Months until the target is reached. `f64` so a zero-income pace
    /// degrades to the infinity sentinel instead of dividing by zero.
    pub months_to_goal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtPayoffPlan {
    /// All three fields are `f64::INFINITY` when the payment never covers
    /// the accruing interest.
    pub months_to_payoff: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl DebtPayoffPlan {
    /// True when the payment never amortizes the balance.
    pub fn never_pays_off(&self) -> bool {
        self.months_to_payoff.is_infinite()
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTolerance::Low => "Low",
            RiskTolerance::Medium => "Medium",
            RiskTolerance::High => "High",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationState::Greeting => "greeting",
            ConversationState::GatheringInfo => "gathering_info",
            ConversationState::ProvidingAdvice => "providing_advice",
        };
        write!(f, "{}", s)
    }
}
