//! Financial Advisor Chatbot
//!
//! A scripted financial-advice chatbot core that:
//! - Routes user text to a topic via ordered keyword rules
//! - Extracts simple facts (income, age) with fixed patterns
//! - Computes advice with pure calculators (budget, retirement,
//!   emergency fund, debt payoff)
//! - Accumulates a per-session conversation context, never persisted
//!
//! FLOW:
//! USER TEXT → EXTRACT FACTS → DETECT INTENT → CALCULATE → TEMPLATED REPLY

pub mod api;
pub mod calculators;
pub mod error;
pub mod extract;
pub mod format;
pub mod intent;
pub mod models;
pub mod router;
pub mod session;

pub use error::Result;

// Re-export common types
pub use intent::{detect_intent, Intent};
pub use models::*;
pub use router::respond;
pub use session::{ChatSession, InMemorySessionStore, SessionStore};
