//! Error types for the financial advisor chatbot
//!
//! The conversational core itself never fails: every user message produces
//! some response string. Errors exist only at the session/API boundary.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Session Layer Errors
    // =============================

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session error: {0}")]
    SessionError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("UUID parse error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
