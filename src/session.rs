//! Chat session layer
//!
//! Owns what the pure router does not: the append-only message transcript,
//! the per-session context, and the store that keeps sessions addressable
//! between requests. Sessions live only in memory; nothing survives process
//! shutdown.

use crate::error::AdvisorError;
use crate::models::{ChatMessage, ConversationContext};
use crate::router;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Opening message seeded into every new session.
const WELCOME_MESSAGE: &str = "Hi! I'm your personal finance assistant. Ask me about \
budgeting, retirement, emergency funds, debt payoff, or investing.";

/// One user's conversation: transcript plus accumulated context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    context: ConversationContext,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Create a session seeded with the bot's welcome message.
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            context: ConversationContext::new(),
            messages: vec![ChatMessage::bot(WELCOME_MESSAGE)],
        }
    }

    /// Submit one user message: append it, route it, append and return the
    /// bot's reply. History only ever grows.
    pub fn submit(&mut self, text: &str) -> ChatMessage {
        self.messages.push(ChatMessage::user(text));

        let (reply, updated) = router::respond(text, &self.context);
        self.context = updated;

        let bot_message = ChatMessage::bot(reply);
        self.messages.push(bot_message.clone());
        self.updated_at = Utc::now();

        debug!(
            session_id = %self.session_id,
            messages = self.messages.len(),
            "session turn complete"
        );

        bot_message
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Iterate over the transcript in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Trait for session persistence
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: Uuid) -> Result<ChatSession>;
    async fn get_or_create(&self, session_id: Uuid) -> ChatSession;
    async fn save(&self, session: &ChatSession) -> Result<()>;
}

/// Collaborator that can voice a bot reply. The browser adapter lives
/// outside this crate; servers plug in a no-op by default.
#[async_trait::async_trait]
pub trait SpeechSink: Send + Sync {
    async fn speak(&self, text: &str);
}

/// Default sink: logs instead of speaking.
pub struct NullSpeechSink;

#[async_trait::async_trait]
impl SpeechSink for NullSpeechSink {
    async fn speak(&self, text: &str) {
        debug!(chars = text.len(), "speech sink discarded reply");
    }
}

/// In-memory session store for development and tests
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: Uuid) -> Result<ChatSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .cloned()
            .ok_or(AdvisorError::SessionNotFound(session_id))
    }

    async fn get_or_create(&self, session_id: Uuid) -> ChatSession {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&session_id) {
                return session.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id)
            .or_insert_with(|| ChatSession::new(session_id))
            .clone()
    }

    async fn save(&self, session: &ChatSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id, session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_seeds_welcome() {
        let session = ChatSession::new(Uuid::new_v4());
        assert_eq!(session.message_count(), 1);
        let first = session.messages().next().unwrap();
        assert!(!first.is_user);
    }

    #[test]
    fn test_submit_appends_user_then_bot() {
        let mut session = ChatSession::new(Uuid::new_v4());
        let reply = session.submit("hello");

        assert_eq!(session.message_count(), 3);
        assert!(!reply.text.is_empty());

        let flags: Vec<bool> = session.messages().map(|m| m.is_user).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_context_accumulates_across_turns() {
        let mut session = ChatSession::new(Uuid::new_v4());
        session.submit("I make $5000 per month");
        session.submit("I'm 40");

        assert_eq!(session.context().user_data.income, Some(5000.0));
        assert_eq!(session.context().user_data.age, Some(40));
    }

    #[tokio::test]
    async fn test_store_get_or_create_is_stable() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();

        let mut session = store.get_or_create(id).await;
        session.submit("I make $5000 per month");
        store.save(&session).await.unwrap();

        let reloaded = store.get_or_create(id).await;
        assert_eq!(reloaded.context().user_data.income, Some(5000.0));
        assert_eq!(reloaded.message_count(), 3);
    }

    #[tokio::test]
    async fn test_store_load_unknown_session_errors() {
        let store = InMemorySessionStore::new();
        let result = store.load(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AdvisorError::SessionNotFound(_))));
    }
}
