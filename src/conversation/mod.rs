//! The in-memory conversation log of one interactive session.

mod message;

pub use message::{AnalysisTurn, ConversationalTurn, Message};

use crate::llm::{LlmMessage, MessageRole};
use tracing::info;
use uuid::Uuid;

/// Per-role counts shown on the statistics panel. Analysis turns are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub user_messages: usize,
    pub assistant_messages: usize,
}

impl SessionStats {
    pub fn total(&self) -> usize {
        self.user_messages + self.assistant_messages
    }
}

/// Ordered, append-only log of messages. The only removal is [`Conversation::clear`].
#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        info!(session = %self.id, removed = self.messages.len(), "Clearing conversation");
        self.messages.clear();
    }

    /// User and assistant contents in order, skipping analysis output.
    pub fn conversational_contents(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(Message::conversational_content)
    }

    /// History in the shape the completion service expects.
    pub fn llm_history(&self) -> Vec<LlmMessage> {
        self.messages.iter().filter_map(Message::to_llm_message).collect()
    }

    pub fn stats(&self) -> SessionStats {
        self.messages
            .iter()
            .fold(SessionStats::default(), |mut stats, message| {
                match message.role() {
                    Some(MessageRole::User) => stats.user_messages += 1,
                    Some(MessageRole::Assistant) => stats.assistant_messages += 1,
                    None => {}
                }
                stats
            })
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
