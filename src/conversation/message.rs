use crate::analysis::{ChartImage, WordFrequencyEntry};
use crate::llm::{LlmMessage, MessageRole};
use chrono::{DateTime, Utc};

/// A user or assistant turn. These are what the analyzer reads and what
/// the completion service sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationalTurn {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Result of an analysis request. Never analyzed and never sent to the
/// completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTurn {
    pub summary: String,
    pub ranking: Vec<WordFrequencyEntry>,
    pub chart: ChartImage,
    pub created_at: DateTime<Utc>,
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Turn(ConversationalTurn),
    Analysis(AnalysisTurn),
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::turn(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::turn(MessageRole::Assistant, content)
    }

    pub fn analysis(
        summary: impl Into<String>,
        ranking: Vec<WordFrequencyEntry>,
        chart: ChartImage,
    ) -> Self {
        Message::Analysis(AnalysisTurn {
            summary: summary.into(),
            ranking,
            chart,
            created_at: Utc::now(),
        })
    }

    fn turn(role: MessageRole, content: impl Into<String>) -> Self {
        Message::Turn(ConversationalTurn {
            role,
            content: content.into(),
            created_at: Utc::now(),
        })
    }

    /// Role of a conversational turn; `None` for analysis output.
    pub fn role(&self) -> Option<MessageRole> {
        match self {
            Message::Turn(turn) => Some(turn.role),
            Message::Analysis(_) => None,
        }
    }

    /// Text that takes part in the conversation.
    pub fn conversational_content(&self) -> Option<&str> {
        match self {
            Message::Turn(turn) => Some(&turn.content),
            Message::Analysis(_) => None,
        }
    }

    /// The form sent to the completion service, if this message is sent at all.
    pub fn to_llm_message(&self) -> Option<LlmMessage> {
        match self {
            Message::Turn(turn) => Some(LlmMessage {
                role: turn.role,
                content: turn.content.clone(),
            }),
            Message::Analysis(_) => None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Message::Turn(turn) => turn.created_at,
            Message::Analysis(analysis) => analysis.created_at,
        }
    }
}
