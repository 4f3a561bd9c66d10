pub mod analysis;
pub mod config;
pub mod conversation;
pub mod dialogue;
pub mod error;
pub mod llm;
pub mod locale;
pub mod surface;

pub use error::{ChatlensError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{analyze, AnalysisError, ChartImage, ChartRenderer, WordFrequencyEntry};
    pub use crate::config::AppConfig;
    pub use crate::conversation::{Conversation, Message, SessionStats};
    pub use crate::dialogue::{Dialogue, TurnOutcome};
    pub use crate::error::{ChatlensError, Result};
    pub use crate::llm::gateways::OpenAIGateway;
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
    pub use crate::locale::Language;
    pub use crate::surface::{CredentialPrompt, Surface, SurfaceAction, TerminalSurface};
}
