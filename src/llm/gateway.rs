use crate::error::Result;
use crate::llm::models::LlmMessage;
use futures::stream::Stream;
use std::pin::Pin;

/// Incrementally delivered completion text. Chunks arrive in order; the
/// stream ends when delivery completes or right after the first error.
pub type CompletionStream<'a> = Pin<Box<dyn Stream<Item = Result<String>> + Send + 'a>>;

/// Configuration for LLM completion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
}

/// Abstract interface for completion providers
pub trait LlmGateway: Send + Sync {
    /// Stream a chat completion for `messages`.
    fn complete_stream<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [LlmMessage],
        config: &'a CompletionConfig,
    ) -> CompletionStream<'a>;
}
