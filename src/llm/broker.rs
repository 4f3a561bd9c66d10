use crate::llm::gateway::{CompletionConfig, CompletionStream, LlmGateway};
use crate::llm::models::LlmMessage;
use std::sync::Arc;
use tracing::{debug, info};

/// Binds a model identifier and completion settings to a gateway.
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
    config: CompletionConfig,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
            config: CompletionConfig::default(),
        }
    }

    /// Use `config` for every request made through this broker.
    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Stream a response to `messages`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use futures::stream::StreamExt;
    ///
    /// let mut stream = broker.generate_stream(&messages);
    /// while let Some(result) = stream.next().await {
    ///     match result {
    ///         Ok(chunk) => print!("{}", chunk),
    ///         Err(e) => eprintln!("Error: {}", e),
    ///     }
    /// }
    /// ```
    pub fn generate_stream<'a>(&'a self, messages: &'a [LlmMessage]) -> CompletionStream<'a> {
        info!(model = %self.model, "Requesting streamed completion");
        debug!(message_count = messages.len(), config = ?self.config, "Completion request");
        self.gateway.complete_stream(&self.model, messages, &self.config)
    }
}
