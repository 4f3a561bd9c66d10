//! OpenAI Gateway for streamed chat completions.
//!
//! Requests go to `{base_url}/chat/completions` with `"stream": true`; the
//! response is a server-sent event stream whose `data:` lines carry
//! `choices[0].delta.content` fragments and end with `data: [DONE]`.

use crate::error::{ChatlensError, Result};
use crate::llm::gateway::{CompletionConfig, CompletionStream, LlmGateway};
use crate::llm::models::LlmMessage;
use futures::stream::StreamExt;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for connecting to OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

/// Gateway for OpenAI LLM service.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new OpenAI gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Self {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().unwrap_or_default();

        Self { client, config }
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        })
    }

    fn request_body(model: &str, messages: &[LlmMessage], config: &CompletionConfig) -> Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": true
        });

        if let Some(temperature) = config.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

impl LlmGateway for OpenAIGateway {
    fn complete_stream<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [LlmMessage],
        config: &'a CompletionConfig,
    ) -> CompletionStream<'a> {
        Box::pin(async_stream::stream! {
            info!("Starting OpenAI streaming completion");
            debug!("Model: {}, Message count: {}", model, messages.len());

            let body = Self::request_body(model, messages, config);

            let response = match self
                .client
                .post(format!("{}/chat/completions", self.config.base_url))
                .header("Authorization", format!("Bearer {}", self.config.api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                yield Err(api_error(status, &detail));
                return;
            }

            let mut stream = response.bytes_stream();
            // Raw bytes: a multi-byte character may straddle two network chunks.
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk_result) = stream.next().await {
                let bytes = match chunk_result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(e.into());
                        return;
                    }
                };
                buffer.extend_from_slice(&bytes);

                while let Some(line_end) = buffer.iter().position(|b| *b == b'\n') {
                    let raw: Vec<u8> = buffer.drain(..=line_end).collect();
                    let line = String::from_utf8_lossy(&raw);
                    match parse_sse_line(line.trim()) {
                        SseEvent::Content(content) => yield Ok(content),
                        SseEvent::Done => return,
                        SseEvent::Failed(e) => {
                            yield Err(e);
                            return;
                        }
                        SseEvent::Skip => {}
                    }
                }
            }

            if !buffer.is_empty() {
                let line = String::from_utf8_lossy(&buffer).into_owned();
                match parse_sse_line(line.trim()) {
                    SseEvent::Content(content) => yield Ok(content),
                    SseEvent::Failed(e) => yield Err(e),
                    SseEvent::Done | SseEvent::Skip => {}
                }
            }
        })
    }
}

/// What a single SSE line contributes to the completion.
#[derive(Debug)]
enum SseEvent {
    Content(String),
    Done,
    Failed(ChatlensError),
    Skip,
}

fn parse_sse_line(line: &str) -> SseEvent {
    let Some(data) = line.strip_prefix("data:") else {
        return SseEvent::Skip;
    };
    let data = data.trim();

    if data == "[DONE]" {
        return SseEvent::Done;
    }

    let json: Value = match serde_json::from_str(data) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to parse streaming chunk: {}", e);
            return SseEvent::Skip;
        }
    };

    if let Some(message) = json["error"]["message"].as_str() {
        return SseEvent::Failed(ChatlensError::ApiError(message.to_string()));
    }

    match json["choices"][0]["delta"]["content"].as_str() {
        Some(content) if !content.is_empty() => SseEvent::Content(content.to_string()),
        _ => SseEvent::Skip,
    }
}

fn api_error(status: reqwest::StatusCode, body: &str) -> ChatlensError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        ChatlensError::ApiError(format!("OpenAI API error: {}", status))
    } else {
        ChatlensError::ApiError(format!("OpenAI API error: {} ({})", status, detail))
    }
}
