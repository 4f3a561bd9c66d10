//! Application configuration, read from the environment.

use crate::error::{ChatlensError, Result};
use crate::llm::gateways::openai::DEFAULT_BASE_URL;
use crate::llm::gateways::OpenAIConfig;
use crate::llm::CompletionConfig;
use crate::locale::Language;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CHART_DIR: &str = "charts";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Empty until a credential is supplied.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub language: Language,
    pub chart_dir: PathBuf,
    pub temperature: Option<f32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            language: Language::default(),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
            temperature: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let language = match get("CHATLENS_LANGUAGE") {
            Some(value) => value.parse()?,
            None => defaults.language,
        };

        let temperature = match get("CHATLENS_TEMPERATURE") {
            Some(value) => Some(parse_temperature(&value)?),
            None => None,
        };

        Ok(Self {
            api_key: get("OPENAI_API_KEY").unwrap_or_default(),
            base_url: get("OPENAI_API_ENDPOINT").unwrap_or(defaults.base_url),
            model: get("CHATLENS_MODEL").unwrap_or(defaults.model),
            language,
            chart_dir: get("CHATLENS_CHART_DIR").map(PathBuf::from).unwrap_or(defaults.chart_dir),
            temperature,
        })
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout: None,
        }
    }

    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            temperature: self.temperature,
            max_tokens: None,
        }
    }
}

fn parse_temperature(value: &str) -> Result<f32> {
    let temperature: f32 = value
        .parse()
        .map_err(|_| ChatlensError::ConfigError(format!("invalid temperature: {}", value)))?;

    if !(0.0..=2.0).contains(&temperature) {
        return Err(ChatlensError::ConfigError(format!(
            "temperature must be between 0 and 2, got {}",
            temperature
        )));
    }
    Ok(temperature)
}
