//! Error types and result aliases for chatlens.
//!
//! [`ChatlensError`] covers everything that can go wrong outside the
//! analyzer: talking to the completion service, reading configuration and
//! writing chart files. Analysis failures have their own taxonomy in
//! [`crate::analysis::AnalysisError`]; they are reported inline as
//! conversation turns and never travel as a `ChatlensError`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatlensError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChatlensError>;
