//! Word-frequency analysis of a conversation.
//!
//! The pipeline is a single pass: join the conversational turns, normalize
//! and filter them into tokens ([`tokenizer`]), count and rank the tokens
//! ([`frequency`]), and optionally draw the ranking ([`chart`]).

pub mod chart;
pub mod frequency;
pub mod tokenizer;

pub use chart::{ChartImage, ChartRenderer};
pub use frequency::{top_10, top_n, TOP_N};
pub use tokenizer::{is_stopword, normalize, tokenize};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Why an analysis request produced no ranking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("There is no conversation to analyze.")]
    EmptyConversation,

    #[error("No significant words found to analyze.")]
    NoSignificantWords,

    #[error("Could not render chart: {0}")]
    Chart(String),
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequencyEntry {
    pub token: String,
    pub count: usize,
}

/// Rank the ten most frequent significant words across `contents`.
///
/// Each piece of content is followed by a single space before
/// tokenizing, so words never fuse across turns.
pub fn analyze<'a, I>(contents: I) -> Result<Vec<WordFrequencyEntry>, AnalysisError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut text = String::new();
    for content in contents {
        text.push_str(content);
        text.push(' ');
    }

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyConversation);
    }

    let tokens = tokenize(&text);
    if tokens.is_empty() {
        return Err(AnalysisError::NoSignificantWords);
    }

    let ranking = top_10(&tokens);
    info!(
        tokens = tokens.len(),
        distinct_ranked = ranking.len(),
        "Analyzed conversation word frequency"
    );
    Ok(ranking)
}
