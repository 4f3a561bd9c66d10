//! Normalization and stopword filtering of conversation text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens shorter than this (in characters) carry no topical meaning.
pub const MIN_TOKEN_CHARS: usize = 2;

// `\w` is Unicode-aware, so Hangul and other scripts count as word characters.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern is a valid regex"));

const STOPWORD_LIST: &[&str] = &[
    // Korean
    "이것", "그것", "저것", "이", "그", "저", "의", "가", "을", "를", "에", "로", "으로", "과",
    "와", "도", "만", "에서", "부터", "까지", "한", "하는", "하고", "할", "합니다",
    // English
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "must", "shall", "what", "where", "when",
    "why", "how", "who", "which", "that", "this", "these", "those", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().collect());

/// Lower-case `text` and replace every non-word, non-space character with a space.
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").into_owned()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Split normalized text into tokens, keeping only those long enough and
/// not in the stopword set. Order of appearance is preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS && !is_stopword(token))
        .map(str::to_string)
        .collect()
}
