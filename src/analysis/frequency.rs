//! Occurrence counting and top-N selection.

use super::WordFrequencyEntry;
use std::collections::HashMap;

pub const TOP_N: usize = 10;

/// Rank distinct tokens by occurrence count and keep the `n` most frequent.
///
/// Ties keep the order in which tokens were first seen, so the result is
/// fully determined by the input sequence.
pub fn top_n<I>(tokens: I, n: usize) -> Vec<WordFrequencyEntry>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut entries: Vec<WordFrequencyEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for token in tokens {
        let token = token.as_ref();
        match positions.get(token) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                positions.insert(token.to_string(), entries.len());
                entries.push(WordFrequencyEntry {
                    token: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-occurrence order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(n);
    entries
}

pub fn top_10<I>(tokens: I) -> Vec<WordFrequencyEntry>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    top_n(tokens, TOP_N)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[WordFrequencyEntry]) -> Vec<(&str, usize)> {
        entries.iter().map(|e| (e.token.as_str(), e.count)).collect()
    }

    #[test]
    fn test_counts_and_orders_by_frequency() {
        let ranked = top_10(["a", "b", "a", "c", "b", "a"]);
        assert_eq!(pairs(&ranked), vec![("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_korean_tokens() {
        let ranked = top_10(["사과", "사과", "바나나", "포도", "바나나", "사과"]);
        assert_eq!(pairs(&ranked), vec![("사과", 3), ("바나나", 2), ("포도", 1)]);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let ranked = top_10(["zeta", "alpha", "mid", "alpha", "zeta", "mid"]);
        assert_eq!(pairs(&ranked), vec![("zeta", 2), ("alpha", 2), ("mid", 2)]);
    }

    #[test]
    fn test_later_token_overtakes_on_count() {
        let ranked = top_10(["one", "two", "two"]);
        assert_eq!(pairs(&ranked), vec![("two", 2), ("one", 1)]);
    }

    #[test]
    fn test_truncates_to_ten() {
        let tokens: Vec<String> = (0..25).map(|i| format!("word{}", i)).collect();
        let ranked = top_10(&tokens);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].token, "word0");
        assert_eq!(ranked[9].token, "word9");
    }

    #[test]
    fn test_fewer_than_ten_returns_all() {
        let ranked = top_10(["solo", "pair", "pair"]);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_output_is_non_increasing() {
        let text = "q w e r t y q w e r q w e q w q x x x x x x";
        let ranked = top_10(text.split_whitespace());

        assert!(ranked.len() <= 10);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(ranked[0].token, "x");
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(top_10(empty).is_empty());
    }

    #[test]
    fn test_top_n_custom_limit() {
        let ranked = top_n(["a", "b", "c"], 2);
        assert_eq!(pairs(&ranked), vec![("a", 1), ("b", 1)]);
    }
}
