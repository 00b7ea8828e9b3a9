use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::summarizer::segment::Sentence;

///  FrequencyTable 構造体
/// 1文の中のtokenの出現回数を管理します
///
/// Counts how often each token occurs in one sentence, along with the
/// sentence's total token count. Tokens iterate in order of first
/// occurrence, so anything summed over a table is summed in the same order
/// no matter which thread built it.
///
/// # Examples
/// ```
/// use tfidf_summarizer::FrequencyTable;
/// let mut table = FrequencyTable::new();
/// table.add_tokens(&["cat", "sat", "cat"]);
///
/// assert_eq!(table.token_count("cat"), 2);
/// assert_eq!(table.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<Box<str>, u32>,
    total_token_count: u64,
}

/// Tokenの追加
impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count every token of a segmented sentence
    pub fn from_sentence(sentence: &Sentence) -> Self {
        let mut table = Self::new();
        table.add_tokens(sentence.tokens());
        table
    }

    /// tokenを追加する
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        if let Some(count) = self.token_count.get_mut(token) {
            *count += 1;
        } else {
            self.token_count.insert(token.into(), 1);
        }
        self.total_token_count += 1;
        self
    }

    /// 複数のtokenを追加する
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

/// 情報取得
impl FrequencyTable {
    /// Occurrences of `token` in this sentence (0 if absent)
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens, repetitions included
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn distinct_count(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }

    /// Distinct tokens in first-occurrence order
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|k| k.as_ref()).collect()
    }

    /// `(token, count)` pairs in first-occurrence order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(k, &v)| (k.as_ref(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_tokens() {
        let mut table = FrequencyTable::new();
        table.add_tokens(&["a", "b", "a", "c", "a"]);
        assert_eq!(table.token_count("a"), 3);
        assert_eq!(table.token_count("b"), 1);
        assert_eq!(table.token_count("z"), 0);
        assert_eq!(table.token_sum(), 5);
        assert_eq!(table.distinct_count(), 3);
    }

    #[test]
    fn keeps_first_occurrence_order() {
        let mut table = FrequencyTable::new();
        table.add_tokens(&["gamma", "alpha", "gamma", "beta"]);
        assert_eq!(table.token_set_ref_str(), vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn builds_from_sentence() {
        let sentence = Sentence::new(0, "The cat saw the other cat.");
        let table = FrequencyTable::from_sentence(&sentence);
        assert_eq!(table.token_count("the"), 2);
        assert_eq!(table.token_count("cat"), 2);
        assert_eq!(table.token_sum(), 6);
    }

    #[test]
    fn empty_sentence_gives_empty_table() {
        let sentence = Sentence::new(0, "...");
        let table = FrequencyTable::from_sentence(&sentence);
        assert!(table.is_empty());
        assert_eq!(table.distinct_count(), 0);
        assert_eq!(table.iter().count(), 0);
    }
}
