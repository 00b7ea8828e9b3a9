use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::summarizer::token::FrequencyTable;

/// Corpus-wide document frequency, where a "document" is one sentence.
///
/// Each sentence contributes exactly 1 to every distinct token it contains,
/// however often the token repeats. Partial instances built on different
/// threads are combined with [`DocumentFrequency::merge`], which only sums
/// counts, so merge order never changes the result.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DocumentFrequency {
    /// number of sentences counted
    doc_num: u64,
    /// token -> number of sentences containing it
    #[serde(with = "indexmap::map::serde_seq")]
    term_counts: IndexMap<Box<str>, u64>,
}

impl DocumentFrequency {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Build from all per-sentence tables on the current thread
    pub fn from_tables(tables: &[FrequencyTable]) -> Self {
        let mut df = Self::new();
        for table in tables {
            df.add_table(table);
        }
        df
    }

    /// Add one sentence given its distinct tokens.
    /// The caller must pass each token at most once.
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            self.bump(term.as_ref(), 1);
        }
    }

    /// Add one sentence from its frequency table
    pub fn add_table(&mut self, table: &FrequencyTable) {
        self.doc_num += 1;
        // テーブルのキーは重複しないのでそのまま +1
        for (term, _) in table.iter() {
            self.bump(term, 1);
        }
    }

    /// Sum two partial counts.
    /// Commutative and associative, usable as a parallel reduction.
    pub fn merge(self, other: DocumentFrequency) -> Self {
        // 大きい方へ小さい方を足し込む
        let (mut merged, small) = if self.term_counts.len() >= other.term_counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        merged.doc_num += small.doc_num;
        for (term, count) in small.term_counts {
            match merged.term_counts.get_mut(&term) {
                Some(existing) => *existing += count,
                None => {
                    merged.term_counts.insert(term, count);
                }
            }
        }
        merged
    }

    #[inline]
    fn bump(&mut self, term: &str, by: u64) {
        if let Some(count) = self.term_counts.get_mut(term) {
            *count += by;
        } else {
            self.term_counts.insert(term.into(), by);
        }
    }

    /// Number of sentences counted
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of sentences containing `term` (0 if never seen)
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct tokens across the document
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }
}

/// Equality ignores insertion order, which differs between merge orders.
impl PartialEq for DocumentFrequency {
    fn eq(&self, other: &Self) -> bool {
        self.doc_num == other.doc_num
            && self.term_counts.len() == other.term_counts.len()
            && self
                .term_counts
                .iter()
                .all(|(term, count)| other.term_counts.get(term) == Some(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(tokens: &[&str]) -> FrequencyTable {
        let mut t = FrequencyTable::new();
        t.add_tokens(tokens);
        t
    }

    #[test]
    fn counts_each_sentence_once_per_token() {
        let tables = vec![
            table(&["cat", "cat", "cat", "dog"]),
            table(&["cat", "bird"]),
            table(&["fish"]),
        ];
        let df = DocumentFrequency::from_tables(&tables);
        assert_eq!(df.doc_num(), 3);
        assert_eq!(df.get_term_count("cat"), 2);
        assert_eq!(df.get_term_count("dog"), 1);
        assert_eq!(df.get_term_count("fish"), 1);
        assert_eq!(df.get_term_count("cow"), 0);
        assert_eq!(df.vocab_size(), 4);
    }

    #[test]
    fn add_set_matches_add_table() {
        let t = table(&["a", "b", "a"]);
        let mut by_set = DocumentFrequency::new();
        by_set.add_set(&t.token_set_ref_str());
        let mut by_table = DocumentFrequency::new();
        by_table.add_table(&t);
        assert_eq!(by_set, by_table);
    }

    #[test]
    fn merge_is_order_independent() {
        let tables = vec![
            table(&["a", "b"]),
            table(&["b", "c"]),
            table(&["c", "d", "a"]),
            table(&["e"]),
        ];
        let whole = DocumentFrequency::from_tables(&tables);

        let left = DocumentFrequency::from_tables(&tables[..1]);
        let mid = DocumentFrequency::from_tables(&tables[1..3]);
        let right = DocumentFrequency::from_tables(&tables[3..]);

        let ab_c = left.clone().merge(mid.clone()).merge(right.clone());
        let a_bc = left.clone().merge(mid.clone().merge(right.clone()));
        let cba = right.merge(mid).merge(left);

        assert_eq!(ab_c, whole);
        assert_eq!(a_bc, whole);
        assert_eq!(cba, whole);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let df = DocumentFrequency::from_tables(&[table(&["x", "y"])]);
        assert_eq!(df.clone().merge(DocumentFrequency::new()), df);
        assert_eq!(DocumentFrequency::new().merge(df.clone()), df);
    }
}
