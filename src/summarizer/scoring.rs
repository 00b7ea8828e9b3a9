use std::fmt;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::{summarizer::tfidf::SentenceWeights, utils::sort::rank_desc_stable};

/// Importance of one sentence: the sum of the TF-IDF weights of its
/// distinct tokens.
///
/// A sum rather than an average, so a sentence covering more informative
/// terms outranks a shorter one. Summation follows the row's token order.
#[inline]
pub fn score<N>(row: &SentenceWeights<'_, N>) -> N
where
    N: Float,
{
    row.weights.iter().fold(N::zero(), |acc, &(_, w)| acc + w)
}

/// Per-sentence scores, indexed by sentence index
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScoreVector {
    pub scores: Vec<f64>,
}

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        ScoreVector { scores }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.scores.get(index).copied()
    }

    /// Sentence indices by descending score, ties by ascending index
    pub fn ranking(&self) -> Vec<usize> {
        rank_desc_stable(&self.scores)
    }
}

impl fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.scores.iter().enumerate() {
            writeln!(f, "{:>4}: {:.6}", i, s)?;
        }
        Ok(())
    }
}
