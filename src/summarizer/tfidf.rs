use num::{Float, NumCast};
use serde::Serialize;

use crate::summarizer::{corpus::DocumentFrequency, token::FrequencyTable};

/// TF-IDF計算エンジンのトレイト
///
/// Defines how term frequency, inverse document frequency and their product
/// are computed. `N` is the float type the weights are carried in.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// TFの計算
    /// # Arguments
    /// * `count` - 文中のtokenの出現回数
    /// * `token_sum` - 文中のtoken総数
    fn tf_calc(count: u32, token_sum: u64) -> N;

    /// IDFの計算
    /// # Arguments
    /// * `doc_num` - 文の総数
    /// * `doc_freq` - tokenを含む文の数
    fn idf_calc(doc_num: u64, doc_freq: u64) -> N;

    /// `tf * idf` for one token of one sentence
    #[inline]
    fn weight(freq: &FrequencyTable, df: &DocumentFrequency, token: &str) -> N {
        let tf = <Self as TFIDFEngine<N>>::tf_calc(freq.token_count(token), freq.token_sum());
        let idf = <Self as TFIDFEngine<N>>::idf_calc(df.doc_num(), df.get_term_count(token));
        tf * idf
    }

    /// Weights of every distinct token in `freq`, in first-occurrence order
    fn weight_vec<'a>(
        index: usize,
        freq: &'a FrequencyTable,
        df: &DocumentFrequency,
    ) -> SentenceWeights<'a, N> {
        let weights = freq
            .token_set_ref_str()
            .into_iter()
            .map(|token| (token, <Self as TFIDFEngine<N>>::weight(freq, df, token)))
            .collect();
        SentenceWeights { index, weights }
    }
}

/// デフォルトのTF-IDFエンジン
///
/// Elementary TF-IDF with no smoothing:
/// - `tf = count / token_sum`, or 0 when the sentence has no tokens
/// - `idf = ln(doc_num / doc_freq)`, or 0 when the token was never seen
///
/// A token present in every sentence gets `idf = ln(1) = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    #[inline]
    fn tf_calc(count: u32, token_sum: u64) -> N {
        if token_sum == 0 {
            return N::zero();
        }
        let count = <N as NumCast>::from(count).unwrap_or_else(N::zero);
        let token_sum = <N as NumCast>::from(token_sum).unwrap_or_else(N::one);
        count / token_sum
    }

    #[inline]
    fn idf_calc(doc_num: u64, doc_freq: u64) -> N {
        // dfは出現したtokenにしか引かれないが、念のため0除算を避ける
        if doc_freq == 0 || doc_num == 0 {
            return N::zero();
        }
        let doc_num = <N as NumCast>::from(doc_num).unwrap_or_else(N::one);
        let doc_freq = <N as NumCast>::from(doc_freq).unwrap_or_else(N::one);
        (doc_num / doc_freq).ln()
    }
}

/// One row of the weight matrix: the TF-IDF weight of every distinct token
/// of one sentence. Tokens absent from the sentence are simply not stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SentenceWeights<'a, N> {
    /// sentence index
    pub index: usize,
    /// (token, weight) in first-occurrence order
    pub weights: Vec<(&'a str, N)>,
}

impl<'a, N> SentenceWeights<'a, N>
where
    N: Float,
{
    /// Weight of `token` in this sentence (0 if absent)
    pub fn get(&self, token: &str) -> N {
        self.weights
            .iter()
            .find(|(t, _)| *t == token)
            .map_or(N::zero(), |&(_, w)| w)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
