use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::summarizer::{
    corpus::DocumentFrequency,
    error::Result,
    scoring::{score, ScoreVector},
    segment::Document,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::FrequencyTable,
};

/// How the frequency, weighting and scoring passes are executed.
/// Both modes produce bit-identical scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Everything on the calling thread
    #[default]
    Sequential,
    /// Fan out over a dedicated worker pool.
    /// `None` or `Some(0)` uses the available hardware concurrency.
    Parallel { workers: Option<usize> },
}

impl ExecutionMode {
    /// Parallel with one worker per available core
    pub fn parallel() -> Self {
        ExecutionMode::Parallel { workers: None }
    }

    /// Parallel with at most `workers` workers
    pub fn parallel_with(workers: usize) -> Self {
        ExecutionMode::Parallel { workers: Some(workers) }
    }

    /// Number of threads this mode runs on
    pub fn worker_count(&self) -> usize {
        match self {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Parallel { workers } => resolve_workers(*workers),
        }
    }
}

#[inline]
fn resolve_workers(workers: Option<usize>) -> usize {
    workers
        .filter(|&w| w > 0)
        .unwrap_or_else(rayon::current_num_threads)
}

/// Score every sentence of `doc` with the default `f64` engine.
pub fn rank(doc: &Document, mode: ExecutionMode) -> ScoreVector {
    rank_with::<f64, DefaultTFIDFEngine>(doc, mode)
}

/// Score every sentence of `doc` with engine `E` in float type `N`.
///
/// If the worker pool for parallel mode cannot be built, the failure is
/// logged and the sequential path is used instead.
pub fn rank_with<N, E>(doc: &Document, mode: ExecutionMode) -> ScoreVector
where
    N: Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    match mode {
        ExecutionMode::Sequential => rank_sequential::<N, E>(doc),
        ExecutionMode::Parallel { workers } => {
            or_sequential::<N, E>(doc, try_rank_parallel_with::<N, E>(doc, workers))
        }
    }
}

/// Scores of a parallel attempt, or a sequential re-run when it failed
fn or_sequential<N, E>(doc: &Document, attempt: Result<ScoreVector>) -> ScoreVector
where
    N: Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    match attempt {
        Ok(scores) => scores,
        Err(err) => {
            warn!(error = %err, "parallel ranking unavailable, falling back to sequential");
            rank_sequential::<N, E>(doc)
        }
    }
}

/// Single-threaded ranking
pub fn rank_sequential<N, E>(doc: &Document) -> ScoreVector
where
    N: Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    let tables: Vec<FrequencyTable> = doc.iter().map(FrequencyTable::from_sentence).collect();
    let df = DocumentFrequency::from_tables(&tables);
    debug!(
        sentences = doc.len(),
        vocab = df.vocab_size(),
        "sequential frequency pass done"
    );

    let scores: Vec<f64> = tables
        .iter()
        .enumerate()
        .map(|(i, table)| score(&<E as TFIDFEngine<N>>::weight_vec(i, table, &df)).into())
        .collect();
    ScoreVector::new(scores)
}

/// Parallel ranking with the default `f64` engine, surfacing pool faults
pub fn try_rank_parallel(doc: &Document, workers: Option<usize>) -> Result<ScoreVector> {
    try_rank_parallel_with::<f64, DefaultTFIDFEngine>(doc, workers)
}

/// Parallel ranking on a dedicated pool of `workers` threads.
///
/// 1. frequency tables are built per chunk of sentences
/// 2. each worker folds its tables into a local [`DocumentFrequency`] and
///    the partials are merged (first barrier)
/// 3. weights and scores are computed per sentence and collected in
///    sentence order (second barrier)
pub fn try_rank_parallel_with<N, E>(doc: &Document, workers: Option<usize>) -> Result<ScoreVector>
where
    N: Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    if doc.is_empty() {
        return Ok(ScoreVector::default());
    }
    let thread_count = resolve_workers(workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()?;

    // スレッド数で割り切れない場合は切り上げ
    let chunk_size = doc.len().div_ceil(thread_count).max(1);
    debug!(
        sentences = doc.len(),
        workers = thread_count,
        chunk_size,
        "parallel ranking started"
    );

    let scores = pool.install(|| {
        let tables: Vec<FrequencyTable> = doc
            .sentences()
            .par_chunks(chunk_size)
            .flat_map_iter(|chunk| chunk.iter().map(FrequencyTable::from_sentence))
            .collect();

        // スレッドごとに部分DFを作ってからマージ
        let df = tables
            .par_iter()
            .fold(DocumentFrequency::new, |mut df, table| {
                df.add_table(table);
                df
            })
            .reduce(DocumentFrequency::new, DocumentFrequency::merge);
        debug!(vocab = df.vocab_size(), "document frequency merged");

        tables
            .par_iter()
            .enumerate()
            .map(|(i, table)| score(&<E as TFIDFEngine<N>>::weight_vec(i, table, &df)).into())
            .collect::<Vec<f64>>()
    });

    Ok(ScoreVector::new(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::{error::SummarizerError, segment::segment};

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn new(seed: u32) -> Self {
            Self(seed)
        }
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    const WORDS: [&str; 24] = [
        "rust", "thread", "memory", "safe", "fast", "the", "a", "of", "compiler",
        "borrow", "checker", "owner", "lifetime", "trait", "generic", "pool",
        "worker", "sentence", "score", "rank", "weight", "corpus", "token", "idf",
    ];

    fn generated_text(seed: u32, sentences: usize) -> String {
        let mut rng = Rng::new(seed);
        let mut out = String::new();
        for _ in 0..sentences {
            let len = 1 + (rng.next_u32() % 12) as usize;
            let words: Vec<&str> = (0..len)
                .map(|_| WORDS[(rng.next_u32() as usize) % WORDS.len()])
                .collect();
            out.push_str(&words.join(" "));
            out.push_str(match rng.next_u32() % 3 {
                0 => ". ",
                1 => "! ",
                _ => "? ",
            });
        }
        out
    }

    #[test]
    fn parallel_matches_sequential_bit_for_bit() {
        for (seed, n) in [(1u32, 1usize), (7, 5), (42, 64), (0xBEEF, 500)] {
            let doc = segment(&generated_text(seed, n));
            let seq = rank(&doc, ExecutionMode::Sequential);
            for workers in [Some(1), Some(2), Some(3), Some(8), None] {
                let par = try_rank_parallel(&doc, workers).expect("pool");
                assert_eq!(seq, par, "seed={seed} n={n} workers={workers:?}");
            }
        }
    }

    #[test]
    fn f32_engine_also_agrees_across_modes() {
        let doc = segment(&generated_text(99, 120));
        let seq = rank_with::<f32, DefaultTFIDFEngine>(&doc, ExecutionMode::Sequential);
        let par = rank_with::<f32, DefaultTFIDFEngine>(&doc, ExecutionMode::parallel_with(4));
        assert_eq!(seq, par);
    }

    #[test]
    fn one_score_per_sentence() {
        let doc = segment("Alpha beta. Gamma delta. Epsilon.");
        assert_eq!(rank(&doc, ExecutionMode::Sequential).len(), 3);
        assert_eq!(rank(&doc, ExecutionMode::parallel()).len(), 3);
    }

    #[test]
    fn empty_document_ranks_to_empty_vector() {
        let doc = segment("");
        assert!(rank(&doc, ExecutionMode::Sequential).is_empty());
        assert!(try_rank_parallel(&doc, Some(4)).expect("pool").is_empty());
    }

    #[test]
    fn ubiquitous_token_never_adds_weight() {
        let doc = segment("The cat sat. The dog ran. The bird flew.");
        let scores = rank(&doc, ExecutionMode::Sequential);
        // "the" is everywhere; each sentence has two other unique tokens
        let expected = 2.0 * (1.0 / 3.0) * 3.0f64.ln();
        for s in &scores.scores {
            assert!((s - expected).abs() < 1e-12);
        }
    }

    // スレッド生成を失敗させてプール構築エラーを作る
    fn failed_pool() -> SummarizerError {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .spawn_handler(|_| Err(std::io::Error::other("no threads")))
            .build()
        {
            Ok(_) => panic!("pool build should fail without threads"),
            Err(err) => SummarizerError::from(err),
        }
    }

    #[test]
    fn pool_failure_falls_back_to_sequential() {
        let doc = segment(&generated_text(3, 40));
        let seq = rank_sequential::<f64, DefaultTFIDFEngine>(&doc);

        let err = failed_pool();
        assert!(matches!(err, SummarizerError::WorkerPool(_)));
        let fallback = or_sequential::<f64, DefaultTFIDFEngine>(&doc, Err(err));
        assert_eq!(fallback, seq);
        assert_eq!(fallback.len(), doc.len());
    }

    #[test]
    fn successful_attempt_is_returned_as_is() {
        let doc = segment("Alpha beta. Gamma delta gamma. Epsilon.");
        let given = ScoreVector::new(vec![3.0, 2.0, 1.0]);
        let kept = or_sequential::<f64, DefaultTFIDFEngine>(&doc, Ok(given.clone()));
        assert_eq!(kept, given);
    }

    #[test]
    fn zero_workers_means_default_pool() {
        assert_eq!(
            ExecutionMode::Parallel { workers: Some(0) }.worker_count(),
            rayon::current_num_threads()
        );
        assert_eq!(ExecutionMode::Sequential.worker_count(), 1);
        assert_eq!(ExecutionMode::parallel_with(3).worker_count(), 3);
    }
}
