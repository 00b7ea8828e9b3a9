/// This crate is an extractive text summarizer ranking sentences by TF-IDF.
pub mod summarizer;
pub mod utils;

/// Summarizer
/// The top-level struct of this crate. It splits a text into sentences,
/// weights every token with TF-IDF (each sentence acts as one document),
/// scores sentences by the sum of their token weights and keeps the best
/// ones in original order.
///
/// It holds configuration only:
/// - The reduction factor (fraction of sentences dropped, default 0.4)
/// - The execution mode (sequential, or parallel on a worker pool)
///
/// Both execution modes return byte-identical output for the same input.
pub use summarizer::{Summarizer, SummarizerConfig, Summary, DEFAULT_REDUCTION_FACTOR};

/// Execution Mode
/// Selects single-threaded ranking or a data-parallel ranking on a
/// dedicated rayon pool. `Parallel { workers: None }` uses one worker per
/// available core.
pub use summarizer::coordinator::ExecutionMode;

/// Document and Sentence
/// Output of segmentation. A `Sentence` keeps its original-order index,
/// its trimmed surface text and its normalized tokens.
pub use summarizer::segment::{segment, Document, Sentence};

/// Frequency Table
/// Per-sentence token counts and total token count; the base data for TF.
pub use summarizer::token::FrequencyTable;

/// Document Frequency
/// Number of sentences containing each token; the base data for IDF.
/// Partial counts built on different threads merge in any order.
pub use summarizer::corpus::DocumentFrequency;

/// TF IDF Calculation Engine Trait
/// A trait defining how TF, IDF and their product are computed.
/// `DefaultTFIDFEngine` implements textbook TF-IDF without smoothing for
/// any `num::Float` type (f32, f64).
pub use summarizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Score Vector
/// One importance score per sentence, indexed by sentence index.
pub use summarizer::scoring::ScoreVector;

/// Internal fault category; never returned by the summarization entry points.
pub use summarizer::error::SummarizerError;

/// Summarize `text` on the calling thread.
///
/// `reduction_factor` is the fraction of sentences to drop; values outside
/// `[0, 1]` are clamped. At least one sentence is kept unless the input has
/// none. Pass [`DEFAULT_REDUCTION_FACTOR`] for the usual 40% reduction.
///
/// # Examples
/// ```
/// use tfidf_summarizer::summarize;
///
/// assert_eq!(summarize("Cats are mammals.", 0.9), "Cats are mammals.");
/// assert_eq!(summarize("", 0.4), "");
/// ```
pub fn summarize(text: &str, reduction_factor: f64) -> String {
    Summarizer::new()
        .with_reduction_factor(reduction_factor)
        .summarize(text)
}

/// Summarize `text` using one worker per available core.
///
/// Same output as [`summarize`] for the same arguments.
pub fn parallel_summarize(text: &str, reduction_factor: f64) -> String {
    Summarizer::new()
        .with_reduction_factor(reduction_factor)
        .parallel()
        .summarize(text)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
