pub mod segment;
pub mod token;
pub mod corpus;
pub mod tfidf;
pub mod scoring;
pub mod select;
pub mod coordinator;
pub mod error;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::summarizer::{
    coordinator::{rank, ExecutionMode},
    scoring::ScoreVector,
    segment::{segment, Document},
    select::{join_sentences, select, select_indices},
};

/// Fraction of sentences dropped when the caller does not say otherwise
pub const DEFAULT_REDUCTION_FACTOR: f64 = 0.4;

/// Settings for one [`Summarizer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Fraction of sentences to drop, clamped into `[0, 1]` at use
    pub reduction_factor: f64,
    /// Sequential or parallel ranking
    pub mode: ExecutionMode,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            reduction_factor: DEFAULT_REDUCTION_FACTOR,
            mode: ExecutionMode::Sequential,
        }
    }
}

/// Result of one summarization call, with timing for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Kept sentences in original order, joined by a single space
    pub text: String,
    /// Sentences found in the input
    pub sentence_count: usize,
    /// Sentences kept in `text`
    pub kept_count: usize,
    /// Wall-clock time of the whole pipeline
    pub elapsed: Duration,
}

impl Summary {
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Extractive TF-IDF summarizer
///
/// Holds configuration only. Every call segments, ranks and selects from
/// scratch, and nothing is kept between calls, so one instance can be
/// shared freely across threads.
///
/// # Examples
/// ```
/// use tfidf_summarizer::Summarizer;
///
/// let text = "Rust is fast. Rust is safe. Cats sleep a lot.";
/// let summary = Summarizer::new()
///     .with_reduction_factor(0.5)
///     .parallel()
///     .summarize(text);
/// assert!(!summary.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Summarizer {
    config: SummarizerConfig,
}

impl Summarizer {
    /// Sequential summarizer dropping 40% of sentences
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SummarizerConfig) -> Self {
        Self { config }
    }

    pub fn with_reduction_factor(mut self, reduction_factor: f64) -> Self {
        self.config.reduction_factor = reduction_factor;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn sequential(self) -> Self {
        self.with_mode(ExecutionMode::Sequential)
    }

    pub fn parallel(self) -> Self {
        self.with_mode(ExecutionMode::parallel())
    }

    /// Parallel with a cap on the worker count
    pub fn with_workers(self, workers: usize) -> Self {
        self.with_mode(ExecutionMode::parallel_with(workers))
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize `text`
    pub fn summarize(&self, text: &str) -> String {
        let (doc, scores) = self.analyze(text);
        select(&doc, &scores, self.config.reduction_factor)
    }

    /// Summarize `text` and report how long it took
    pub fn summarize_timed(&self, text: &str) -> Summary {
        let start = Instant::now();
        let (doc, scores) = self.analyze(text);
        let kept = select_indices(&doc, &scores, self.config.reduction_factor);
        let text = join_sentences(&doc, &kept);
        let elapsed = start.elapsed();

        debug!(
            sentences = doc.len(),
            kept = kept.len(),
            mode = ?self.config.mode,
            elapsed_us = elapsed.as_micros() as u64,
            "summary extracted"
        );
        Summary {
            text,
            sentence_count: doc.len(),
            kept_count: kept.len(),
            elapsed,
        }
    }

    /// Segment and score `text` without selecting
    pub fn analyze(&self, text: &str) -> (Document, ScoreVector) {
        let doc = segment(text);
        let scores = rank(&doc, self.config.mode);
        (doc, scores)
    }
}
