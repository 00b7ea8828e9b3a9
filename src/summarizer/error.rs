use thiserror::Error;

/// Internal faults of the ranking pipeline.
///
/// None of these reach callers of the summarization entry points; the
/// coordinator degrades to sequential ranking instead.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SummarizerError>;
