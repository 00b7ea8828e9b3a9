use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tfidf_summarizer::{ExecutionMode, Summarizer, Summary, DEFAULT_REDUCTION_FACTOR};
use tracing_subscriber::EnvFilter;

/// Extractive TF-IDF text summarizer
#[derive(Parser, Debug)]
#[command(author, version, about = "Extractive TF-IDF text summarizer", long_about = None)]
struct Args {
    /// Input file; stdin when absent or "-"
    path: Option<PathBuf>,

    /// Fraction of sentences to drop (clamped to 0.0 - 1.0)
    #[arg(short, long, default_value_t = DEFAULT_REDUCTION_FACTOR, allow_negative_numbers = true)]
    reduction: f64,

    /// Rank sentences on a worker pool
    #[arg(short, long)]
    parallel: bool,

    /// Worker cap for parallel mode (implies --parallel).
    /// Falls back to SUMMARIZER_WORKERS, then to the number of cores.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Run both modes, print both timings, fail if outputs differ
    #[arg(long)]
    compare: bool,

    /// Print per-sentence scores to stderr
    #[arg(long)]
    scores: bool,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a str,
    reduction_factor: f64,
    sentence_count: usize,
    kept_count: usize,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    mode: ExecutionMode,
    workers: usize,
    elapsed_ms: f64,
}

impl Run {
    fn new(mode: ExecutionMode, summary: &Summary) -> Self {
        Run {
            mode,
            workers: mode.worker_count(),
            elapsed_ms: summary.elapsed_millis(),
        }
    }
}

/// `--verbose` wins; otherwise `RUST_LOG` as given, or `warn` when it is
/// unset, blank or unparsable.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_tracing(verbose: bool) {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn detect_workers(flag: Option<usize>) -> Option<usize> {
    if flag.is_some() {
        return flag;
    }
    let raw = env::var("SUMMARIZER_WORKERS").ok()?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring invalid SUMMARIZER_WORKERS");
            None
        }
    }
}

// 不正なUTF-8は置換文字にして続行する
fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(p) if p != Path::new("-") => {
            fs::read(p).with_context(|| format!("failed to read {}", p.display()))?
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!("input is not valid UTF-8, replacing invalid bytes");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let text = read_input(args.path.as_deref())?;
    let workers = detect_workers(args.workers);
    let parallel_mode = ExecutionMode::Parallel { workers };
    let mode = if args.parallel || args.workers.is_some() {
        parallel_mode
    } else {
        ExecutionMode::Sequential
    };

    let summarizer = Summarizer::new().with_reduction_factor(args.reduction);
    let summary = summarizer.with_mode(mode).summarize_timed(&text);
    let mut runs = vec![Run::new(mode, &summary)];

    if args.compare {
        let other_mode = match mode {
            ExecutionMode::Sequential => parallel_mode,
            ExecutionMode::Parallel { .. } => ExecutionMode::Sequential,
        };
        let other = summarizer.with_mode(other_mode).summarize_timed(&text);
        runs.push(Run::new(other_mode, &other));
        if other.text != summary.text {
            bail!("sequential and parallel summaries differ");
        }
    }

    if args.scores {
        let (doc, scores) = summarizer.with_mode(mode).analyze(&text);
        for (sentence, score) in doc.iter().zip(&scores.scores) {
            eprintln!("{:>4} {:>10.6}  {}", sentence.index(), score, sentence.text());
        }
    }

    if args.json {
        let report = Report {
            summary: &summary.text,
            reduction_factor: args.reduction,
            sentence_count: summary.sentence_count,
            kept_count: summary.kept_count,
            runs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary.text);
        for run in &runs {
            eprintln!(
                "[{:?}, workers={}] {:.3} milliseconds elapsed",
                run.mode, run.workers, run.elapsed_ms
            );
        }
    }

    Ok(())
}
