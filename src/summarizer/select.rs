use crate::summarizer::{segment::Document, scoring::ScoreVector, DEFAULT_REDUCTION_FACTOR};

/// Separator placed between kept sentences in the output
pub const SENTENCE_SEPARATOR: &str = " ";

/// Clamp a reduction factor into `[0, 1]`.
/// NaN falls back to [`DEFAULT_REDUCTION_FACTOR`].
#[inline]
pub fn clamp_reduction_factor(reduction_factor: f64) -> f64 {
    if reduction_factor.is_nan() {
        return DEFAULT_REDUCTION_FACTOR;
    }
    reduction_factor.clamp(0.0, 1.0)
}

/// Number of sentences to keep:
/// `max(1, round(sentence_count * (1 - reduction_factor)))`, and 0 for an
/// empty document. `reduction_factor` is the fraction of sentences dropped.
#[inline]
pub fn keep_count(sentence_count: usize, reduction_factor: f64) -> usize {
    if sentence_count == 0 {
        return 0;
    }
    let r = clamp_reduction_factor(reduction_factor);
    let keep = (sentence_count as f64 * (1.0 - r)).round() as usize;
    keep.max(1)
}

/// Indices of the sentences to keep, in ascending (document) order.
///
/// Sentences are taken by descending score, ties by ascending index.
/// Sentences without tokens are only eligible when no sentence has tokens.
pub fn select_indices(doc: &Document, scores: &ScoreVector, reduction_factor: f64) -> Vec<usize> {
    if doc.is_empty() {
        return Vec::new();
    }
    let any_tokens = doc.iter().any(|s| !s.has_no_tokens());
    let candidates: Vec<usize> = scores
        .ranking()
        .into_iter()
        .filter(|&i| match doc.get(i) {
            Some(sentence) => !any_tokens || !sentence.has_no_tokens(),
            None => false,
        })
        .collect();

    let keep = keep_count(doc.len(), reduction_factor).min(candidates.len());
    let mut kept: Vec<usize> = candidates.into_iter().take(keep).collect();
    // 元の順番に戻す
    kept.sort_unstable();
    kept
}

/// Pick the sentences to keep and join their surface text in original order.
pub fn select(doc: &Document, scores: &ScoreVector, reduction_factor: f64) -> String {
    let kept = select_indices(doc, scores, reduction_factor);
    join_sentences(doc, &kept)
}

/// Join the surface text of `indices` (assumed ascending) with a single space
pub fn join_sentences(doc: &Document, indices: &[usize]) -> String {
    indices
        .iter()
        .filter_map(|&i| doc.get(i))
        .map(|s| s.text())
        .collect::<Vec<&str>>()
        .join(SENTENCE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::segment::segment;

    #[test]
    fn keep_count_law() {
        assert_eq!(keep_count(10, 0.4), 6);
        assert_eq!(keep_count(1, 1.0), 1);
        assert_eq!(keep_count(5, 0.0), 5);
        assert_eq!(keep_count(0, 0.4), 0);
        assert_eq!(keep_count(3, 0.5), 2); // 1.5 rounds away from zero
        assert_eq!(keep_count(4, 0.9), 1); // 0.4 rounds to 0, floor of 1
    }

    #[test]
    fn keep_count_clamps_out_of_range() {
        assert_eq!(keep_count(10, 1.5), keep_count(10, 1.0));
        assert_eq!(keep_count(10, -0.3), keep_count(10, 0.0));
        assert_eq!(keep_count(10, f64::NAN), keep_count(10, DEFAULT_REDUCTION_FACTOR));
        assert_eq!(keep_count(10, f64::INFINITY), 1);
    }

    #[test]
    fn selects_top_scores_in_document_order() {
        let doc = segment("Zero here. One here. Two here. Three here.");
        let scores = ScoreVector::new(vec![0.1, 0.9, 0.2, 0.8]);
        assert_eq!(select_indices(&doc, &scores, 0.5), vec![1, 3]);
        assert_eq!(select(&doc, &scores, 0.5), "One here. Three here.");
    }

    #[test]
    fn ties_prefer_earlier_sentences() {
        let doc = segment("A a. B b. C c. D d.");
        let scores = ScoreVector::new(vec![1.0, 1.0, 1.0, 1.0]);
        assert_eq!(select_indices(&doc, &scores, 0.5), vec![0, 1]);
    }

    #[test]
    fn zero_token_sentences_are_skipped() {
        let doc = segment("... Real words here. !!! More words.");
        assert_eq!(doc.len(), 4);
        let scores = ScoreVector::new(vec![0.0, 0.0, 0.0, 0.0]);
        // keep all: only the two sentences with tokens survive
        assert_eq!(select_indices(&doc, &scores, 0.0), vec![1, 3]);
    }

    #[test]
    fn all_zero_token_document_keeps_one() {
        let doc = segment("... !!!");
        let scores = ScoreVector::new(vec![0.0, 0.0]);
        assert_eq!(select(&doc, &scores, 1.0), "...");
    }

    #[test]
    fn empty_document_selects_nothing() {
        let doc = segment("");
        assert_eq!(select(&doc, &ScoreVector::default(), 0.4), "");
    }
}
