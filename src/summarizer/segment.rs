use serde::{Deserialize, Serialize};

/// A normalized word unit: case-folded, leading/trailing punctuation stripped.
pub type Token = Box<str>;

/// 文
/// One sentence of the input, with its original surface text kept
/// verbatim for output reconstruction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    index: usize,
    text: String,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Build a sentence from its trimmed surface text.
    /// `index` is the position among the kept sentences of the document.
    pub fn new(index: usize, text: &str) -> Self {
        Sentence {
            index,
            text: text.to_string(),
            tokens: tokenize(text),
        }
    }

    /// Original-order index, contiguous from 0
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Surface text as it appeared in the input (trimmed)
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized tokens in order of appearance
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// `true` if the sentence produced no tokens (e.g. `"..."`)
    #[inline]
    pub fn has_no_tokens(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The ordered sentences of one input string.
///
/// Built once per call and dropped when the call returns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    #[inline]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    #[inline]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// Surface texts of all sentences in original order
    pub fn sentence_texts(&self) -> Vec<&str> {
        self.sentences.iter().map(|s| s.text()).collect()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

#[inline]
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split `text` into sentences.
///
/// A boundary is a run of `.`, `!` or `?` followed by whitespace or the end
/// of the string. A run like `"?!"` or `"..."` counts as one boundary.
/// Each sentence is trimmed, and sentences that are empty after trimming are
/// dropped. Text after the last boundary becomes the final sentence.
///
/// Never fails: empty or all-whitespace input yields an empty document.
pub fn segment(text: &str) -> Document {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }
        // 連続した終端記号はまとめて1つの境界
        let mut end = idx + c.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }
        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace(),
        };
        if at_boundary {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        push_sentence(&mut sentences, &text[start..]);
    }

    Document { sentences }
}

fn push_sentence(sentences: &mut Vec<Sentence>, raw: &str) {
    let surface = raw.trim();
    if surface.is_empty() {
        return;
    }
    let index = sentences.len();
    sentences.push(Sentence::new(index, surface));
}

/// Split a sentence on whitespace, strip non-alphanumeric characters from
/// both ends of each unit and case-fold it. Units left empty are dropped.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    sentence
        .split_whitespace()
        .map(|unit| unit.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|unit| !unit.is_empty())
        .map(|unit| unit.to_lowercase().into_boxed_str())
        .collect()
}
