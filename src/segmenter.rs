/*!
 * Sentence segmentation for Hindi text.
 *
 * Sentences end on maximal runs of Devanagari danda (`।`), double danda
 * (`॥`), `!` or `?`. The terminator run is kept as the sentence suffix and a
 * trailing fragment with no terminator is still emitted. Bodies that are
 * blank after trimming never produce a sentence.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that close a sentence
pub const TERMINATORS: [char; 4] = ['।', '॥', '!', '?'];

static TERMINATOR_RUN: Lazy<Regex> = Lazy::new(|| {
    let class: String = TERMINATORS.iter().map(|c| regex::escape(&c.to_string())).collect();
    Regex::new(&format!("[{}]+", class)).expect("terminator pattern is valid")
});

/// One segmented sentence: trimmed body followed by its terminator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Zero-based position in document order
    pub index: usize,
    text: String,
    body_len: usize,
}

impl Sentence {
    /// Create a sentence from a body and its terminator suffix
    pub fn new(index: usize, body: &str, terminator: &str) -> Self {
        let mut text = String::with_capacity(body.len() + terminator.len());
        text.push_str(body);
        text.push_str(terminator);
        Self {
            index,
            text,
            body_len: body.len(),
        }
    }

    /// Full sentence text, body plus terminator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sentence body without the terminator suffix
    pub fn body(&self) -> &str {
        &self.text[..self.body_len]
    }

    /// Terminator suffix, empty for a trailing fragment
    pub fn terminator(&self) -> &str {
        &self.text[self.body_len..]
    }

    /// Whether the sentence ended on a terminator run
    pub fn is_terminated(&self) -> bool {
        self.body_len < self.text.len()
    }
}

/// Lazy iterator over the sentences of a text.
///
/// Cloning the iterator restarts from the clone point, so a caller can walk
/// the same document more than once without re-reading it.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    position: usize,
    next_index: usize,
}

impl<'a> Sentences<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            next_index: 0,
        }
    }

    fn emit(&mut self, body: &str, terminator: &str) -> Sentence {
        let sentence = Sentence::new(self.next_index, body, terminator);
        self.next_index += 1;
        sentence
    }
}

impl Iterator for Sentences<'_> {
    type Item = Sentence;

    fn next(&mut self) -> Option<Sentence> {
        while self.position < self.text.len() {
            match TERMINATOR_RUN.find_at(self.text, self.position) {
                Some(run) => {
                    let body = self.text[self.position..run.start()].trim();
                    self.position = run.end();

                    // A blank body drops its terminator run with it
                    if body.is_empty() {
                        continue;
                    }

                    return Some(self.emit(body, run.as_str()));
                }
                None => {
                    let body = self.text[self.position..].trim();
                    self.position = self.text.len();

                    if body.is_empty() {
                        return None;
                    }

                    return Some(self.emit(body, ""));
                }
            }
        }

        None
    }
}

/// Split a document into its ordered sentences
pub fn segment(text: &str) -> Vec<Sentence> {
    Sentences::new(text).collect()
}

/// Summary of a segmentation pass, used for run logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// Number of sentences produced
    pub sentences: usize,
    /// Number of sentences that ended on a terminator
    pub terminated: usize,
    /// Whether the document ended on an unterminated fragment
    pub trailing_fragment: bool,
}

impl SegmentStats {
    pub fn from_sentences(sentences: &[Sentence]) -> Self {
        Self {
            sentences: sentences.len(),
            terminated: sentences.iter().filter(|s| s.is_terminated()).count(),
            trailing_fragment: sentences.last().is_some_and(|s| !s.is_terminated()),
        }
    }
}

/// Shorten text to `max_chars` characters for log previews
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut shortened: String = text.chars().take(max_chars).collect();
        shortened.push_str("...");
        shortened
    }
}
