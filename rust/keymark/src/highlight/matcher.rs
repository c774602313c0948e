//! KeywordIndex: Case-Insensitive Keyword Occurrence Matching
//!
//! Finds every occurrence of every keyword in a piece of text.
//!
//! # Semantics
//! - Keywords are matched independently: overlapping spans from different
//!   keywords are all reported (overlap is a rendering concern)
//! - Per keyword, occurrences are non-overlapping: the cursor jumps past each
//!   hit, so "aa" in "aaaa" yields [0,2) and [2,4)
//! - Empty keywords never match
//! - Spans are byte offsets into the original text and cover exactly as many
//!   characters as the keyword
//!
//! # Matching paths
//! - ASCII keyword over ASCII text: Aho-Corasick with ASCII case folding
//! - Anything else: char-wise Unicode lowercase comparison

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// One occurrence of a keyword in searched text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    /// Byte offset of the first matched character
    pub start: usize,
    /// Byte offset just past the last matched character
    pub end: usize,
    /// The keyword as supplied (original case)
    pub keyword: String,
}

/// Compiled form of a single keyword
#[derive(Debug, Clone)]
struct KeywordPattern {
    keyword: String,
    chars: Vec<char>,
    /// Present only for ASCII keywords
    ascii: Option<AhoCorasick>,
}

impl KeywordPattern {
    fn compile(keyword: &str) -> Self {
        let ascii = if keyword.is_ascii() {
            // Single-pattern automaton: leftmost-first iteration gives exactly the
            // "advance past each hit" scan. A build failure just means the slow path.
            AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostFirst)
                .ascii_case_insensitive(true)
                .build([keyword])
                .ok()
        } else {
            None
        };

        Self {
            keyword: keyword.to_string(),
            chars: keyword.chars().collect(),
            ascii,
        }
    }

    fn span(&self, start: usize, end: usize) -> MatchSpan {
        MatchSpan {
            start,
            end,
            keyword: self.keyword.clone(),
        }
    }
}

// =============================================================================
// KeywordIndex
// =============================================================================

/// A keyword list compiled for repeated scanning.
///
/// Built once when the keyword set changes and reused on every decoration
/// pass. Scanning never mutates the index.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    patterns: Vec<KeywordPattern>,
}

impl KeywordIndex {
    /// Compile a keyword list. Empty keywords are dropped, order is kept.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let patterns = keywords
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|k| !k.is_empty())
            .map(KeywordPattern::compile)
            .collect();

        Self { patterns }
    }

    /// Number of searchable (non-empty) keywords
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Searchable keywords in input order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.keyword.as_str())
    }

    /// Find all occurrences in `text`.
    ///
    /// Output order: keywords in input order, occurrences left to right.
    pub fn find(&self, text: &str) -> Vec<MatchSpan> {
        if text.is_empty() || self.patterns.is_empty() {
            return vec![];
        }

        let ascii_text = text.is_ascii();
        let mut char_table: Option<Vec<(usize, char)>> = None;
        let mut spans = Vec::new();

        for pattern in &self.patterns {
            match (&pattern.ascii, ascii_text) {
                (Some(automaton), true) => {
                    spans.extend(
                        automaton
                            .find_iter(text)
                            .map(|m| pattern.span(m.start(), m.end())),
                    );
                }
                _ => {
                    let chars = char_table.get_or_insert_with(|| text.char_indices().collect());
                    scan_chars(text, chars, pattern, &mut spans);
                }
            }
        }

        spans
    }
}

/// Find all occurrences of `keywords` in `text`.
///
/// Convenience over [`KeywordIndex`] for one-off scans.
pub fn find_matches<S: AsRef<str>>(text: &str, keywords: &[S]) -> Vec<MatchSpan> {
    KeywordIndex::new(keywords).find(text)
}

// =============================================================================
// Unicode path
// =============================================================================

fn scan_chars(
    text: &str,
    chars: &[(usize, char)],
    pattern: &KeywordPattern,
    out: &mut Vec<MatchSpan>,
) {
    let n = pattern.chars.len();
    let mut i = 0;

    while i + n <= chars.len() {
        let hit = pattern
            .chars
            .iter()
            .zip(&chars[i..i + n])
            .all(|(&k, &(_, c))| chars_eq_ignore_case(c, k));

        if hit {
            let start = chars[i].0;
            let end = chars.get(i + n).map_or(text.len(), |&(b, _)| b);
            out.push(pattern.span(start, end));
            i += n;
        } else {
            i += 1;
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

// =============================================================================
// Tests
// =============================================================================
