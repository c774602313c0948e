//! DocumentTextView: Read-Only Text Projection of the Host Document
//!
//! The host editor walks its content tree and hands over every text node as a
//! `(pos, text)` run. The overlay never mutates it.

use serde::{Deserialize, Serialize};

// =============================================================================
// Position units
// =============================================================================

/// Unit the host uses for document positions.
///
/// ProseMirror (and JS strings in general) count UTF-16 code units, which is
/// why that is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionEncoding {
    #[default]
    Utf16,
    Utf8,
    Char,
}

impl PositionEncoding {
    /// Length of `text` in this unit
    pub fn measure(self, text: &str) -> usize {
        match self {
            PositionEncoding::Utf16 => text.encode_utf16().count(),
            PositionEncoding::Utf8 => text.len(),
            PositionEncoding::Char => text.chars().count(),
        }
    }

    /// Convert a byte offset inside `text` to this unit
    pub fn offset(self, text: &str, byte_offset: usize) -> usize {
        match self {
            PositionEncoding::Utf8 => byte_offset,
            _ => self.measure(&text[..byte_offset]),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

/// One text node of the host document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// Host position of the run's first character
    pub pos: usize,
    pub text: String,
}

impl TextRun {
    pub fn new(pos: usize, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
        }
    }
}

/// Ordered text runs of a document snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentTextView {
    runs: Vec<TextRun>,
}

impl DocumentTextView {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// True when there is no text at all
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    /// Flattened text of the whole document.
    ///
    /// Runs that do not continue where the previous one ended sit in different
    /// blocks; those get a single space between them.
    pub fn plain_text(&self, encoding: PositionEncoding) -> String {
        let mut out = String::new();
        let mut expected_pos: Option<usize> = None;

        for run in self.runs.iter().filter(|r| !r.text.is_empty()) {
            if let Some(expected) = expected_pos {
                if run.pos != expected {
                    out.push(' ');
                }
            }
            out.push_str(&run.text);
            expected_pos = Some(run.pos + encoding.measure(&run.text));
        }

        out
    }
}

impl From<Vec<TextRun>> for DocumentTextView {
    fn from(runs: Vec<TextRun>) -> Self {
        Self::new(runs)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_units() {
        let text = "a😀é";

        assert_eq!(PositionEncoding::Utf8.measure(text), 7);
        assert_eq!(PositionEncoding::Utf16.measure(text), 4);
        assert_eq!(PositionEncoding::Char.measure(text), 3);
    }

    #[test]
    fn test_offset_conversion() {
        let text = "😀 fox";
        let byte = text.find("fox").unwrap();

        assert_eq!(PositionEncoding::Utf8.offset(text, byte), 5);
        assert_eq!(PositionEncoding::Utf16.offset(text, byte), 3);
        assert_eq!(PositionEncoding::Char.offset(text, byte), 2);
    }

    #[test]
    fn test_plain_text_joins_blocks_with_space() {
        // Paragraph 1: "Hello " (1..7) + bold "world" (7..12); paragraph 2 starts at 14
        let view = DocumentTextView::new(vec![
            TextRun::new(1, "Hello "),
            TextRun::new(7, "world"),
            TextRun::new(14, "Second paragraph"),
        ]);

        assert_eq!(
            view.plain_text(PositionEncoding::Utf16),
            "Hello world Second paragraph"
        );
    }

    #[test]
    fn test_empty_view() {
        assert!(DocumentTextView::default().is_empty());
        assert!(DocumentTextView::new(vec![TextRun::new(1, "")]).is_empty());
        assert_eq!(DocumentTextView::default().plain_text(PositionEncoding::Utf16), "");
    }

    #[test]
    fn test_deserialize_from_js_shape() {
        let view: DocumentTextView =
            serde_json::from_str(r#"[{"pos": 1, "text": "abc"}, {"pos": 6, "text": "d"}]"#).unwrap();

        assert_eq!(view.runs().len(), 2);
        assert_eq!(view.runs()[1], TextRun::new(6, "d"));
    }
}
