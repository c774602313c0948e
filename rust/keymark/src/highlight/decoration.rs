//! Decorations: Non-Content Annotations over Document Ranges
//!
//! A decoration is derived 1:1 from a keyword match and carries everything the
//! host needs to render it and everything pointer routing needs to map a DOM
//! element back to the keyword.

use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// DOM attributes of a decorated span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationAttrs {
    pub class: String,
    pub style: String,
    #[serde(rename = "data-keyword")]
    pub data_keyword: String,
    #[serde(rename = "data-from")]
    pub data_from: String,
    #[serde(rename = "data-to")]
    pub data_to: String,
}

/// Inline decoration over `[from, to)` in host positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub from: usize,
    pub to: usize,
    pub keyword: String,
    pub attrs: DecorationAttrs,
}

impl Decoration {
    pub fn inline(from: usize, to: usize, keyword: &str, class: &str, style: &str) -> Self {
        Self {
            from,
            to,
            keyword: keyword.to_string(),
            attrs: DecorationAttrs {
                class: class.to_string(),
                style: style.to_string(),
                data_keyword: keyword.to_string(),
                data_from: from.to_string(),
                data_to: to.to_string(),
            },
        }
    }

    /// The interaction tag pointer routing will read back from the DOM
    pub fn tag(&self) -> SpanTag {
        SpanTag {
            keyword: self.keyword.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

/// A full decoration pass. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set ordered by start position (stable for equal starts)
    pub fn new(mut decorations: Vec<Decoration>) -> Self {
        decorations.sort_by_key(|d| d.from);
        Self { decorations }
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    /// Decorations covering host position `pos`
    pub fn at(&self, pos: usize) -> impl Iterator<Item = &Decoration> {
        self.decorations
            .iter()
            .filter(move |d| d.from <= pos && pos < d.to)
    }

    pub fn into_vec(self) -> Vec<Decoration> {
        self.decorations
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decorations.iter()
    }
}

// =============================================================================
// SpanTag
// =============================================================================

/// Identity of a decorated span as seen from the DOM
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanTag {
    pub keyword: String,
    pub from: usize,
    pub to: usize,
}

impl SpanTag {
    /// Read a tag back from element attributes.
    ///
    /// `None` when the element carries no keyword; missing or garbled bounds
    /// read as 0 so the keyword still routes.
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let keyword = get("data-keyword").filter(|k| !k.is_empty())?;
        let bound = |name: &str| get(name).and_then(|v| v.parse().ok()).unwrap_or(0);

        Some(Self {
            keyword,
            from: bound("data-from"),
            to: bound("data-to"),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
