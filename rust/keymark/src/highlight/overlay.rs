//! KeywordOverlay: Decoration Overlay Controller
//!
//! Bridges the keyword index to the host editor:
//! - Holds the current keyword set outside the document
//! - Produces a fresh DecorationSet on every document-state recomputation
//! - Routes delegated pointer over/out events to the hover/leave callbacks
//! - Asks the host for a no-op refresh when keywords change
//!
//! The decoration pass is a pure function of (document, keywords, config).
//! The only mutable state besides the keywords is which span the pointer is
//! currently over, which never feeds into decorations.

use crate::highlight::{
    Decoration, DecorationSet, DocumentTextView, KeywordIndex, OverlayConfig, OverlayOptions,
    SpanTag,
};

// =============================================================================
// Host interface
// =============================================================================

/// The host editor view, as far as the overlay is concerned
pub trait EditorView {
    /// Re-run the decoration pass without touching content, selection or
    /// history (ProseMirror: `view.dispatch(state.tr)`).
    fn request_refresh(&self);
}

// =============================================================================
// KeywordOverlay
// =============================================================================

/// Keyword highlight controller.
///
/// `E` is the raw pointer event type handed to the hover callback.
pub struct KeywordOverlay<E> {
    keywords: Vec<String>,
    index: KeywordIndex,
    options: OverlayOptions<E>,
    view: Option<Box<dyn EditorView>>,
    hovered: Option<SpanTag>,
}

impl<E> Default for KeywordOverlay<E> {
    fn default() -> Self {
        Self::new(OverlayOptions::default())
    }
}

impl<E> KeywordOverlay<E> {
    /// Create an overlay with an empty keyword set and no attached view
    pub fn new(options: OverlayOptions<E>) -> Self {
        Self {
            keywords: Vec::new(),
            index: KeywordIndex::default(),
            options,
            view: None,
            hovered: None,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.options.config
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    // -------------------------------------------------------------------------
    // Host lifecycle
    // -------------------------------------------------------------------------

    pub fn attach(&mut self, view: Box<dyn EditorView>) {
        self.view = Some(view);
    }

    /// Drop the host view. An active hover is closed with `on_leave`, since
    /// its span goes away with the view.
    pub fn detach(&mut self) {
        self.view = None;
        self.end_hover();
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Replace the keyword set and ask the host to redraw.
    ///
    /// The keywords are stored even when no view is attached; the next pass
    /// picks them up. Returns whether a refresh was dispatched.
    ///
    /// A hover over a keyword that survives the change stays open, so its
    /// later pointer-out still fires `on_leave`. A hover over a dropped
    /// keyword is closed here.
    pub fn set_keywords(&mut self, keywords: Vec<String>) -> bool {
        self.index = KeywordIndex::new(&keywords);
        self.keywords = keywords;

        let dropped = self
            .hovered
            .as_ref()
            .is_some_and(|tag| !self.keywords.iter().any(|k| k == &tag.keyword));
        if dropped {
            self.end_hover();
        }

        match &self.view {
            Some(view) => {
                view.request_refresh();
                true
            }
            None => {
                console_log!(
                    "[KeywordOverlay] No view attached; {} keyword(s) stored for next pass",
                    self.keywords.len()
                );
                false
            }
        }
    }

    /// Same as `set_keywords(vec![])`
    pub fn clear_keywords(&mut self) -> bool {
        self.set_keywords(Vec::new())
    }

    // -------------------------------------------------------------------------
    // Decoration pass
    // -------------------------------------------------------------------------

    /// Decorations for a document snapshot.
    ///
    /// Each text run is matched on its own, so a keyword never spans two text
    /// nodes. Never fails; never touches overlay state.
    pub fn compute_decorations(&self, doc: &DocumentTextView) -> DecorationSet {
        if self.index.is_empty() {
            return DecorationSet::empty();
        }

        let config = &self.options.config;
        let encoding = config.position_encoding;
        let style = config.style();
        let mut decorations = Vec::new();

        for run in doc.runs() {
            for span in self.index.find(&run.text) {
                let from = run.pos + encoding.offset(&run.text, span.start);
                let to = run.pos + encoding.offset(&run.text, span.end);
                decorations.push(Decoration::inline(
                    from,
                    to,
                    &span.keyword,
                    &config.class_name,
                    &style,
                ));
            }
        }

        DecorationSet::new(decorations)
    }

    // -------------------------------------------------------------------------
    // Pointer routing
    // -------------------------------------------------------------------------

    /// Span currently under the pointer, if any
    pub fn hovered(&self) -> Option<&SpanTag> {
        self.hovered.as_ref()
    }

    /// Delegated pointer-over handler.
    ///
    /// `target` is the decorated span the event landed in (if any). Fires
    /// `on_hover` once per entry into a span. Returns true when the event was
    /// consumed by a callback.
    pub fn handle_pointer_over(&mut self, target: Option<&SpanTag>, event: &E) -> bool {
        let Some(tag) = target else {
            return false;
        };

        if self.hovered.as_ref() == Some(tag) {
            return false;
        }
        self.hovered = Some(tag.clone());

        match &self.options.on_hover {
            Some(on_hover) => {
                on_hover(&tag.keyword, event);
                true
            }
            None => false,
        }
    }

    /// Delegated pointer-out handler.
    ///
    /// `target` is the decorated span being left, `related` the decorated span
    /// being entered (if any). Moving within the same span is not a leave.
    /// Fires `on_leave` once per exit. Returns true when consumed.
    pub fn handle_pointer_out(&mut self, target: Option<&SpanTag>, related: Option<&SpanTag>) -> bool {
        let Some(tag) = target else {
            return false;
        };

        if related == Some(tag) {
            return false;
        }
        if self.hovered.as_ref() != Some(tag) {
            return false;
        }
        self.end_hover()
    }

    /// Forget the hovered span, firing `on_leave` if there was one
    fn end_hover(&mut self) -> bool {
        if self.hovered.take().is_none() {
            return false;
        }
        match &self.options.on_leave {
            Some(on_leave) => {
                on_leave();
                true
            }
            None => false,
        }
    }
}

impl<E> std::fmt::Debug for KeywordOverlay<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordOverlay")
            .field("keywords", &self.keywords)
            .field("options", &self.options)
            .field("attached", &self.view.is_some())
            .field("hovered", &self.hovered)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{PositionEncoding, TextRun};

    fn doc(runs: &[(usize, &str)]) -> DocumentTextView {
        DocumentTextView::new(runs.iter().map(|&(pos, text)| TextRun::new(pos, text)).collect())
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_new_overlay_is_empty() {
        let overlay: KeywordOverlay<()> = KeywordOverlay::default();

        assert!(overlay.keywords().is_empty());
        assert!(!overlay.is_attached());
        assert!(overlay.hovered().is_none());
    }

    #[test]
    fn test_positions_offset_by_run() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();
        overlay.set_keywords(keywords(&["fox"]));

        let set = overlay.compute_decorations(&doc(&[(1, "a fox"), (10, "fox")]));
        let ranges: Vec<(usize, usize)> = set.iter().map(|d| (d.from, d.to)).collect();

        assert_eq!(ranges, vec![(3, 6), (10, 13)]);
    }

    #[test]
    fn test_keyword_split_across_runs_not_matched() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();
        overlay.set_keywords(keywords(&["quick"]));

        // "qu" plain + "ick" bold
        let set = overlay.compute_decorations(&doc(&[(1, "The qu"), (7, "ick fox")]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_utf16_positions() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();
        overlay.set_keywords(keywords(&["fox"]));

        let set = overlay.compute_decorations(&doc(&[(1, "😀 fox")]));
        let d = set.iter().next().unwrap();

        assert_eq!((d.from, d.to), (4, 7));
    }

    #[test]
    fn test_utf8_positions() {
        let config = OverlayConfig {
            position_encoding: PositionEncoding::Utf8,
            ..OverlayConfig::default()
        };
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::new(OverlayOptions::new(config));
        overlay.set_keywords(keywords(&["fox"]));

        let set = overlay.compute_decorations(&doc(&[(0, "😀 fox")]));
        let d = set.iter().next().unwrap();

        assert_eq!((d.from, d.to), (5, 8));
    }

    #[test]
    fn test_decoration_carries_style_and_keyword() {
        let config = OverlayConfig {
            color: "#bfdbfe".into(),
            ..OverlayConfig::default()
        };
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::new(OverlayOptions::new(config));
        overlay.set_keywords(keywords(&["Fox"]));

        let set = overlay.compute_decorations(&doc(&[(0, "the fox")]));
        let d = set.iter().next().unwrap();

        assert_eq!(d.attrs.data_keyword, "Fox");
        assert_eq!(d.attrs.style, "background-color: #bfdbfe; cursor: pointer;");
        assert_eq!(d.attrs.class, "keyword-highlight");
    }

    #[test]
    fn test_only_empty_keywords_is_fast_path() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();
        overlay.set_keywords(keywords(&["", ""]));

        assert_eq!(overlay.keywords().len(), 2);
        assert!(overlay.compute_decorations(&doc(&[(0, "anything")])).is_empty());
    }

    #[test]
    fn test_set_keywords_dropping_hovered_keyword_clears_hover() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();
        let tag = SpanTag { keyword: "fox".into(), from: 0, to: 3 };

        overlay.handle_pointer_over(Some(&tag), &());
        assert!(overlay.hovered().is_some());

        overlay.set_keywords(keywords(&["dog"]));
        assert!(overlay.hovered().is_none());
    }

    #[test]
    fn test_set_keywords_keeping_hovered_keyword_keeps_hover() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();
        let tag = SpanTag { keyword: "fox".into(), from: 0, to: 3 };

        overlay.handle_pointer_over(Some(&tag), &());
        overlay.set_keywords(keywords(&["fox", "dog"]));

        assert_eq!(overlay.hovered(), Some(&tag));
    }

    #[test]
    fn test_pointer_over_undecorated_ignored() {
        let mut overlay: KeywordOverlay<()> = KeywordOverlay::default();

        assert!(!overlay.handle_pointer_over(None, &()));
        assert!(!overlay.handle_pointer_out(None, None));
    }
}
