use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, MouseEvent};

use crate::highlight::{
    DocumentTextView, EditorView, KeywordOverlay, OverlayConfig, OverlayOptions, SpanTag,
};

/// Host view backed by a JS function that dispatches an empty transaction
struct JsEditorView {
    dispatch: js_sys::Function,
}

impl EditorView for JsEditorView {
    fn request_refresh(&self) {
        if let Err(e) = self.dispatch.call0(&JsValue::NULL) {
            console_error!("[KeywordHighlight] Refresh dispatch failed: {:?}", e);
        }
    }
}

/// JS-facing keyword highlight controller
#[wasm_bindgen]
pub struct KeywordHighlight {
    inner: KeywordOverlay<MouseEvent>,
}

#[wasm_bindgen]
impl KeywordHighlight {
    /// `options`: `{ color?, className?, positionEncoding? }` or undefined
    #[wasm_bindgen(constructor)]
    pub fn new(
        options: JsValue,
        on_hover: Option<js_sys::Function>,
        on_leave: Option<js_sys::Function>,
    ) -> Result<KeywordHighlight, JsValue> {
        let config: OverlayConfig = if options.is_undefined() || options.is_null() {
            OverlayConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<OverlayConfig>(options)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
                .normalized()
        };
        config.validate().map_err(|e| JsValue::from_str(&e))?;

        let mut opts = OverlayOptions::new(config);
        if let Some(callback) = on_hover {
            opts = opts.with_on_hover(move |keyword: &str, event: &MouseEvent| {
                if let Err(e) = callback.call2(&JsValue::NULL, &JsValue::from_str(keyword), event) {
                    console_error!("[KeywordHighlight] onHover threw: {:?}", e);
                }
            });
        }
        if let Some(callback) = on_leave {
            opts = opts.with_on_leave(move || {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    console_error!("[KeywordHighlight] onLeave threw: {:?}", e);
                }
            });
        }

        Ok(KeywordHighlight {
            inner: KeywordOverlay::new(opts),
        })
    }

    /// Attach to a view. `dispatch` should run `view.dispatch(view.state.tr)`.
    #[wasm_bindgen]
    pub fn attach(&mut self, dispatch: js_sys::Function) {
        self.inner.attach(Box::new(JsEditorView { dispatch }));
    }

    #[wasm_bindgen]
    pub fn detach(&mut self) {
        self.inner.detach();
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    /// Replace the keyword set (string[]). Returns whether a redraw was dispatched.
    #[wasm_bindgen(js_name = setKeywords)]
    pub fn set_keywords(&mut self, keywords: JsValue) -> Result<bool, JsValue> {
        let keywords: Vec<String> = serde_wasm_bindgen::from_value(keywords)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse keywords: {}", e)))?;
        Ok(self.inner.set_keywords(keywords))
    }

    #[wasm_bindgen(js_name = clearKeywords)]
    pub fn clear_keywords(&mut self) -> bool {
        self.inner.clear_keywords()
    }

    #[wasm_bindgen]
    pub fn keywords(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.keywords()).unwrap_or(JsValue::NULL)
    }

    /// Decoration pass over `{ pos, text }[]` text runs.
    ///
    /// Returns `{ from, to, keyword, attrs }[]` ready for `Decoration.inline`.
    #[wasm_bindgen]
    pub fn decorations(&self, runs: JsValue) -> Result<JsValue, JsValue> {
        let doc = parse_runs(runs)?;
        let set = self.inner.compute_decorations(&doc);
        serde_wasm_bindgen::to_value(&set)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Flattened document text (insight context) from `{ pos, text }[]` runs
    #[wasm_bindgen(js_name = plainText)]
    pub fn plain_text(&self, runs: JsValue) -> Result<String, JsValue> {
        let doc = parse_runs(runs)?;
        Ok(doc.plain_text(self.inner.config().position_encoding))
    }

    /// Keyword of the span under the pointer
    #[wasm_bindgen(js_name = hoveredKeyword)]
    pub fn hovered_keyword(&self) -> Option<String> {
        self.inner.hovered().map(|tag| tag.keyword.clone())
    }

    /// Delegated `mouseover` handler for the editor root
    #[wasm_bindgen(js_name = handleMouseOver)]
    pub fn handle_mouse_over(&mut self, event: MouseEvent) -> bool {
        let target = self.span_tag(event.target());
        let consumed = self.inner.handle_pointer_over(target.as_ref(), &event);
        if consumed {
            event.prevent_default();
            event.stop_propagation();
        }
        consumed
    }

    /// Delegated `mouseout` handler for the editor root
    #[wasm_bindgen(js_name = handleMouseOut)]
    pub fn handle_mouse_out(&mut self, event: MouseEvent) -> bool {
        let target = self.span_tag(event.target());
        let related = self.span_tag(event.related_target());
        let consumed = self.inner.handle_pointer_out(target.as_ref(), related.as_ref());
        if consumed {
            event.prevent_default();
            event.stop_propagation();
        }
        consumed
    }
}

impl KeywordHighlight {
    pub fn overlay(&self) -> &KeywordOverlay<MouseEvent> {
        &self.inner
    }

    /// Tag of the decorated span containing `target`, if any
    fn span_tag(&self, target: Option<EventTarget>) -> Option<SpanTag> {
        let element = target?.dyn_into::<Element>().ok()?;
        let span = match element.closest(&self.inner.config().selector()) {
            Ok(span) => span?,
            Err(e) => {
                console_error!("[KeywordHighlight] Span lookup failed: {:?}", e);
                return None;
            }
        };
        SpanTag::from_attributes(|name| span.get_attribute(name))
    }
}

fn parse_runs(runs: JsValue) -> Result<DocumentTextView, JsValue> {
    serde_wasm_bindgen::from_value(runs)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse text runs: {}", e)))
}
