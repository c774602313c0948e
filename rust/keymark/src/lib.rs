//! Keymark: Keyword Highlight Overlay + Insight Plumbing
//!
//! A Rust/WASM implementation of the keyword layer behind the AI-assisted editor.
//!
//! # Architecture
//!
//! ## Highlight Components
//! - `matcher.rs` - KeywordIndex: case-insensitive, per-keyword occurrence scan
//! - `document.rs` - DocumentTextView: read-only text runs of the host document
//! - `decoration.rs` - Decoration / DecorationSet: non-content annotations
//! - `config.rs` - OverlayConfig: highlight color, class name, position units
//! - `overlay.rs` - KeywordOverlay: keyword state, decoration pass, hover routing
//! - `channel.rs` - HostChannel: typed publish/subscribe between editor components
//! - `wasm.rs` - KeywordHighlight: the JS-facing controller
//!
//! ## Insight Components
//! - `types.rs` - Typed payloads returned by the language model
//! - `response.rs` - ParsedResponse: `Success | Malformed` validation
//! - `prompt.rs` - System prompt templates
//! - `client.rs` - CompletionClient: injected chat-completion transport
//! - `service.rs` - InsightService: input validation + request orchestration
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { KeywordHighlight } from 'keymark';
//!
//! await init();
//!
//! const highlight = new KeywordHighlight(
//!   { color: '#fef08a' },
//!   (keyword, event) => showTooltip(keyword, event.clientX, event.clientY),
//!   () => hideTooltip(),
//! );
//! highlight.attach(() => view.dispatch(view.state.tr));
//!
//! // ProseMirror plugin props
//! decorations: (state) => {
//!   const runs = [];
//!   state.doc.descendants((node, pos) => {
//!     if (node.isText) runs.push({ pos, text: node.text });
//!   });
//!   return DecorationSet.create(state.doc, highlight.decorations(runs)
//!     .map((d) => Decoration.inline(d.from, d.to, d.attrs)));
//! },
//! handleDOMEvents: {
//!   mouseover: (_view, event) => { highlight.handleMouseOver(event); return false; },
//!   mouseout: (_view, event) => { highlight.handleMouseOut(event); return false; },
//! },
//!
//! highlight.setKeywords(['quick', 'fox']);
//! ```

/// Log to the browser console. Compiles to nothing off wasm32.
macro_rules! console_log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        {
            if false {
                let _ = format!($($t)*);
            }
        }
    }};
}

/// Log an error to the browser console. Compiles to nothing off wasm32.
macro_rules! console_error {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        {
            if false {
                let _ = format!($($t)*);
            }
        }
    }};
}

pub mod highlight;
pub mod insight;

// Public exports - Highlight
pub use highlight::*;

// Public exports - Insight
pub use insight::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("keymark v{}", env!("CARGO_PKG_VERSION"))
}
