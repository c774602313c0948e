//! Configuration types and defaults for the keyword overlay

use serde::{Deserialize, Serialize};

use crate::highlight::PositionEncoding;

/// Light yellow fill
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fef08a";

/// Class put on every decorated span; also how pointer events find them
pub const DEFAULT_CLASS_NAME: &str = "keyword-highlight";

// =============================================================================
// OverlayConfig
// =============================================================================

/// Visual + positional configuration of the overlay.
///
/// Deserializes from the JS options object; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// CSS color for the highlight background. Default: `#fef08a`
    pub color: String,
    /// Class name for decorated spans. Default: `keyword-highlight`
    pub class_name: String,
    /// Units of host document positions. Default: UTF-16
    pub position_encoding: PositionEncoding,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            position_encoding: PositionEncoding::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse from a JSON options string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: OverlayConfig = serde_json::from_str(json)
            .map_err(|e| format!("Invalid overlay config: {}", e))?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Reject class names that cannot be used as a single CSS class selector
    pub fn validate(&self) -> Result<(), String> {
        if is_css_identifier(&self.class_name) {
            Ok(())
        } else {
            Err(format!(
                "Invalid overlay config: className {:?} is not a CSS identifier",
                self.class_name
            ))
        }
    }

    /// Replace blank fields with their defaults
    pub fn normalized(mut self) -> Self {
        if self.color.trim().is_empty() {
            self.color = DEFAULT_HIGHLIGHT_COLOR.to_string();
        }
        if self.class_name.trim().is_empty() {
            self.class_name = DEFAULT_CLASS_NAME.to_string();
        }
        self
    }

    /// Inline style for decorated spans
    pub fn style(&self) -> String {
        format!("background-color: {}; cursor: pointer;", self.color)
    }

    /// CSS selector matching decorated spans
    pub fn selector(&self) -> String {
        format!(".{}", self.class_name)
    }
}

/// `ident` per CSS syntax, without escapes: letters, digits, `-`, `_` or
/// non-ASCII, not starting with a digit or with `-` followed by a digit.
fn is_css_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let name_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii();

    if !name_char(first) || first.is_ascii_digit() {
        return false;
    }
    if first == '-' {
        match name.chars().nth(1) {
            None => return false,
            Some(c) if c.is_ascii_digit() => return false,
            Some(_) => {}
        }
    }
    chars.all(name_char)
}

// =============================================================================
// OverlayOptions
// =============================================================================

/// Hover callback: keyword under the pointer + the raw pointer event
pub type HoverCallback<E> = Box<dyn Fn(&str, &E)>;

/// Leave callback
pub type LeaveCallback = Box<dyn Fn()>;

/// Construction-time options of a [`KeywordOverlay`](crate::highlight::KeywordOverlay).
///
/// Callbacks are fixed once the overlay is built.
pub struct OverlayOptions<E> {
    pub config: OverlayConfig,
    pub on_hover: Option<HoverCallback<E>>,
    pub on_leave: Option<LeaveCallback>,
}

impl<E> Default for OverlayOptions<E> {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl<E> OverlayOptions<E> {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config: config.normalized(),
            on_hover: None,
            on_leave: None,
        }
    }

    pub fn with_on_hover(mut self, callback: impl Fn(&str, &E) + 'static) -> Self {
        self.on_hover = Some(Box::new(callback));
        self
    }

    pub fn with_on_leave(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_leave = Some(Box::new(callback));
        self
    }
}

impl<E> std::fmt::Debug for OverlayOptions<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayOptions")
            .field("config", &self.config)
            .field("on_hover", &self.on_hover.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();

        assert_eq!(config.color, "#fef08a");
        assert_eq!(config.class_name, "keyword-highlight");
        assert_eq!(config.position_encoding, PositionEncoding::Utf16);
        assert_eq!(config.style(), "background-color: #fef08a; cursor: pointer;");
        assert_eq!(config.selector(), ".keyword-highlight");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = OverlayConfig::from_json(r##"{"color": "#bfdbfe"}"##).unwrap();

        assert_eq!(config.color, "#bfdbfe");
        assert_eq!(config.class_name, DEFAULT_CLASS_NAME);
    }

    #[test]
    fn test_camel_case_fields() {
        let config =
            OverlayConfig::from_json(r#"{"className": "kw", "positionEncoding": "char"}"#).unwrap();

        assert_eq!(config.class_name, "kw");
        assert_eq!(config.position_encoding, PositionEncoding::Char);
    }

    #[test]
    fn test_blank_color_falls_back() {
        let config = OverlayConfig::from_json(r#"{"color": "  "}"#).unwrap();
        assert_eq!(config.color, DEFAULT_HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = OverlayConfig::from_json("{color}").unwrap_err();
        assert!(err.starts_with("Invalid overlay config"));
    }

    #[test]
    fn test_class_name_must_be_css_identifier() {
        for bad in ["key word", "1kw", "-2kw", "-", "kw.hit", "kw>span"] {
            let json = format!(r#"{{"className": "{}"}}"#, bad);
            let err = OverlayConfig::from_json(&json).unwrap_err();
            assert!(err.contains("not a CSS identifier"), "{}: {}", bad, err);
        }

        for good in ["kw", "keyword-highlight", "_kw", "-kw", "--kw", "kw2", "mot-clé"] {
            let json = format!(r#"{{"className": "{}"}}"#, good);
            assert!(OverlayConfig::from_json(&json).is_ok(), "{}", good);
        }
    }

    #[test]
    fn test_options_builder() {
        let options: OverlayOptions<()> = OverlayOptions::default()
            .with_on_hover(|_, _| {})
            .with_on_leave(|| {});

        assert!(options.on_hover.is_some());
        assert!(options.on_leave.is_some());
        assert_eq!(options.config, OverlayConfig::default());
    }
}
