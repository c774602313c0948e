//! ParsedResponse: Tagged Validation of Model Output
//!
//! Model output is text that is supposed to be JSON. It is parsed into the
//! expected payload and shape-checked before anything downstream sees it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::insight::Validate;

/// Outcome of parsing one completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ParsedResponse<T> {
    Success(T),
    Malformed { raw: String, reason: String },
}

impl<T> ParsedResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ParsedResponse::Success(_))
    }

    /// Payload, or `(raw, reason)` for malformed output
    pub fn into_result(self) -> Result<T, (String, String)> {
        match self {
            ParsedResponse::Success(value) => Ok(value),
            ParsedResponse::Malformed { raw, reason } => Err((raw, reason)),
        }
    }
}

/// Parse and validate a completion.
///
/// Accepts the JSON bare or wrapped in a Markdown code fence.
pub fn parse_completion<T>(raw: &str) -> ParsedResponse<T>
where
    T: DeserializeOwned + Validate,
{
    let malformed = |reason: String| ParsedResponse::Malformed {
        raw: raw.to_string(),
        reason,
    };

    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return malformed("empty completion".to_string());
    }

    let value: T = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return malformed(format!("invalid JSON: {}", e)),
    };

    match value.validate() {
        Ok(()) => ParsedResponse::Success(value),
        Err(reason) => malformed(reason),
    }
}

/// "```json\n{..}\n```" -> "{..}"
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") up to the first newline
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::{ArticleGeneration, KeywordExtraction, KeywordInsights};

    #[test]
    fn test_success() {
        let parsed: ParsedResponse<KeywordExtraction> =
            parse_completion(r#"{"keywords": ["entropy", "signal"]}"#);

        match parsed {
            ParsedResponse::Success(ex) => assert_eq!(ex.keywords, vec!["entropy", "signal"]),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_code_fence_stripped() {
        let raw = "```json\n{\"keywords\": [\"a\"]}\n```";
        let parsed: ParsedResponse<KeywordExtraction> = parse_completion(raw);

        assert!(parsed.is_success());
    }

    #[test]
    fn test_not_json_is_malformed() {
        let raw = "Sure! Here are your keywords: entropy, signal";
        let parsed: ParsedResponse<KeywordExtraction> = parse_completion(raw);

        let (kept, reason) = parsed.into_result().unwrap_err();
        assert_eq!(kept, raw);
        assert!(reason.starts_with("invalid JSON"));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        // Older revisions returned insights as a flat list
        let raw = r#"{"content": "x", "keywords": ["a"], "insights": ["q1", "q2"]}"#;
        let parsed: ParsedResponse<ArticleGeneration> = parse_completion(raw);

        assert!(!parsed.is_success());
    }

    #[test]
    fn test_validation_failure_is_malformed() {
        let parsed: ParsedResponse<KeywordInsights> = parse_completion(r#"{"insights": {}}"#);

        let (_, reason) = parsed.into_result().unwrap_err();
        assert_eq!(reason, "insights is empty");
    }

    #[test]
    fn test_empty_completion() {
        let parsed: ParsedResponse<KeywordExtraction> = parse_completion("   ");
        assert_eq!(
            parsed,
            ParsedResponse::Malformed {
                raw: "   ".into(),
                reason: "empty completion".into()
            }
        );
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{}"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}```"), "{\"a\":1}");
    }
}
