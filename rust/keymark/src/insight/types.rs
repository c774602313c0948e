//! Typed payloads returned by the language model
//!
//! Insights are always a `keyword -> follow-up questions` map, for the article
//! generator and the per-keyword endpoint alike.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keyword to follow-up questions
pub type InsightMap = BTreeMap<String, Vec<String>>;

/// Explicit shape checks run after JSON parsing
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

// =============================================================================
// Payloads
// =============================================================================

/// Generated short article with its key contents and questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleGeneration {
    /// Markdown body
    pub content: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub insights: InsightMap,
}

/// Keywords extracted from user text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordExtraction {
    pub keywords: Vec<String>,
}

/// Follow-up questions for one keyword in context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordInsights {
    pub insights: InsightMap,
}

impl KeywordInsights {
    /// Questions for `keyword`, matched case-insensitively
    pub fn questions_for(&self, keyword: &str) -> Option<&[String]> {
        self.insights
            .iter()
            .find(|(k, _)| k.to_lowercase() == keyword.to_lowercase())
            .map(|(_, q)| q.as_slice())
    }
}

/// Answer to a follow-up question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub answer: String,
}

// =============================================================================
// Validation
// =============================================================================

fn validate_keywords(keywords: &[String]) -> Result<(), String> {
    if keywords.is_empty() {
        return Err("keywords is empty".to_string());
    }
    if let Some(i) = keywords.iter().position(|k| k.trim().is_empty()) {
        return Err(format!("keywords[{}] is blank", i));
    }
    Ok(())
}

fn validate_insights(insights: &InsightMap) -> Result<(), String> {
    for (keyword, questions) in insights {
        if keyword.trim().is_empty() {
            return Err("insights has a blank keyword".to_string());
        }
        if questions.is_empty() {
            return Err(format!("insights[{:?}] has no questions", keyword));
        }
        if questions.iter().any(|q| q.trim().is_empty()) {
            return Err(format!("insights[{:?}] has a blank question", keyword));
        }
    }
    Ok(())
}

impl Validate for ArticleGeneration {
    fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("content is empty".to_string());
        }
        validate_keywords(&self.keywords)?;
        validate_insights(&self.insights)
    }
}

impl Validate for KeywordExtraction {
    fn validate(&self) -> Result<(), String> {
        validate_keywords(&self.keywords)
    }
}

impl Validate for KeywordInsights {
    fn validate(&self) -> Result<(), String> {
        if self.insights.is_empty() {
            return Err("insights is empty".to_string());
        }
        validate_insights(&self.insights)
    }
}

impl Validate for QuestionAnswer {
    fn validate(&self) -> Result<(), String> {
        if self.answer.trim().is_empty() {
            return Err("answer is empty".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
