//! InsightService: Input Validation + Request Orchestration
//!
//! One method per application route. Each validates its input, renders the
//! prompt, calls the injected client and parses the reply into a typed
//! payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::insight::prompt::{self, JSON_SUFFIX};
use crate::insight::{
    parse_completion, ArticleGeneration, ChatMessage, CompletionClient, CompletionRequest,
    InsightError, KeywordExtraction, KeywordInsights, ParsedResponse, QuestionAnswer, Validate,
};

// =============================================================================
// Configuration
// =============================================================================

/// Model parameters shared by every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsightConfig {
    /// Default: `mixtral-8x7b-32768`
    pub model: String,
    /// Word budget for generated prose. Default: 300
    pub max_words: u32,
    /// Default: 0.3
    pub temperature: f32,
    /// Default: 2000
    pub max_tokens: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            model: "mixtral-8x7b-32768".to_string(),
            max_words: 300,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }
}

impl InsightConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid insight config: {}", e))
    }
}

// =============================================================================
// InsightService
// =============================================================================

/// AI insight operations over an injected completion client
#[derive(Debug)]
pub struct InsightService<C> {
    client: C,
    config: InsightConfig,
}

impl<C: CompletionClient> InsightService<C> {
    pub fn new(client: C, config: InsightConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Short article with keywords and per-keyword questions
    pub fn generate_article(&self, prompt: &str) -> Result<ArticleGeneration, InsightError> {
        let prompt = required("prompt", prompt)?;
        self.ask(
            &prompt::render(prompt::ARTICLE_PROMPT, self.config.max_words),
            prompt,
        )
    }

    /// Keywords worth highlighting in `text`
    pub fn extract_keywords(&self, text: &str) -> Result<KeywordExtraction, InsightError> {
        let text = required("text", text)?;
        self.ask(prompt::KEYWORD_EXTRACTION_PROMPT, text)
    }

    /// Follow-up questions for `keyword` within `context`
    pub fn keyword_insights(
        &self,
        keyword: &str,
        context: &str,
    ) -> Result<KeywordInsights, InsightError> {
        let keyword = required("keyword", keyword)?;
        let context = required("context", context)?;
        self.ask(
            prompt::KEYWORD_INSIGHTS_PROMPT,
            &prompt::keyword_insights_message(keyword, context),
        )
    }

    /// Answer to a follow-up question
    pub fn answer_question(&self, question: &str) -> Result<QuestionAnswer, InsightError> {
        let question = required("question", question)?;
        self.ask(
            &prompt::render(prompt::QUESTION_ANSWER_PROMPT, self.config.max_words),
            question,
        )
    }

    fn ask<T>(&self, system: &str, user: &str) -> Result<T, InsightError>
    where
        T: DeserializeOwned + Validate,
    {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user(format!("{}{}", user, JSON_SUFFIX)),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            json_response: true,
        };

        let raw = self.client.complete(&request)?;
        match parse_completion(&raw) {
            ParsedResponse::Success(value) => Ok(value),
            ParsedResponse::Malformed { raw, reason } => {
                console_error!("[InsightService] Malformed completion: {}", reason);
                Err(InsightError::Malformed { raw, reason })
            }
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, InsightError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InsightError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::Role;
    use std::cell::RefCell;

    /// Replays canned replies and records every request
    struct ScriptedClient {
        replies: RefCell<Vec<Result<String, InsightError>>>,
        requests: RefCell<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        fn replying(reply: &str) -> Self {
            Self {
                replies: RefCell::new(vec![Ok(reply.to_string())]),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                replies: RefCell::new(vec![Err(InsightError::Client(message.to_string()))]),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionClient for ScriptedClient {
        fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
            self.requests.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(InsightError::Client("no scripted reply".into())))
        }
    }

    fn service(client: &ScriptedClient) -> InsightService<&ScriptedClient> {
        InsightService::new(client, InsightConfig::default())
    }

    #[test]
    fn test_generate_article() {
        let client = ScriptedClient::replying(
            r####"{"content": "### Why", "keywords": ["entropy"], "insights": {"entropy": ["Q1", "Q2", "Q3"]}}"####,
        );

        let article = service(&client).generate_article("Explain entropy").unwrap();
        assert_eq!(article.content, "### Why");
        assert_eq!(article.keywords, vec!["entropy"]);
        assert_eq!(article.insights["entropy"].len(), 3);

        let requests = client.requests.borrow();
        let request = &requests[0];
        assert_eq!(request.model, "mixtral-8x7b-32768");
        assert_eq!(request.max_tokens, 2000);
        assert!(request.json_response);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("no more than 300 words"));
        assert_eq!(
            request.messages[1].content,
            "Explain entropy\n\nPlease provide your response in JSON format."
        );
    }

    #[test]
    fn test_blank_inputs_rejected_before_calling() {
        let client = ScriptedClient::replying("{}");
        let svc = service(&client);

        assert_eq!(svc.extract_keywords("  ").unwrap_err(), InsightError::MissingField("text"));
        assert_eq!(svc.generate_article("").unwrap_err(), InsightError::MissingField("prompt"));
        assert_eq!(
            svc.keyword_insights("entropy", "").unwrap_err(),
            InsightError::MissingField("context")
        );
        assert_eq!(
            svc.keyword_insights("", "ctx").unwrap_err(),
            InsightError::MissingField("keyword")
        );
        assert_eq!(svc.answer_question("\n").unwrap_err().status_code(), 400);
        assert!(client.requests.borrow().is_empty());
    }

    #[test]
    fn test_keyword_insights_message_carries_context() {
        let client = ScriptedClient::replying(r#"{"insights": {"entropy": ["Q1"]}}"#);

        let insights = service(&client)
            .keyword_insights("entropy", "Entropy measures disorder.")
            .unwrap();
        assert_eq!(insights.questions_for("Entropy").map(|q| q.len()), Some(1));

        let requests = client.requests.borrow();
        assert!(requests[0].messages[1].content.contains("Entropy measures disorder."));
    }

    #[test]
    fn test_malformed_reply_surfaces_raw_text() {
        let client = ScriptedClient::replying("I cannot answer that.");

        match service(&client).extract_keywords("some text") {
            Err(InsightError::Malformed { raw, .. }) => assert_eq!(raw, "I cannot answer that."),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_client_error_passes_through() {
        let client = ScriptedClient::failing("rate limited");

        let err = service(&client).answer_question("Why?").unwrap_err();
        assert_eq!(err, InsightError::Client("rate limited".into()));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_config_from_json() {
        let config = InsightConfig::from_json(r#"{"model": "llama-3.3-70b-versatile", "maxWords": 150}"#).unwrap();

        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_words, 150);
        assert_eq!(config.max_tokens, 2000);
    }
}
