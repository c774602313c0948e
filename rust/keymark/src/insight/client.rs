//! CompletionClient: the chat-completion transport, injected by the caller
//!
//! No transport ships with this crate. The application builds one (HTTP
//! client, JS fetch bridge, test double) and hands it to `InsightService`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Errors
// =============================================================================

/// Insight request errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// A required input was blank
    MissingField(&'static str),
    /// The transport failed
    Client(String),
    /// The model answered with something that is not the expected payload
    Malformed { raw: String, reason: String },
}

impl InsightError {
    /// HTTP status a route handler should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            InsightError::MissingField(_) => 400,
            InsightError::Client(_) | InsightError::Malformed { .. } => 500,
        }
    }
}

impl std::fmt::Display for InsightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightError::MissingField(field) => write!(f, "Missing required field: {}", field),
            InsightError::Client(msg) => write!(f, "Completion request failed: {}", msg),
            InsightError::Malformed { reason, .. } => {
                write!(f, "Malformed completion: {}", reason)
            }
        }
    }
}

impl std::error::Error for InsightError {}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// One chat-completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for a JSON object response
    pub json_response: bool,
}

// =============================================================================
// Client trait
// =============================================================================

/// Chat-completion transport.
///
/// Returns the text content of the first choice.
pub trait CompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError>;
}

impl<C: CompletionClient + ?Sized> CompletionClient for &C {
    fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        (**self).complete(request)
    }
}

impl<C: CompletionClient + ?Sized> CompletionClient for Box<C> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        (**self).complete(request)
    }
}
