//! Text-generation port
//!
//! A provider-neutral view of one schema-constrained generation call: a
//! system instruction, ordered user turns and a named JSON Schema the output
//! must conform to. The response keeps the provider's output items as-is so
//! the application decides which text block carries the payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors surfaced by a generation backend
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    /// The request never produced an HTTP response
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    /// The provider answered with a non-success status
    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The provider answered but the body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Named JSON Schema the output must match
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: String,
    pub schema: serde_json::Value,
    /// Reject any output that does not match exactly
    pub strict: bool,
}

/// A single schema-constrained generation request
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub system_prompt: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub output_schema: OutputSchema,
    pub temperature: Option<f32>,
}

impl StructuredRequest {
    pub fn new(messages: Vec<ChatMessage>, output_schema: OutputSchema) -> Self {
        Self {
            system_prompt: None,
            messages,
            output_schema,
            temperature: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A typed content block inside an output item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// e.g. `output_text`, `refusal`
    pub block_type: String,
    pub text: Option<String>,
}

/// One item of provider output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    /// e.g. `message`, `reasoning`
    pub item_type: String,
    pub content: Vec<ContentBlock>,
}

impl OutputItem {
    #[cfg(test)]
    pub fn message_text(text: impl Into<String>) -> Self {
        Self {
            item_type: "message".to_string(),
            content: vec![ContentBlock {
                block_type: "output_text".to_string(),
                text: Some(text.into()),
            }],
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub output: Vec<OutputItem>,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// First `output_text` block of the first `message` item
    pub fn first_output_text(&self) -> Option<&str> {
        self.output
            .iter()
            .find(|item| item.item_type == "message")?
            .content
            .iter()
            .find(|block| block.block_type == "output_text")?
            .text
            .as_deref()
    }
}

/// Port for schema-constrained text generation
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate_structured(&self, request: StructuredRequest)
        -> Result<LlmResponse, LlmError>;
}

#[async_trait]
impl<T: LlmPort + ?Sized> LlmPort for Arc<T> {
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<LlmResponse, LlmError> {
        (**self).generate_structured(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(output: Vec<OutputItem>) -> LlmResponse {
        LlmResponse {
            output,
            model: "test".to_string(),
            usage: None,
        }
    }

    #[test]
    fn test_first_output_text_skips_non_message_items() {
        let reasoning = OutputItem {
            item_type: "reasoning".to_string(),
            content: vec![ContentBlock {
                block_type: "output_text".to_string(),
                text: Some("not this".to_string()),
            }],
        };
        let resp = response(vec![reasoning, OutputItem::message_text("{\"a\":1}")]);
        assert_eq!(resp.first_output_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_first_output_text_missing() {
        assert_eq!(response(vec![]).first_output_text(), None);

        let refusal = OutputItem {
            item_type: "message".to_string(),
            content: vec![ContentBlock {
                block_type: "refusal".to_string(),
                text: Some("I can't help with that".to_string()),
            }],
        };
        assert_eq!(response(vec![refusal]).first_output_text(), None);
    }
}
