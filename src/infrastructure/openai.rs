//! OpenAI Responses API client with JSON Schema structured output

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::outbound::{
    ContentBlock, LlmError, LlmPort, LlmResponse, MessageRole, OutputItem, StructuredRequest,
    TokenUsage,
};

/// Default API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for structured generation.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";

/// Client for the `/responses` endpoint
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl LlmPort for OpenAiClient {
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<LlmResponse, LlmError> {
        let api_request = build_request(&self.model, &request);

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: ResponsesApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(convert_response(api_response))
    }
}

fn role_name(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

fn build_request(model: &str, request: &StructuredRequest) -> ResponsesApiRequest {
    let mut input = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = &request.system_prompt {
        input.push(InputMessage {
            role: "system".to_string(),
            content: system.clone(),
        });
    }

    for msg in &request.messages {
        input.push(InputMessage {
            role: role_name(msg.role).to_string(),
            content: msg.content.clone(),
        });
    }

    ResponsesApiRequest {
        model: model.to_string(),
        input,
        text: TextConfig {
            format: TextFormat {
                format_type: "json_schema".to_string(),
                name: request.output_schema.name.clone(),
                schema: request.output_schema.schema.clone(),
                strict: request.output_schema.strict,
            },
        },
        temperature: request.temperature,
    }
}

fn convert_response(response: ResponsesApiResponse) -> LlmResponse {
    let output = response
        .output
        .into_iter()
        .map(|item| OutputItem {
            item_type: item.item_type,
            content: item
                .content
                .into_iter()
                .map(|block| ContentBlock {
                    block_type: block.block_type,
                    text: block.text,
                })
                .collect(),
        })
        .collect();

    LlmResponse {
        output,
        model: response.model,
        usage: response.usage.map(|u| TokenUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
            total_tokens: u.total_tokens,
        }),
    }
}

// Responses API types

#[derive(Debug, Serialize)]
struct ResponsesApiRequest {
    model: String,
    input: Vec<InputMessage>,
    text: TextConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct TextConfig {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    format_type: String,
    name: String,
    schema: serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    output: Vec<ApiOutputItem>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiOutputItem {
    #[serde(rename = "type")]
    item_type: String,
    /// Absent on non-message items such as reasoning
    #[serde(default)]
    content: Vec<ApiContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    input_tokens: u32,
    output_tokens: u32,
    total_tokens: u32,
}
