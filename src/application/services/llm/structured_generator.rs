//! Schema-constrained generation client
//!
//! Wraps a single call to the text-generation port: fixed system prompt,
//! stage instructions and serialized payload as user turns, strict output
//! schema. The first `output_text` block of the first message item is parsed
//! as JSON. Nothing is retried here; failures are classified and returned.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::prompt_builder::SYSTEM_PROMPT;
use super::strict_schema::{schema_for, to_strict_schema};
use crate::application::ports::outbound::{ChatMessage, LlmPort, OutputSchema, StructuredRequest};
use crate::application::services::adventure_error::{ErrorKind, GenerationFailure};

pub struct StructuredGenerator<L: LlmPort> {
    llm: L,
    temperature: Option<f32>,
}

impl<L: LlmPort> StructuredGenerator<L> {
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[cfg(test)]
    pub(crate) fn llm(&self) -> &L {
        &self.llm
    }

    /// Request JSON matching `json_schema` and return it parsed.
    ///
    /// The schema is adapted to strict form before it is sent.
    pub async fn generate(
        &self,
        schema_name: &str,
        json_schema: &Value,
        user_payload: &Value,
        extra_instructions: &str,
    ) -> Result<Value, GenerationFailure> {
        let messages = vec![
            ChatMessage::user(extra_instructions),
            ChatMessage::user(user_payload.to_string()),
        ];
        let output_schema = OutputSchema {
            name: schema_name.to_string(),
            schema: to_strict_schema(json_schema),
            strict: true,
        };

        let mut request =
            StructuredRequest::new(messages, output_schema).with_system_prompt(SYSTEM_PROMPT);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        tracing::debug!(schema = schema_name, "Sending structured generation request");
        let response = self.llm.generate_structured(request).await?;

        if let Some(usage) = response.usage {
            tracing::debug!(
                schema = schema_name,
                model = %response.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Structured generation finished"
            );
        }

        let text = response.first_output_text().ok_or_else(|| {
            GenerationFailure::new(
                ErrorKind::Generation,
                "No output_text found in model response",
            )
        })?;

        serde_json::from_str(text).map_err(|e| {
            GenerationFailure::new(
                ErrorKind::Generation,
                format!("Model output is not valid JSON: {}", e),
            )
        })
    }

    /// Request a document of type `T` and validate the parsed JSON against it
    pub async fn generate_typed<T>(
        &self,
        schema_name: &str,
        user_payload: &Value,
        extra_instructions: &str,
    ) -> Result<T, GenerationFailure>
    where
        T: JsonSchema + DeserializeOwned,
    {
        let value = self
            .generate(
                schema_name,
                &schema_for::<T>(),
                user_payload,
                extra_instructions,
            )
            .await?;

        serde_json::from_value(value).map_err(|e| {
            GenerationFailure::new(
                ErrorKind::SchemaValidation,
                format!("{} does not match the expected shape: {}", schema_name, e),
            )
        })
    }
}
