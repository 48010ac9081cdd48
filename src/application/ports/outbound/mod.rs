//! Outbound ports - Interfaces that the application requires from external systems

mod llm_port;

pub use llm_port::{
    ChatMessage, ContentBlock, LlmError, LlmPort, LlmResponse, MessageRole, OutputItem,
    OutputSchema, StructuredRequest, TokenUsage,
};
