//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - OpenAI: Responses API client behind the generation port
//! - HTTP: REST API routes
//! - Export: JSON and Markdown renderings of generated documents
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod export;
pub mod http;
pub mod openai;
pub mod state;
