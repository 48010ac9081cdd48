//! LLM plumbing: prompt payloads, strict schemas and the generation client

pub mod prompt_builder;
pub mod strict_schema;
pub mod structured_generator;

pub use structured_generator::StructuredGenerator;
