//! Adventure export
//!
//! Two formats are available:
//! - JSON: indented documents, the download payloads
//! - Markdown: a readable handout with the same sections the UI shows

mod json;
mod markdown;

pub use json::to_pretty_json;
pub use markdown::{render_markdown, render_scene_guide_markdown};
