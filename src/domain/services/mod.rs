//! Domain services - Pure operations over the adventure documents

pub mod demo_adventure;
pub mod outline_lint;

pub use demo_adventure::{demo_outline_response, demo_scene_guide};
pub use outline_lint::{lint_adventure, lint_outline, lint_scene_guide, LintWarning};
