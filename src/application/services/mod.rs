//! Application services - Use case implementations
//!
//! The adventure pipeline: schema-constrained generation stages, the error
//! taxonomy they report through, and the demo fallback policy applied at
//! the boundary.

pub mod adventure_error;
pub mod adventure_service;
pub mod fallback_policy;
pub mod llm;

pub use adventure_error::{AdventureError, ErrorKind};
pub use adventure_service::AdventureService;
pub use fallback_policy::{
    expand_scene_with_fallback, generate_outline_with_fallback, FallbackPolicy,
};
