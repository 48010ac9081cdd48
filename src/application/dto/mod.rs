//! Data Transfer Objects - For API boundaries
//!
//! Request and response bodies for the HTTP surface. The document model
//! itself is serialized directly; these types only wrap it.

pub mod adventure;

pub use adventure::*;
