//! Domain layer - The adventure document model with no external I/O
//!
//! This layer contains:
//! - Entities: OutlineRequest, AdventureOutline, DetailedAdventureOutline,
//!   ExpandedSceneGuide and their sub-records
//! - Value Objects: closed setting enums and request validation
//! - Domain Services: demo content and best-effort lint checks

pub mod entities;
pub mod services;
pub mod value_objects;
