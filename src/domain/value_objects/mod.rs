//! Value objects - Immutable objects defined by their attributes

mod adventure_settings;
mod validation;

pub use adventure_settings::{
    EncounterDifficulty, EncounterType, LevelingMode, Ruleset, Theme, Tone,
};
pub use validation::{require_min_length, require_range, ValidationError};
