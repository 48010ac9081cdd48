//! Domain entities - The adventure document model
//!
//! Every entity derives `JsonSchema` so its shape can be handed to the
//! text-generation endpoint as an output contract.

mod adventure_outline;
mod detailed_outline;
mod outline_request;
mod scene_guide;

pub use adventure_outline::{AdventureOutline, Faction, KeyNpc, StoryBeat};
pub use detailed_outline::{
    DetailedAdventureOutline, Encounter, LevelProgressionStep, OutlineResponse, Scene,
    MAX_SCENE_MINUTES, MIN_SCENE_MINUTES,
};
pub use outline_request::OutlineRequest;
pub use scene_guide::{
    BranchingChoice, EncounterTrigger, ExpandedSceneGuide, LocationStep, MAX_LOCATION_STEPS,
    MIN_LOCATION_STEPS,
};
