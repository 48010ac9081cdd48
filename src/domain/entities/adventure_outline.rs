//! AdventureOutline - the high-level narrative skeleton (stage 1)
//!
//! Sub-records have no identity of their own; beat ids (`B1`, `B2`, ...) are
//! the only identifiers referenced later, by scenes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named character the adventure revolves around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyNpc {
    pub name: String,
    pub role: String,
    pub public_face: String,
    pub secret: String,
    /// What the party can use to move this NPC
    pub leverage: String,
}

/// An organized group pursuing its own agenda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Faction {
    pub name: String,
    pub goal: String,
    pub method: String,
    pub complication: String,
}

/// A major story beat, referenced by scenes through `beat_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StoryBeat {
    /// `B1`, `B2`, ...
    pub beat_id: String,
    pub title: String,
    pub purpose: String,
    pub stakes: String,
    pub twist_or_reveal: String,
}

/// High-level outline produced by the first generation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdventureOutline {
    pub title: String,
    /// One-sentence pitch
    pub logline: String,
    pub central_conflict: String,
    pub villain_or_antagonist: String,
    pub themes: Vec<String>,
    pub hooks: Vec<String>,
    pub key_npcs: Vec<KeyNpc>,
    pub factions: Vec<Faction>,
    pub beats: Vec<StoryBeat>,
    /// Facts that must remain true in the detailed outline
    #[serde(default)]
    pub continuity_promises: Vec<String>,
}

impl AdventureOutline {
    pub fn beat_ids(&self) -> Vec<&str> {
        self.beats.iter().map(|b| b.beat_id.as_str()).collect()
    }
}
