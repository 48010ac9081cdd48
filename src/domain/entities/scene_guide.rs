//! ExpandedSceneGuide - optional per-scene walkthrough (stage 3)
//!
//! A guide breaks one scene into an ordered series of location steps with
//! id `S<n>-L<m>`. Guides are generated independently per scene and never
//! modify the outline pair they were derived from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MIN_LOCATION_STEPS: usize = 5;
pub const MAX_LOCATION_STEPS: usize = 10;

/// A decision point offered to the players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchingChoice {
    pub option: String,
    pub consequence: String,
}

/// One stop in the scene walkthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationStep {
    /// `S<n>-L<m>`
    pub step_id: String,
    pub name: String,
    pub read_aloud: String,
    /// DM-only context
    pub dm_background: String,
    pub sensory_details: Vec<String>,
    pub interactive_elements: Vec<String>,
    pub hidden_information: Vec<String>,
    /// DC-based under 5e, Easy/Moderate/Hard otherwise
    pub checks: Vec<String>,
    pub choices: Vec<BranchingChoice>,
    pub fail_forward: String,
    #[serde(default)]
    pub time_pressure: Option<String>,
}

/// Where in the walkthrough an encounter fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EncounterTrigger {
    pub encounter_id: String,
    pub step_id: String,
    pub trigger: String,
}

/// Step-by-step breakdown of a single scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExpandedSceneGuide {
    pub scene_id: String,
    pub scene_title: String,
    pub overview: String,
    pub location_steps: Vec<LocationStep>,
    pub encounter_triggers: Vec<EncounterTrigger>,
    pub exit_transitions: Vec<String>,
}

impl ExpandedSceneGuide {
    pub fn find_step(&self, step_id: &str) -> Option<&LocationStep> {
        self.location_steps.iter().find(|s| s.step_id == step_id)
    }
}
