//! DetailedAdventureOutline - the scene-by-scene expansion (stage 2)

use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::AdventureOutline;
use crate::domain::value_objects::{require_range, EncounterDifficulty, EncounterType};

pub const DEFAULT_SCENE_MINUTES: u16 = 45;
pub const MIN_SCENE_MINUTES: u16 = 5;
pub const MAX_SCENE_MINUTES: u16 = 240;

/// A discrete challenge inside a scene
///
/// Failure must never dead-end the adventure, so every encounter carries
/// both a `win_condition` and a `fail_forward`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Encounter {
    /// `E1`, `E2`, ...
    pub encounter_id: String,
    #[serde(rename = "type")]
    pub encounter_type: EncounterType,
    pub difficulty: EncounterDifficulty,
    pub summary: String,
    pub win_condition: String,
    pub fail_forward: String,
    #[serde(default)]
    pub setup: Vec<String>,
    #[serde(default)]
    pub scaling_notes: Vec<String>,
}

/// A single location/goal unit of play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// `S1`, `S2`, ...
    pub scene_id: String,
    pub title: String,
    pub location: String,
    pub goal: String,
    /// Read-aloud text
    pub boxed_text: String,
    pub obstacles: Vec<String>,
    pub encounters: Vec<Encounter>,
    pub clues_and_info: Vec<String>,
    pub rewards: Vec<String>,
    pub consequences: Vec<String>,
    /// Beat ids this scene advances. Not enforced against the outline.
    #[serde(default)]
    pub links_to_beats: Vec<String>,
    /// Between 5 and 240; anything else is rejected when deserializing
    #[serde(
        default = "default_scene_minutes",
        deserialize_with = "deserialize_scene_minutes"
    )]
    #[schemars(range(min = 5, max = 240))]
    pub estimated_minutes: u16,
}

fn default_scene_minutes() -> u16 {
    DEFAULT_SCENE_MINUTES
}

fn deserialize_scene_minutes<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = u16::deserialize(deserializer)?;
    require_range(
        u32::from(minutes),
        u32::from(MIN_SCENE_MINUTES),
        u32::from(MAX_SCENE_MINUTES),
        "estimated_minutes",
    )
    .map_err(de::Error::custom)?;
    Ok(minutes)
}

impl Scene {
    pub fn find_encounter(&self, encounter_id: &str) -> Option<&Encounter> {
        self.encounters
            .iter()
            .find(|e| e.encounter_id == encounter_id)
    }
}

/// A level-up point in the adventure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LevelProgressionStep {
    /// `L1`, `L2`, ...
    pub step_id: String,
    /// Scene id after which this step applies. Not enforced against scenes.
    pub after_scene_id: String,
    pub level: u8,
    pub rationale: String,
    #[serde(default)]
    pub optional_side_objectives: Vec<String>,
}

/// Detailed outline produced by the second generation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailedAdventureOutline {
    pub outline_title: String,
    pub structure_notes: Vec<String>,
    pub scenes: Vec<Scene>,
    pub level_progression: Vec<LevelProgressionStep>,
    #[serde(default)]
    pub optional_side_quests: Vec<String>,
    #[serde(default)]
    pub recap_questions: Vec<String>,
}

impl DetailedAdventureOutline {
    pub fn find_scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.scene_id == scene_id)
    }

    pub fn encounters(&self) -> impl Iterator<Item = &Encounter> {
        self.scenes.iter().flat_map(|s| s.encounters.iter())
    }

    pub fn total_minutes(&self) -> u32 {
        self.scenes.iter().map(|s| u32::from(s.estimated_minutes)).sum()
    }

    /// Fill a blank title from the stage-1 outline.
    ///
    /// Returns true when the title was replaced.
    pub fn backfill_title(&mut self, outline: &AdventureOutline) -> bool {
        if self.outline_title.trim().is_empty() {
            self.outline_title = outline.title.clone();
            return true;
        }
        false
    }
}

/// The stage-1 and stage-2 documents paired for display and download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutlineResponse {
    pub outline: AdventureOutline,
    pub detailed: DetailedAdventureOutline,
}

impl OutlineResponse {
    pub fn find_scene(&self, scene_id: &str) -> Option<&Scene> {
        self.detailed.find_scene(scene_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scene_json(minutes: Option<u32>) -> serde_json::Value {
        let mut scene = json!({
            "scene_id": "S1",
            "title": "The Drowned Stair",
            "location": "Lighthouse base",
            "goal": "Reach the lamp room",
            "boxed_text": "Salt crusts every step.",
            "obstacles": [],
            "encounters": [],
            "clues_and_info": [],
            "rewards": [],
            "consequences": []
        });
        if let Some(minutes) = minutes {
            scene["estimated_minutes"] = json!(minutes);
        }
        scene
    }

    #[test]
    fn test_scene_minutes_default() {
        let scene: Scene = serde_json::from_value(scene_json(None)).unwrap();
        assert_eq!(scene.estimated_minutes, DEFAULT_SCENE_MINUTES);
    }

    #[test]
    fn test_scene_minutes_bounds() {
        for minutes in [5, 45, 240] {
            let scene: Scene = serde_json::from_value(scene_json(Some(minutes))).unwrap();
            assert_eq!(u32::from(scene.estimated_minutes), minutes);
        }
        for minutes in [0, 4, 241, 1000] {
            let err = serde_json::from_value::<Scene>(scene_json(Some(minutes))).unwrap_err();
            assert!(err.to_string().contains("estimated_minutes"), "{}", err);
        }
    }

    #[test]
    fn test_scene_minutes_schema_range() {
        let schema = serde_json::to_value(schemars::schema_for!(Scene)).unwrap();
        let minutes = &schema["properties"]["estimated_minutes"];
        assert_eq!(minutes["minimum"], json!(5.0));
        assert_eq!(minutes["maximum"], json!(240.0));
    }
}
