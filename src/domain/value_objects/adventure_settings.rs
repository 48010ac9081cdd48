//! Closed enumerations for adventure generation settings
//!
//! Each enum serializes to the lowercase wire value the generation contract
//! uses, so an unknown value is rejected at deserialization.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overall mood of the adventure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Grimdark,
    Heroic,
    Whimsical,
    Horror,
    Mystery,
    Epic,
}

impl Default for Tone {
    fn default() -> Self {
        Self::Mystery
    }
}

impl Tone {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Grimdark => "Grimdark",
            Self::Heroic => "Heroic",
            Self::Whimsical => "Whimsical",
            Self::Horror => "Horror",
            Self::Mystery => "Mystery",
            Self::Epic => "Epic",
        }
    }
}

/// Dominant subject matter of the adventure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Fey,
    Undead,
    Dragons,
    Political,
    Heist,
    Cosmic,
    Wilderness,
    Dungeon,
    Urban,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dungeon
    }
}

impl Theme {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fey => "Fey",
            Self::Undead => "Undead",
            Self::Dragons => "Dragons",
            Self::Political => "Political",
            Self::Heist => "Heist",
            Self::Cosmic => "Cosmic",
            Self::Wilderness => "Wilderness",
            Self::Dungeon => "Dungeon",
            Self::Urban => "Urban",
        }
    }
}

/// Rules framework the generated content should speak to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Ruleset {
    #[serde(rename = "5e")]
    FifthEdition,
    #[serde(rename = "system_agnostic")]
    SystemAgnostic,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::FifthEdition
    }
}

impl Ruleset {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FifthEdition => "5e",
            Self::SystemAgnostic => "System agnostic",
        }
    }

    /// Whether checks are phrased as numeric difficulty classes
    pub fn uses_numeric_dcs(&self) -> bool {
        matches!(self, Self::FifthEdition)
    }
}

/// How characters advance between levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LevelingMode {
    /// Level-ups tied to narrative checkpoints
    Milestone,
    /// Level-ups from accumulated experience points
    Xp,
}

impl Default for LevelingMode {
    fn default() -> Self {
        Self::Milestone
    }
}

impl LevelingMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Milestone => "Milestone",
            Self::Xp => "XP",
        }
    }
}

/// Kind of challenge an encounter presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EncounterType {
    Combat,
    Social,
    Exploration,
    Puzzle,
    SkillChallenge,
}

impl EncounterType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Social => "social",
            Self::Exploration => "exploration",
            Self::Puzzle => "puzzle",
            Self::SkillChallenge => "skill_challenge",
        }
    }

    pub fn is_combat(&self) -> bool {
        matches!(self, Self::Combat)
    }
}

/// Encounter difficulty label, shared by every ruleset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EncounterDifficulty {
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl EncounterDifficulty {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Deadly => "deadly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruleset_wire_values() {
        assert_eq!(
            serde_json::to_value(Ruleset::FifthEdition).unwrap(),
            serde_json::json!("5e")
        );
        assert_eq!(
            serde_json::from_value::<Ruleset>(serde_json::json!("system_agnostic")).unwrap(),
            Ruleset::SystemAgnostic
        );
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(serde_json::from_value::<Tone>(serde_json::json!("cheerful")).is_err());
        assert!(serde_json::from_value::<Theme>(serde_json::json!("space")).is_err());
        assert!(serde_json::from_value::<EncounterType>(serde_json::json!("chase")).is_err());
        assert!(serde_json::from_value::<Ruleset>(serde_json::json!("pf2e")).is_err());
    }

    #[test]
    fn test_skill_challenge_is_snake_case() {
        assert_eq!(
            serde_json::to_value(EncounterType::SkillChallenge).unwrap(),
            serde_json::json!("skill_challenge")
        );
        assert!(!EncounterType::SkillChallenge.is_combat());
        assert!(EncounterType::Combat.is_combat());
    }
}
