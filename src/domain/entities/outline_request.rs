//! OutlineRequest - what the user asked for
//!
//! Built once per generation request from form or API input and never
//! mutated afterwards.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::{
    require_min_length, require_range, LevelingMode, Ruleset, Theme, Tone, ValidationError,
};

pub const MIN_CONCEPT_LENGTH: usize = 10;
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;
pub const MIN_SESSIONS: u8 = 1;
pub const MAX_SESSIONS: u8 = 20;

/// User intent for a generated adventure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutlineRequest {
    /// General concept / pitch
    pub concept: String,
    #[serde(default = "default_level_start")]
    pub party_level_start: u8,
    /// Conceptually >= start, not enforced
    #[serde(default = "default_level_end")]
    pub party_level_end: u8,
    #[serde(default)]
    pub ruleset: Ruleset,
    #[serde(default)]
    pub leveling_mode: LevelingMode,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_session_count")]
    pub session_count_target: u8,
    /// Hard constraints, one per entry. Also accepted as one multi-line string.
    #[serde(default, deserialize_with = "deserialize_constraints")]
    #[schemars(with = "Vec<String>")]
    pub constraints: Vec<String>,
    #[serde(default = "default_include_travel")]
    pub include_travel: bool,
}

fn default_level_start() -> u8 {
    3
}

fn default_level_end() -> u8 {
    5
}

fn default_session_count() -> u8 {
    3
}

fn default_include_travel() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConstraintsInput {
    List(Vec<String>),
    Lines(String),
}

fn deserialize_constraints<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ConstraintsInput::deserialize(deserializer)? {
        ConstraintsInput::List(list) => list,
        ConstraintsInput::Lines(text) => OutlineRequest::constraints_from_lines(&text),
    })
}

impl OutlineRequest {
    /// Check declared field constraints before any generation call
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_length(&self.concept, MIN_CONCEPT_LENGTH, "concept")?;
        require_range(
            self.party_level_start.into(),
            MIN_LEVEL.into(),
            MAX_LEVEL.into(),
            "party_level_start",
        )?;
        require_range(
            self.party_level_end.into(),
            MIN_LEVEL.into(),
            MAX_LEVEL.into(),
            "party_level_end",
        )?;
        require_range(
            self.session_count_target.into(),
            MIN_SESSIONS.into(),
            MAX_SESSIONS.into(),
            "session_count_target",
        )?;
        Ok(())
    }

    /// Trimmed constraints with blank entries removed
    pub fn normalized_constraints(&self) -> Vec<String> {
        self.constraints
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parse a multi-line constraint block, one constraint per line
    pub fn constraints_from_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
impl OutlineRequest {
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            party_level_start: default_level_start(),
            party_level_end: default_level_end(),
            ruleset: Ruleset::default(),
            leveling_mode: LevelingMode::default(),
            tone: Tone::default(),
            theme: Theme::default(),
            session_count_target: default_session_count(),
            constraints: Vec::new(),
            include_travel: default_include_travel(),
        }
    }

    pub fn with_levels(mut self, start: u8, end: u8) -> Self {
        self.party_level_start = start;
        self.party_level_end = end;
        self
    }

    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    pub fn with_leveling_mode(mut self, mode: LevelingMode) -> Self {
        self.leveling_mode = mode;
        self
    }

    pub fn with_sessions(mut self, sessions: u8) -> Self {
        self.session_count_target = sessions;
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }
}
