//! Best-effort checks over generated documents
//!
//! Count ranges, encounter coverage and cross-references are requested from
//! the model in natural language only. Generated content may miss them, so
//! these checks report warnings and never reject a document.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::{
    AdventureOutline, DetailedAdventureOutline, ExpandedSceneGuide, OutlineRequest, Scene,
    MAX_LOCATION_STEPS, MAX_SCENE_MINUTES, MIN_LOCATION_STEPS, MIN_SCENE_MINUTES,
};

/// A single soft-invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    /// Dotted path to the offending field, e.g. `detailed.scenes[2].links_to_beats`
    pub path: String,
    pub message: String,
}

impl LintWarning {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn check_count(
    warnings: &mut Vec<LintWarning>,
    path: &str,
    actual: usize,
    min: usize,
    max: Option<usize>,
) {
    let too_few = actual < min;
    let too_many = max.is_some_and(|max| actual > max);
    if too_few || too_many {
        let expected = match max {
            Some(max) => format!("{}-{}", min, max),
            None => format!("at least {}", min),
        };
        warnings.push(LintWarning::new(
            path,
            format!("expected {} entries, found {}", expected, actual),
        ));
    }
}

fn check_unique<'a>(
    warnings: &mut Vec<LintWarning>,
    path: &str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            warnings.push(LintWarning::new(path, format!("duplicate id {}", id)));
        }
    }
}

/// Lint the stage-1 outline on its own
pub fn lint_outline(outline: &AdventureOutline) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    check_count(&mut warnings, "outline.beats", outline.beats.len(), 5, Some(9));
    check_count(&mut warnings, "outline.hooks", outline.hooks.len(), 2, None);
    check_count(&mut warnings, "outline.key_npcs", outline.key_npcs.len(), 3, None);
    check_count(&mut warnings, "outline.factions", outline.factions.len(), 1, None);
    check_count(
        &mut warnings,
        "outline.continuity_promises",
        outline.continuity_promises.len(),
        5,
        Some(12),
    );
    check_unique(
        &mut warnings,
        "outline.beats",
        outline.beats.iter().map(|b| b.beat_id.as_str()),
    );

    warnings
}

/// Lint the outline pair, including weak references between the two stages
pub fn lint_adventure(
    request: &OutlineRequest,
    outline: &AdventureOutline,
    detailed: &DetailedAdventureOutline,
) -> Vec<LintWarning> {
    let mut warnings = lint_outline(outline);

    check_count(&mut warnings, "detailed.scenes", detailed.scenes.len(), 5, Some(9));
    check_unique(
        &mut warnings,
        "detailed.scenes",
        detailed.scenes.iter().map(|s| s.scene_id.as_str()),
    );
    check_unique(
        &mut warnings,
        "detailed.encounters",
        detailed.encounters().map(|e| e.encounter_id.as_str()),
    );

    let beat_ids: HashSet<&str> = outline.beat_ids().into_iter().collect();
    for (idx, scene) in detailed.scenes.iter().enumerate() {
        let path = format!("detailed.scenes[{}]", idx);
        for beat in &scene.links_to_beats {
            if !beat_ids.contains(beat.as_str()) {
                warnings.push(LintWarning::new(
                    format!("{}.links_to_beats", path),
                    format!("unknown beat id {}", beat),
                ));
            }
        }
        if scene.estimated_minutes < MIN_SCENE_MINUTES || scene.estimated_minutes > MAX_SCENE_MINUTES
        {
            warnings.push(LintWarning::new(
                format!("{}.estimated_minutes", path),
                format!(
                    "expected {}-{} minutes, found {}",
                    MIN_SCENE_MINUTES, MAX_SCENE_MINUTES, scene.estimated_minutes
                ),
            ));
        }
        for (e_idx, encounter) in scene.encounters.iter().enumerate() {
            let e_path = format!("{}.encounters[{}]", path, e_idx);
            if encounter.win_condition.trim().is_empty() {
                warnings.push(LintWarning::new(
                    format!("{}.win_condition", e_path),
                    "encounter has no win condition",
                ));
            }
            if encounter.fail_forward.trim().is_empty() {
                warnings.push(LintWarning::new(
                    format!("{}.fail_forward", e_path),
                    "encounter has no fail-forward",
                ));
            }
        }
    }

    if !detailed.encounters().any(|e| e.encounter_type.is_combat()) {
        warnings.push(LintWarning::new(
            "detailed.scenes",
            "no combat encounter in any scene",
        ));
    }
    if !detailed.encounters().any(|e| !e.encounter_type.is_combat()) {
        warnings.push(LintWarning::new(
            "detailed.scenes",
            "no non-combat encounter in any scene",
        ));
    }

    warnings.extend(lint_level_progression(request, detailed));
    warnings
}

fn lint_level_progression(
    request: &OutlineRequest,
    detailed: &DetailedAdventureOutline,
) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let scene_ids: HashSet<&str> = detailed.scenes.iter().map(|s| s.scene_id.as_str()).collect();

    let mut previous = request.party_level_start;
    for (idx, step) in detailed.level_progression.iter().enumerate() {
        let path = format!("detailed.level_progression[{}]", idx);
        if !scene_ids.contains(step.after_scene_id.as_str()) {
            warnings.push(LintWarning::new(
                format!("{}.after_scene_id", path),
                format!("unknown scene id {}", step.after_scene_id),
            ));
        }
        if step.level < previous {
            warnings.push(LintWarning::new(
                format!("{}.level", path),
                format!("level drops from {} to {}", previous, step.level),
            ));
        }
        previous = step.level;
    }

    if request.party_level_end > request.party_level_start {
        match detailed.level_progression.last() {
            Some(last) if last.level != request.party_level_end => {
                warnings.push(LintWarning::new(
                    "detailed.level_progression",
                    format!(
                        "progression ends at level {}, requested {}",
                        last.level, request.party_level_end
                    ),
                ));
            }
            None => warnings.push(LintWarning::new(
                "detailed.level_progression",
                "no level progression steps",
            )),
            _ => {}
        }
    }

    warnings
}

/// Lint a stage-3 walkthrough against the scene it expands
pub fn lint_scene_guide(scene: &Scene, guide: &ExpandedSceneGuide) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if guide.scene_id != scene.scene_id {
        warnings.push(LintWarning::new(
            "guide.scene_id",
            format!("expected {}, found {}", scene.scene_id, guide.scene_id),
        ));
    }
    check_count(
        &mut warnings,
        "guide.location_steps",
        guide.location_steps.len(),
        MIN_LOCATION_STEPS,
        Some(MAX_LOCATION_STEPS),
    );
    check_unique(
        &mut warnings,
        "guide.location_steps",
        guide.location_steps.iter().map(|s| s.step_id.as_str()),
    );

    let prefix = format!("{}-L", scene.scene_id);
    for (idx, step) in guide.location_steps.iter().enumerate() {
        let path = format!("guide.location_steps[{}]", idx);
        if !step.step_id.starts_with(&prefix) {
            warnings.push(LintWarning::new(
                format!("{}.step_id", path),
                format!("{} does not follow {}<n>", step.step_id, prefix),
            ));
        }
        for (field, value) in [
            ("read_aloud", &step.read_aloud),
            ("dm_background", &step.dm_background),
            ("fail_forward", &step.fail_forward),
        ] {
            if value.trim().is_empty() {
                warnings.push(LintWarning::new(
                    format!("{}.{}", path, field),
                    format!("{} is empty", field),
                ));
            }
        }
    }

    for (idx, trigger) in guide.encounter_triggers.iter().enumerate() {
        let path = format!("guide.encounter_triggers[{}]", idx);
        if scene.find_encounter(&trigger.encounter_id).is_none() {
            warnings.push(LintWarning::new(
                format!("{}.encounter_id", path),
                format!("unknown encounter id {}", trigger.encounter_id),
            ));
        }
        if guide.find_step(&trigger.step_id).is_none() {
            warnings.push(LintWarning::new(
                format!("{}.step_id", path),
                format!("unknown step id {}", trigger.step_id),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::demo_adventure::{demo_outline_response, demo_scene_guide};

    fn request() -> OutlineRequest {
        OutlineRequest::new("A cursed lighthouse traps sailors in a time loop").with_levels(1, 3)
    }

    #[test]
    fn test_unknown_beat_reference_is_warning() {
        let request = request();
        let mut response = demo_outline_response(&request);
        response.detailed.scenes[0].links_to_beats = vec!["B99".to_string()];

        let warnings = lint_adventure(&request, &response.outline, &response.detailed);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "detailed.scenes[0].links_to_beats");
        assert!(warnings[0].message.contains("B99"));
    }

    #[test]
    fn test_unknown_scene_in_progression() {
        let request = request();
        let mut response = demo_outline_response(&request);
        response.detailed.level_progression[0].after_scene_id = "S42".to_string();

        let warnings = lint_adventure(&request, &response.outline, &response.detailed);
        assert!(warnings
            .iter()
            .any(|w| w.path == "detailed.level_progression[0].after_scene_id"));
    }

    #[test]
    fn test_count_ranges() {
        let request = request();
        let mut response = demo_outline_response(&request);
        response.outline.beats.truncate(3);
        response.outline.hooks.truncate(1);
        response.detailed.scenes.truncate(4);

        let paths: Vec<String> = lint_adventure(&request, &response.outline, &response.detailed)
            .into_iter()
            .map(|w| w.path)
            .collect();
        assert!(paths.contains(&"outline.beats".to_string()));
        assert!(paths.contains(&"outline.hooks".to_string()));
        assert!(paths.contains(&"detailed.scenes".to_string()));
    }

    #[test]
    fn test_missing_combat_coverage() {
        let request = request();
        let mut response = demo_outline_response(&request);
        for scene in &mut response.detailed.scenes {
            scene.encounters.retain(|e| !e.encounter_type.is_combat());
        }

        let warnings = lint_adventure(&request, &response.outline, &response.detailed);
        assert!(warnings
            .iter()
            .any(|w| w.message == "no combat encounter in any scene"));
    }

    #[test]
    fn test_level_regression_and_wrong_end() {
        let request = request();
        let mut response = demo_outline_response(&request);
        response.detailed.level_progression[1].level = 1;

        let warnings = lint_adventure(&request, &response.outline, &response.detailed);
        assert!(warnings
            .iter()
            .any(|w| w.path == "detailed.level_progression[1].level"));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("progression ends at level 1")));
    }

    #[test]
    fn test_scene_guide_references() {
        let request = request();
        let response = demo_outline_response(&request);
        let scene = &response.detailed.scenes[1];
        let mut guide = demo_scene_guide(&request, &response.outline, &response.detailed, scene);
        guide.encounter_triggers[0].encounter_id = "E77".to_string();
        guide.location_steps[4].step_id = "S9-L5".to_string();
        guide.location_steps[2].fail_forward = "  ".to_string();

        let warnings = lint_scene_guide(scene, &guide);
        assert!(warnings
            .iter()
            .any(|w| w.path == "guide.encounter_triggers[0].encounter_id"));
        assert!(warnings
            .iter()
            .any(|w| w.path == "guide.location_steps[4].step_id"));
        assert!(warnings
            .iter()
            .any(|w| w.path == "guide.location_steps[2].fail_forward"));
    }

    #[test]
    fn test_warning_display() {
        let warning = LintWarning::new("outline.hooks", "expected at least 2 entries, found 1");
        assert_eq!(
            warning.to_string(),
            "outline.hooks: expected at least 2 entries, found 1"
        );
    }
}
