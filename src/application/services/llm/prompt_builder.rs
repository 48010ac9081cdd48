//! Prompt payload building for each generation stage
//!
//! Every builder is a pure projection of its inputs into a JSON payload that
//! is sent to the model as a single user turn, next to a short instruction
//! turn naming what to produce.

use serde_json::{json, Value};

use crate::domain::entities::{AdventureOutline, OutlineRequest, OutlineResponse, Scene};
use crate::domain::value_objects::{LevelingMode, Ruleset};

/// Fixed system instruction shared by every stage
pub const SYSTEM_PROMPT: &str = "You are a veteran tabletop RPG adventure designer.
You output ONLY valid JSON that conforms exactly to the given schema.
Be concrete and playable: specific names, locations, motivations, clear objectives.
Include BOTH combat and non-combat encounters.
Avoid copyrighted setting text; create original material.
If ruleset is 'system_agnostic', avoid 5e jargon (CR, XP tables), but keep difficulty labels.
Never output markdown, only JSON.
";

pub const OUTLINE_INSTRUCTIONS: &str = "Create the HIGH-LEVEL AdventureOutline JSON now.";

pub const DETAILED_INSTRUCTIONS: &str =
    "Now expand into a DETAILED Adventure outline with scenes, encounters, and level progression.";

pub const SCENE_GUIDE_INSTRUCTIONS: &str =
    "Now expand the chosen scene into a step-by-step ExpandedSceneGuide JSON for the DM.";

/// The request as every stage sees it: trimmed concept, blank constraints dropped
fn request_payload(request: &OutlineRequest) -> Value {
    json!({
        "concept": request.concept.trim(),
        "party_level_start": request.party_level_start,
        "party_level_end": request.party_level_end,
        "ruleset": request.ruleset,
        "leveling_mode": request.leveling_mode,
        "tone": request.tone,
        "theme": request.theme,
        "session_count_target": request.session_count_target,
        "constraints": request.normalized_constraints(),
        "include_travel": request.include_travel,
    })
}

/// Stage 1: the request fields plus outline requirements
pub fn build_outline_prompt(request: &OutlineRequest) -> Value {
    let mut payload = request_payload(request);
    payload["requirements"] = json!([
        "Beats should be 5–9 items depending on session_count_target.",
        "Beat ids must be sequential: B1, B2, B3, ...",
        "Include at least 2 hooks.",
        "Include at least 3 key NPCs and at least 1 faction (2 preferred).",
        "continuity_promises: 5–12 bullet-style facts that must remain true later.",
    ]);
    payload
}

fn leveling_requirement(mode: LevelingMode) -> &'static str {
    match mode {
        LevelingMode::Milestone => {
            "leveling_mode is milestone: place level-ups after key scenes and name the milestone in rationale."
        }
        LevelingMode::Xp => {
            "leveling_mode is xp: describe XP targets in rationale text (no big tables)."
        }
    }
}

/// Stage 2: the request, the validated outline and scene-level requirements
pub fn build_detailed_prompt(request: &OutlineRequest, outline: &AdventureOutline) -> Value {
    json!({
        "request": request_payload(request),
        "outline": outline,
        "requirements": [
            "Create 5–9 scenes (S1..S#). Each scene must link_to_beats using beat ids from the outline.",
            "Encounter ids must be sequential across the whole adventure: E1, E2, E3, ...",
            "Across the whole adventure: include at least 1 combat encounter and at least 1 non-combat encounter.",
            "Encounters must include win_condition and fail_forward (never dead-end the adventure).",
            "Level progression must be structured and sensible from party_level_start to party_level_end (step ids L1, L2, ...).",
            leveling_requirement(request.leveling_mode),
            "Estimated_minutes should roughly match session_count_target (scenes usually 30–75 minutes).",
            "Honor continuity_promises exactly unless a constraint forces a change (then explain in structure_notes).",
        ],
    })
}

fn check_requirement(ruleset: Ruleset) -> &'static str {
    if ruleset.uses_numeric_dcs() {
        "Phrase checks with numeric difficulty classes, e.g. 'DC 14 Wisdom (Perception)'."
    } else {
        "Phrase checks with qualitative difficulty only (Easy, Moderate, Hard); never use DCs or 5e terms."
    }
}

/// Stage 3: one scene expanded into a location-by-location walkthrough.
///
/// Both documents go in so the guide can lean on neighbouring scenes and the
/// level progression.
pub fn build_scene_guide_prompt(
    request: &OutlineRequest,
    result: &OutlineResponse,
    scene: &Scene,
) -> Value {
    json!({
        "request": request_payload(request),
        "outline": result.outline,
        "detailed": result.detailed,
        "continuity_promises": result.outline.continuity_promises,
        "scene": scene,
        "requirements": [
            format!(
                "Create 5–10 location_steps with ids {}-L1, {}-L2, ... in play order.",
                scene.scene_id, scene.scene_id
            ),
            "Every step must have non-empty read_aloud text and dm_background text.".to_string(),
            "Map every encounter of the scene to the step where it triggers in encounter_triggers.".to_string(),
            check_requirement(request.ruleset).to_string(),
            "Every step needs a fail_forward so the scene never stalls.".to_string(),
            "Use time_pressure only where a clock genuinely applies; otherwise null.".to_string(),
            "Do not contradict continuity_promises.".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::demo_outline_response;

    fn request() -> OutlineRequest {
        OutlineRequest::new("A grief-stricken wizard siphons ley lines into a newborn plane")
            .with_levels(3, 5)
            .with_constraint("include at least one social scene")
            .with_constraint("   ")
    }

    #[test]
    fn test_outline_prompt_projects_every_field() {
        let payload = build_outline_prompt(&request());
        for key in [
            "concept",
            "party_level_start",
            "party_level_end",
            "ruleset",
            "leveling_mode",
            "tone",
            "theme",
            "session_count_target",
            "constraints",
            "include_travel",
            "requirements",
        ] {
            assert!(payload.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(payload["ruleset"], "5e");
        assert_eq!(payload["constraints"], json!(["include at least one social scene"]));
        assert!(payload["requirements"]
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r.as_str().unwrap().contains("at least 2 hooks")));
    }

    #[test]
    fn test_detailed_prompt_embeds_outline() {
        let req = request();
        let response = demo_outline_response(&req);
        let payload = build_detailed_prompt(&req, &response.outline);

        assert_eq!(payload["outline"]["title"], json!(response.outline.title));
        assert_eq!(payload["request"]["concept"], json!(req.concept));
        let requirements = payload["requirements"].as_array().unwrap();
        assert!(requirements
            .iter()
            .any(|r| r.as_str().unwrap().contains("fail_forward")));
        assert!(requirements
            .iter()
            .any(|r| r.as_str().unwrap().contains("continuity_promises")));
    }

    #[test]
    fn test_detailed_prompt_leveling_mode() {
        let milestone = request();
        let xp = request().with_leveling_mode(LevelingMode::Xp);
        let outline = demo_outline_response(&milestone).outline;

        let text = |payload: Value| payload["requirements"].to_string();
        assert!(text(build_detailed_prompt(&milestone, &outline)).contains("milestone"));
        assert!(text(build_detailed_prompt(&xp, &outline)).contains("XP targets"));
    }

    #[test]
    fn test_scene_guide_prompt_ruleset_phrasing() {
        let req = request();
        let response = demo_outline_response(&req);
        let scene = &response.detailed.scenes[2];

        let dnd = build_scene_guide_prompt(&req, &response, scene);
        assert_eq!(dnd["scene"]["scene_id"], "S3");
        assert!(dnd["requirements"].to_string().contains("S3-L1"));
        assert!(dnd["requirements"].to_string().contains("DC 14"));
        assert_eq!(
            dnd["continuity_promises"].as_array().unwrap().len(),
            response.outline.continuity_promises.len()
        );

        let agnostic_req = request().with_ruleset(Ruleset::SystemAgnostic);
        let agnostic = build_scene_guide_prompt(&agnostic_req, &response, scene);
        assert!(agnostic["requirements"].to_string().contains("Easy, Moderate, Hard"));
        assert!(!agnostic["requirements"].to_string().contains("DC 14"));
    }

    #[test]
    fn test_every_stage_sends_normalized_constraints() {
        let req = request();
        let response = demo_outline_response(&req);
        let expected = json!(["include at least one social scene"]);

        assert_eq!(build_outline_prompt(&req)["constraints"], expected);
        assert_eq!(
            build_detailed_prompt(&req, &response.outline)["request"]["constraints"],
            expected
        );
        let scene = &response.detailed.scenes[0];
        assert_eq!(
            build_scene_guide_prompt(&req, &response, scene)["request"]["constraints"],
            expected
        );
    }

    #[test]
    fn test_scene_guide_prompt_carries_detailed_outline() {
        let req = request();
        let response = demo_outline_response(&req);
        let payload = build_scene_guide_prompt(&req, &response, &response.detailed.scenes[1]);

        assert_eq!(payload["outline"]["title"], json!(response.outline.title));
        assert_eq!(
            payload["detailed"]["scenes"].as_array().unwrap().len(),
            response.detailed.scenes.len()
        );
        assert_eq!(
            payload["detailed"]["level_progression"],
            json!(response.detailed.level_progression)
        );
    }
}
