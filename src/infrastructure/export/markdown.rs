//! Markdown handouts
//!
//! Rendering goes through `Display` wrappers so every write propagates
//! `fmt::Result` instead of being discarded.

use std::fmt::{self, Display, Formatter};

use crate::domain::entities::{
    AdventureOutline, DetailedAdventureOutline, Encounter, ExpandedSceneGuide, OutlineResponse,
    Scene,
};

/// Render the outline pair as one Markdown document
pub fn render_markdown(response: &OutlineResponse) -> String {
    OutlineMarkdown(response).to_string()
}

/// Render a scene walkthrough as Markdown
pub fn render_scene_guide_markdown(guide: &ExpandedSceneGuide) -> String {
    SceneGuideMarkdown(guide).to_string()
}

struct OutlineMarkdown<'a>(&'a OutlineResponse);

impl Display for OutlineMarkdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_outline(f, &self.0.outline)?;
        writeln!(f)?;
        write_detailed(f, &self.0.detailed)
    }
}

struct SceneGuideMarkdown<'a>(&'a ExpandedSceneGuide);

impl Display for SceneGuideMarkdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let guide = self.0;
        writeln!(f, "# {}: {}", guide.scene_id, guide.scene_title)?;
        writeln!(f)?;
        writeln!(f, "{}", guide.overview)?;

        for step in &guide.location_steps {
            writeln!(f)?;
            writeln!(f, "## {}: {}", step.step_id, step.name)?;
            writeln!(f)?;
            for line in step.read_aloud.lines() {
                writeln!(f, "> {}", line)?;
            }
            writeln!(f)?;
            writeln!(f, "**DM background:** {}", step.dm_background)?;
            if let Some(clock) = &step.time_pressure {
                writeln!(f, "**Time pressure:** {}", clock)?;
            }
            write_list(f, "Sensory details", &step.sensory_details)?;
            write_list(f, "Interactive elements", &step.interactive_elements)?;
            write_list(f, "Hidden information", &step.hidden_information)?;
            write_list(f, "Checks", &step.checks)?;
            if !step.choices.is_empty() {
                writeln!(f)?;
                writeln!(f, "**Choices:**")?;
                for choice in &step.choices {
                    writeln!(f, "- {}: {}", choice.option, choice.consequence)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "**Fail forward:** {}", step.fail_forward)?;

            for trigger in guide
                .encounter_triggers
                .iter()
                .filter(|t| t.step_id == step.step_id)
            {
                writeln!(f, "**Encounter {}:** {}", trigger.encounter_id, trigger.trigger)?;
            }
        }

        if !guide.exit_transitions.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Exits")?;
            writeln!(f)?;
            for exit in &guide.exit_transitions {
                writeln!(f, "- {}", exit)?;
            }
        }
        Ok(())
    }
}

fn write_outline(f: &mut Formatter<'_>, outline: &AdventureOutline) -> fmt::Result {
    writeln!(f, "# {}", outline.title)?;
    writeln!(f)?;
    writeln!(f, "{}", outline.logline)?;
    writeln!(f)?;
    writeln!(f, "**Central conflict:** {}", outline.central_conflict)?;
    writeln!(f, "**Antagonist:** {}", outline.villain_or_antagonist)?;
    if !outline.themes.is_empty() {
        writeln!(f, "**Themes:** {}", outline.themes.join(", "))?;
    }

    write_section(f, "Hooks", &outline.hooks)?;

    writeln!(f)?;
    writeln!(f, "## Key NPCs")?;
    for npc in &outline.key_npcs {
        writeln!(f)?;
        writeln!(f, "### {}", npc.name)?;
        writeln!(f, "- **Role:** {}", npc.role)?;
        writeln!(f, "- **Public face:** {}", npc.public_face)?;
        writeln!(f, "- **Secret:** {}", npc.secret)?;
        writeln!(f, "- **Leverage:** {}", npc.leverage)?;
    }

    writeln!(f)?;
    writeln!(f, "## Factions")?;
    for faction in &outline.factions {
        writeln!(f)?;
        writeln!(f, "### {}", faction.name)?;
        writeln!(f, "- **Goal:** {}", faction.goal)?;
        writeln!(f, "- **Method:** {}", faction.method)?;
        writeln!(f, "- **Complication:** {}", faction.complication)?;
    }

    writeln!(f)?;
    writeln!(f, "## Beats")?;
    for beat in &outline.beats {
        writeln!(f)?;
        writeln!(f, "### {}: {}", beat.beat_id, beat.title)?;
        writeln!(f, "- **Purpose:** {}", beat.purpose)?;
        writeln!(f, "- **Stakes:** {}", beat.stakes)?;
        writeln!(f, "- **Twist/Revelation:** {}", beat.twist_or_reveal)?;
    }

    write_section(f, "Continuity promises", &outline.continuity_promises)
}

fn write_detailed(f: &mut Formatter<'_>, detailed: &DetailedAdventureOutline) -> fmt::Result {
    writeln!(f, "# {}: Scenes, Encounters and Leveling", detailed.outline_title)?;
    writeln!(f)?;
    writeln!(f, "**Estimated play time:** {} min", detailed.total_minutes())?;

    write_section(f, "Structure notes", &detailed.structure_notes)?;

    writeln!(f)?;
    writeln!(f, "## Scenes")?;
    for scene in &detailed.scenes {
        write_scene(f, scene)?;
    }

    writeln!(f)?;
    writeln!(f, "## Level progression")?;
    writeln!(f)?;
    for step in &detailed.level_progression {
        writeln!(
            f,
            "- **{}**: After **{}** -> Level **{}**. {}",
            step.step_id, step.after_scene_id, step.level, step.rationale
        )?;
        if !step.optional_side_objectives.is_empty() {
            writeln!(f, "  - Optional: {}", step.optional_side_objectives.join("; "))?;
        }
    }

    if !detailed.optional_side_quests.is_empty() {
        write_section(f, "Optional side quests", &detailed.optional_side_quests)?;
    }
    if !detailed.recap_questions.is_empty() {
        write_section(f, "Recap questions", &detailed.recap_questions)?;
    }
    Ok(())
}

fn write_scene(f: &mut Formatter<'_>, scene: &Scene) -> fmt::Result {
    writeln!(f)?;
    writeln!(
        f,
        "### {}: {} ({} min) at {}",
        scene.scene_id, scene.title, scene.estimated_minutes, scene.location
    )?;
    writeln!(f)?;
    writeln!(f, "**Goal:** {}", scene.goal)?;
    writeln!(f)?;
    for line in scene.boxed_text.lines() {
        writeln!(f, "> {}", line)?;
    }

    write_list(f, "Obstacles", &scene.obstacles)?;

    if !scene.encounters.is_empty() {
        writeln!(f)?;
        writeln!(f, "**Encounters:**")?;
        for encounter in &scene.encounters {
            write_encounter(f, encounter)?;
        }
    }

    write_list(f, "Clues & info", &scene.clues_and_info)?;
    write_list(f, "Rewards", &scene.rewards)?;
    write_list(f, "Consequences", &scene.consequences)?;

    if !scene.links_to_beats.is_empty() {
        writeln!(f)?;
        writeln!(f, "_Links to beats: {}_", scene.links_to_beats.join(", "))?;
    }
    Ok(())
}

fn write_encounter(f: &mut Formatter<'_>, encounter: &Encounter) -> fmt::Result {
    writeln!(
        f,
        "- **{} [{} | {}]**: {}",
        encounter.encounter_id,
        encounter.encounter_type.display_name(),
        encounter.difficulty.display_name(),
        encounter.summary
    )?;
    writeln!(f, "  - Win: {}", encounter.win_condition)?;
    writeln!(f, "  - Fail forward: {}", encounter.fail_forward)?;
    if !encounter.setup.is_empty() {
        writeln!(f, "  - Setup:")?;
        for item in &encounter.setup {
            writeln!(f, "    - {}", item)?;
        }
    }
    if !encounter.scaling_notes.is_empty() {
        writeln!(f, "  - Scaling:")?;
        for item in &encounter.scaling_notes {
            writeln!(f, "    - {}", item)?;
        }
    }
    Ok(())
}

/// `## heading` followed by a bullet list
fn write_section(f: &mut Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "## {}", heading)?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {}", item)?;
    }
    Ok(())
}

/// Bold label followed by a bullet list; skipped when empty
fn write_list(f: &mut Formatter<'_>, label: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "**{}:**", label)?;
    for item in items {
        writeln!(f, "- {}", item)?;
    }
    Ok(())
}
