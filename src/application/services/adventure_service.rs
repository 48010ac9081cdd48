//! Adventure Service - the multi-stage generation pipeline
//!
//! Runs Outline -> DetailedOutline strictly in sequence, since the second
//! payload embeds the validated first result. Scene guides are expanded on
//! demand, one call per scene, from an already finished outline pair and
//! never modify it.

use tracing::Instrument;
use uuid::Uuid;

use super::adventure_error::{AdventureError, Stage};
use super::llm::prompt_builder::{
    build_detailed_prompt, build_outline_prompt, build_scene_guide_prompt, DETAILED_INSTRUCTIONS,
    OUTLINE_INSTRUCTIONS, SCENE_GUIDE_INSTRUCTIONS,
};
use super::llm::StructuredGenerator;
use crate::application::ports::outbound::LlmPort;
use crate::domain::entities::{
    AdventureOutline, DetailedAdventureOutline, ExpandedSceneGuide, OutlineRequest,
    OutlineResponse, Scene,
};
use crate::domain::services::{lint_adventure, lint_outline, lint_scene_guide, LintWarning};

/// Orchestrates schema-constrained generation of adventure documents
pub struct AdventureService<L: LlmPort> {
    generator: StructuredGenerator<L>,
}

impl<L: LlmPort> AdventureService<L> {
    pub fn new(llm: L) -> Self {
        Self {
            generator: StructuredGenerator::new(llm),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.generator = self.generator.with_temperature(temperature);
        self
    }

    /// Stage 1: the high-level outline
    pub async fn generate_outline(
        &self,
        request: &OutlineRequest,
    ) -> Result<AdventureOutline, AdventureError> {
        tracing::info!(stage = %Stage::Outline, "Generating adventure outline");
        let outline: AdventureOutline = self
            .generator
            .generate_typed(
                Stage::Outline.schema_name(),
                &build_outline_prompt(request),
                OUTLINE_INSTRUCTIONS,
            )
            .await
            .map_err(|e| e.at(Stage::Outline))?;

        log_warnings(Stage::Outline, &lint_outline(&outline));
        Ok(outline)
    }

    /// Stage 2: the scene-by-scene outline, seeded with the stage-1 result
    pub async fn generate_detailed(
        &self,
        request: &OutlineRequest,
        outline: &AdventureOutline,
    ) -> Result<DetailedAdventureOutline, AdventureError> {
        tracing::info!(stage = %Stage::DetailedOutline, "Generating detailed outline");
        let mut detailed: DetailedAdventureOutline = self
            .generator
            .generate_typed(
                Stage::DetailedOutline.schema_name(),
                &build_detailed_prompt(request, outline),
                DETAILED_INSTRUCTIONS,
            )
            .await
            .map_err(|e| e.at(Stage::DetailedOutline))?;

        if detailed.backfill_title(outline) {
            tracing::debug!("Detailed outline had no title; using outline title");
        }
        Ok(detailed)
    }

    /// Run both stages and pair the results
    pub async fn generate_outline_pair(
        &self,
        request: &OutlineRequest,
    ) -> Result<OutlineResponse, AdventureError> {
        request.validate()?;

        let generation_id = Uuid::new_v4();
        let span = tracing::info_span!("outline_pair", %generation_id);

        async move {
            tracing::info!(
                ruleset = request.ruleset.display_name(),
                leveling = request.leveling_mode.display_name(),
                tone = request.tone.display_name(),
                theme = request.theme.display_name(),
                levels = %format!("{}-{}", request.party_level_start, request.party_level_end),
                sessions = request.session_count_target,
                "Starting adventure generation"
            );
            let outline = self.generate_outline(request).await?;
            let detailed = self.generate_detailed(request, &outline).await?;

            let warnings = lint_adventure(request, &outline, &detailed);
            log_warnings(Stage::DetailedOutline, &warnings);

            tracing::info!(
                title = %outline.title,
                beats = outline.beats.len(),
                scenes = detailed.scenes.len(),
                minutes = detailed.total_minutes(),
                "Outline pair generated"
            );
            Ok::<_, AdventureError>(OutlineResponse { outline, detailed })
        }
        .instrument(span)
        .await
    }

    /// Stage 3: expand one scene of a finished outline pair
    pub async fn expand_scene(
        &self,
        request: &OutlineRequest,
        result: &OutlineResponse,
        scene: &Scene,
    ) -> Result<ExpandedSceneGuide, AdventureError> {
        request.validate()?;

        let generation_id = Uuid::new_v4();
        let span = tracing::info_span!("scene_guide", %generation_id, scene_id = %scene.scene_id);

        async move {
            tracing::info!(stage = %Stage::SceneGuide, "Expanding scene");
            let guide: ExpandedSceneGuide = self
                .generator
                .generate_typed(
                    Stage::SceneGuide.schema_name(),
                    &build_scene_guide_prompt(request, result, scene),
                    SCENE_GUIDE_INSTRUCTIONS,
                )
                .await
                .map_err(|e| e.at(Stage::SceneGuide))?;

            log_warnings(Stage::SceneGuide, &lint_scene_guide(scene, &guide));
            Ok::<_, AdventureError>(guide)
        }
        .instrument(span)
        .await
    }

    #[cfg(test)]
    pub(crate) fn generator_llm(&self) -> &L {
        self.generator.llm()
    }
}

fn log_warnings(stage: Stage, warnings: &[LintWarning]) {
    for warning in warnings {
        tracing::warn!(%stage, path = %warning.path, "{}", warning.message);
    }
}
