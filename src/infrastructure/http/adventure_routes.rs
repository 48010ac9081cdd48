//! Adventure generation API routes

use axum::{
    extract::State,
    http::{HeaderName, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::application::dto::{LintRequestDto, LintResponseDto, SceneGuideRequestDto};
use crate::application::services::{
    expand_scene_with_fallback, generate_outline_with_fallback, AdventureError, ErrorKind,
};
use crate::domain::entities::{ExpandedSceneGuide, OutlineRequest, OutlineResponse};
use crate::domain::services::{lint_adventure, lint_scene_guide};
use crate::infrastructure::state::AppState;

/// Response header naming where the document came from (`model` or `demo`)
pub const CONTENT_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-content-source");

type SourcedJson<T> = ([(HeaderName, &'static str); 1], Json<T>);

fn error_response(error: AdventureError) -> (StatusCode, String) {
    let status = match (&error, error.kind()) {
        (AdventureError::UnknownScene(_), _) => StatusCode::NOT_FOUND,
        (_, ErrorKind::InputValidation) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(
            kind = %error.kind(),
            stage = ?error.stage(),
            "Adventure generation failed: {}",
            error
        );
    }
    (status, error.to_string())
}

/// Generate the outline pair
pub async fn generate_outline(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OutlineRequest>,
) -> Result<SourcedJson<OutlineResponse>, (StatusCode, String)> {
    let service = state.adventure_service();
    let generated = generate_outline_with_fallback(service.as_ref(), &request, state.fallback)
        .await
        .map_err(error_response)?;

    Ok((
        [(CONTENT_SOURCE_HEADER, generated.source.as_str())],
        Json(generated.value),
    ))
}

/// Expand one scene of a finished outline pair
pub async fn generate_scene_guide(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SceneGuideRequestDto>,
) -> Result<SourcedJson<ExpandedSceneGuide>, (StatusCode, String)> {
    let service = state.adventure_service();
    let generated = expand_scene_with_fallback(
        service.as_ref(),
        &body.request,
        &body.result,
        &body.scene_id,
        state.fallback,
    )
    .await
    .map_err(error_response)?;

    Ok((
        [(CONTENT_SOURCE_HEADER, generated.source.as_str())],
        Json(generated.value),
    ))
}

/// Report soft-invariant violations in a generated document
pub async fn lint(
    Json(body): Json<LintRequestDto>,
) -> Result<Json<LintResponseDto>, (StatusCode, String)> {
    let mut warnings = lint_adventure(&body.request, &body.result.outline, &body.result.detailed);

    if let (Some(guide), Some(scene_id)) = (&body.guide, body.guide_scene_id()) {
        let scene = body.result.find_scene(scene_id).ok_or_else(|| {
            error_response(AdventureError::UnknownScene(scene_id.to_string()))
        })?;
        warnings.extend(lint_scene_guide(scene, guide));
    }

    Ok(Json(LintResponseDto { warnings }))
}
