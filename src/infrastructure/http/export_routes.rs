//! Export API routes

use axum::{
    extract::Query,
    http::{header, StatusCode},
    Json,
};

use crate::application::dto::{ExportPart, ExportQuery};
use crate::domain::entities::{ExpandedSceneGuide, OutlineResponse};
use crate::infrastructure::export::{render_markdown, render_scene_guide_markdown, to_pretty_json};

/// Export the outline pair as a Markdown handout
pub async fn export_markdown(
    Json(result): Json<OutlineResponse>,
) -> ([(header::HeaderName, &'static str); 1], String) {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&result),
    )
}

/// Export a scene walkthrough as a Markdown handout
pub async fn export_scene_guide_markdown(
    Json(guide): Json<ExpandedSceneGuide>,
) -> ([(header::HeaderName, &'static str); 1], String) {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_scene_guide_markdown(&guide),
    )
}

/// Export the outline pair, or only its high-level outline, as a JSON download
pub async fn export_json(
    Query(query): Query<ExportQuery>,
    Json(result): Json<OutlineResponse>,
) -> Result<([(header::HeaderName, String); 2], String), (StatusCode, String)> {
    let json = match query.part {
        ExportPart::Full => to_pretty_json(&result),
        ExportPart::Outline => to_pretty_json(&result.outline),
    }
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", query.part.file_name()),
            ),
        ],
        json,
    ))
}
