//! Demo fallback policy
//!
//! Decides when deterministic demo content stands in for model output:
//! no backend configured, or the provider reports an exhausted quota.
//! Every other failure is surfaced to the caller unchanged.

use super::adventure_error::AdventureError;
use super::adventure_service::AdventureService;
use crate::application::ports::outbound::LlmPort;
use crate::domain::entities::{ExpandedSceneGuide, OutlineRequest, OutlineResponse};
use crate::domain::services::{demo_outline_response, demo_scene_guide};

/// Whether demo content may replace model output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub allow_demo: bool,
}

impl FallbackPolicy {
    pub fn new(allow_demo: bool) -> Self {
        Self { allow_demo }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self { allow_demo: true }
    }
}

/// Where a generated document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Model,
    Demo,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Demo => "demo",
        }
    }
}

/// A generated value tagged with its source
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub source: ContentSource,
}

impl<T> Generated<T> {
    fn model(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Model,
        }
    }

    fn demo(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Demo,
        }
    }
}

/// Generate the outline pair, substituting demo content when allowed.
///
/// The request is validated before any backend is contacted, so an invalid
/// request never degrades into demo output.
pub async fn generate_outline_with_fallback<L: LlmPort>(
    service: Option<&AdventureService<L>>,
    request: &OutlineRequest,
    policy: FallbackPolicy,
) -> Result<Generated<OutlineResponse>, AdventureError> {
    request.validate()?;

    let Some(service) = service else {
        if !policy.allow_demo {
            return Err(AdventureError::MissingCredentials);
        }
        tracing::info!("No generation backend configured; returning demo outline");
        return Ok(Generated::demo(demo_outline_response(request)));
    };

    match service.generate_outline_pair(request).await {
        Ok(response) => Ok(Generated::model(response)),
        Err(e) if e.is_quota_exceeded() && policy.allow_demo => {
            tracing::warn!(error = %e, "Quota exhausted; returning demo outline");
            Ok(Generated::demo(demo_outline_response(request)))
        }
        Err(e) => Err(e),
    }
}

/// Expand one scene, substituting a demo guide when allowed.
///
/// The request is validated before the scene lookup, as for the outline.
pub async fn expand_scene_with_fallback<L: LlmPort>(
    service: Option<&AdventureService<L>>,
    request: &OutlineRequest,
    result: &OutlineResponse,
    scene_id: &str,
    policy: FallbackPolicy,
) -> Result<Generated<ExpandedSceneGuide>, AdventureError> {
    request.validate()?;

    let scene = result
        .find_scene(scene_id)
        .ok_or_else(|| AdventureError::UnknownScene(scene_id.to_string()))?;
    let demo = || demo_scene_guide(request, &result.outline, &result.detailed, scene);

    let Some(service) = service else {
        if !policy.allow_demo {
            return Err(AdventureError::MissingCredentials);
        }
        tracing::info!(scene_id, "No generation backend configured; returning demo scene guide");
        return Ok(Generated::demo(demo()));
    };

    match service.expand_scene(request, result, scene).await {
        Ok(guide) => Ok(Generated::model(guide)),
        Err(e) if e.is_quota_exceeded() && policy.allow_demo => {
            tracing::warn!(error = %e, scene_id, "Quota exhausted; returning demo scene guide");
            Ok(Generated::demo(demo()))
        }
        Err(e) => Err(e),
    }
}
