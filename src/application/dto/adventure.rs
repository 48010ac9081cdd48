use serde::{Deserialize, Serialize};

use crate::domain::entities::{ExpandedSceneGuide, OutlineRequest, OutlineResponse};
use crate::domain::services::LintWarning;

/// Expand one scene of a finished outline pair
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneGuideRequestDto {
    pub request: OutlineRequest,
    pub result: OutlineResponse,
    pub scene_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LintRequestDto {
    pub request: OutlineRequest,
    pub result: OutlineResponse,
    #[serde(default)]
    pub guide: Option<ExpandedSceneGuide>,
    /// Scene the guide belongs to; defaults to the guide's own scene id
    #[serde(default)]
    pub scene_id: Option<String>,
}

impl LintRequestDto {
    /// Scene id the guide should be checked against, if a guide was sent
    pub fn guide_scene_id(&self) -> Option<&str> {
        let guide = self.guide.as_ref()?;
        Some(self.scene_id.as_deref().unwrap_or(&guide.scene_id))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LintResponseDto {
    pub warnings: Vec<LintWarning>,
}

/// Which part of the pair a JSON export contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPart {
    #[default]
    Full,
    Outline,
}

impl ExportPart {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Full => "adventure_outline.json",
            Self::Outline => "adventure_outline_high_level.json",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub part: ExportPart,
}
