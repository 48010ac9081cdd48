//! Error taxonomy for the generation pipeline
//!
//! Upstream failures are classified once, at the boundary between the
//! generation client and the orchestrator, into a closed [`ErrorKind`].
//! Callers branch on the kind instead of inspecting message text.

use std::fmt;

use crate::application::ports::outbound::LlmError;
use crate::domain::value_objects::ValidationError;

/// Message fragments the provider uses for an exhausted quota or budget
const QUOTA_MARKERS: [&str; 2] = ["insufficient_quota", "exceeded your current quota"];

/// Pipeline stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Outline,
    DetailedOutline,
    SceneGuide,
}

impl Stage {
    /// Name of the output schema requested at this stage
    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::Outline => "adventure_outline",
            Self::DetailedOutline => "detailed_adventure_outline",
            Self::SceneGuide => "expanded_scene_guide",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Outline => "outline",
            Self::DetailedOutline => "detailed_outline",
            Self::SceneGuide => "scene_guide",
        };
        f.write_str(name)
    }
}

/// Closed classification of every pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request broke a declared field constraint
    InputValidation,
    /// No usable JSON text came back
    Generation,
    /// JSON came back but did not fit the expected document shape
    SchemaValidation,
    /// The provider reported an exhausted quota or budget
    QuotaExceeded,
    /// Any other failure talking to the provider
    Transport,
    /// No generation backend is configured
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InputValidation => "input validation",
            Self::Generation => "generation",
            Self::SchemaValidation => "schema validation",
            Self::QuotaExceeded => "quota exceeded",
            Self::Transport => "transport",
            Self::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// True if the message reports an exhausted quota
pub fn is_quota_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    QUOTA_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Classify a backend failure
pub fn classify_llm_error(error: &LlmError) -> ErrorKind {
    match error {
        LlmError::RequestFailed(message) | LlmError::Api { message, .. }
            if is_quota_message(message) =>
        {
            ErrorKind::QuotaExceeded
        }
        LlmError::InvalidResponse(message) if is_quota_message(message) => {
            ErrorKind::QuotaExceeded
        }
        LlmError::InvalidResponse(_) => ErrorKind::Generation,
        LlmError::RequestFailed(_) | LlmError::Api { .. } => ErrorKind::Transport,
    }
}

/// A stage-agnostic failure from the generation client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl GenerationFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Attach the stage the failure happened in
    pub fn at(self, stage: Stage) -> AdventureError {
        AdventureError::Stage {
            stage,
            kind: self.kind,
            message: self.message,
        }
    }
}

impl From<LlmError> for GenerationFailure {
    fn from(error: LlmError) -> Self {
        Self::new(classify_llm_error(&error), error.to_string())
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Errors reported by the adventure pipeline
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdventureError {
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("No generation credential configured")]
    MissingCredentials,

    #[error("Scene {0} not found in the detailed outline")]
    UnknownScene(String),

    #[error("{stage} stage failed ({kind}): {message}")]
    Stage {
        stage: Stage,
        kind: ErrorKind,
        message: String,
    },
}

impl AdventureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::UnknownScene(_) => ErrorKind::InputValidation,
            Self::MissingCredentials => ErrorKind::Configuration,
            Self::Stage { kind, .. } => *kind,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.kind() == ErrorKind::QuotaExceeded
    }
}
