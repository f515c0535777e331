//! Analysis requests and the validation that gates them.

use crate::file::PendingFile;
use crate::{Mode, ResultKind, ValidationError};

/// A user-facing trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    QuickCheck,
    DetailedCheck,
    DetectAi,
}

impl Trigger {
    pub fn all() -> &'static [Trigger] {
        &[Trigger::QuickCheck, Trigger::DetailedCheck, Trigger::DetectAi]
    }

    /// The mode in which this trigger is visible.
    pub fn mode(self) -> Mode {
        match self {
            Self::QuickCheck | Self::DetailedCheck => Mode::Plagiarism,
            Self::DetectAi => Mode::AiDetection,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::QuickCheck => "Quick Check",
            Self::DetailedCheck => "Detailed Analysis",
            Self::DetectAi => "Detect AI",
        }
    }
}

/// Backend endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AnalyzeLocal,
    AnalyzeDetailed,
    DetectAi,
    DetectAiFile,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::AnalyzeLocal => "/analyze/local",
            Self::AnalyzeDetailed => "/analyze/detailed",
            Self::DetectAi => "/detect-ai",
            Self::DetectAiFile => "/detect-ai/file",
        }
    }

    pub fn result_kind(self) -> ResultKind {
        match self {
            Self::AnalyzeLocal | Self::AnalyzeDetailed => ResultKind::Plagiarism,
            Self::DetectAi | Self::DetectAiFile => ResultKind::AiDetection,
        }
    }

    /// Notice text used when a failed response carries no `detail`.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::DetectAiFile => "Upload failed",
            _ => "Analysis failed",
        }
    }
}

/// The single source feeding an AI-detection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiInput {
    Text(String),
    File(PendingFile),
}

impl AiInput {
    /// A staged file wins and the text is ignored entirely; otherwise the
    /// trimmed text must be non-empty.
    pub fn resolve(pending: Option<&PendingFile>, text: &str) -> Result<Self, ValidationError> {
        if let Some(file) = pending {
            return Ok(Self::File(file.clone()));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingDetectionInput);
        }
        Ok(Self::Text(text.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// JSON `{text_a, text_b}`.
    Compare { text_a: String, text_b: String },
    /// JSON `{text}`.
    Text { text: String },
    /// Multipart form with a single `file` field.
    File(PendingFile),
}

/// A validated request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub endpoint: Endpoint,
    pub payload: Payload,
}

impl AnalysisRequest {
    /// Build a plagiarism comparison. Both texts must be non-empty after trimming.
    pub fn comparison(detailed: bool, text_a: &str, text_b: &str) -> Result<Self, ValidationError> {
        let (a, b) = (text_a.trim(), text_b.trim());
        if a.is_empty() || b.is_empty() {
            return Err(ValidationError::MissingComparisonText);
        }
        let endpoint = if detailed {
            Endpoint::AnalyzeDetailed
        } else {
            Endpoint::AnalyzeLocal
        };
        Ok(Self {
            endpoint,
            payload: Payload::Compare {
                text_a: a.to_string(),
                text_b: b.to_string(),
            },
        })
    }

    pub fn detection(input: AiInput) -> Self {
        match input {
            AiInput::Text(text) => Self {
                endpoint: Endpoint::DetectAi,
                payload: Payload::Text { text },
            },
            AiInput::File(file) => Self {
                endpoint: Endpoint::DetectAiFile,
                payload: Payload::File(file),
            },
        }
    }

    pub fn result_kind(&self) -> ResultKind {
        self.endpoint.result_kind()
    }
}
