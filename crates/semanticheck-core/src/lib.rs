use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub mod client;
pub mod config_file;
pub mod dispatch;
pub mod dropzone;
pub mod file;
pub mod markdown;
pub mod mock;
pub mod render;
pub mod request;
pub mod session;

// Re-export for convenience
pub use client::{AnalysisApi, HttpAnalysisClient};
pub use dispatch::{Begin, DispatchResult, InFlight, dispatch};
pub use dropzone::{DragEvent, DropResponse, DropZone};
pub use file::{FileCandidate, FileExtension, FileSelection, PendingFile};
pub use render::{Detail, Panel, Tone, ViewState, render};
pub use request::{AiInput, AnalysisRequest, Endpoint, Payload, Trigger};
pub use session::{Control, Controls, Session};

/// The active analysis capability. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Plagiarism,
    AiDetection,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Plagiarism => "Plagiarism Check",
            Self::AiDetection => "AI Detection",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Plagiarism => Self::AiDetection,
            Self::AiDetection => Self::Plagiarism,
        }
    }
}

/// Which result panel a response is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Plagiarism,
    AiDetection,
}

/// Backend-assigned plagiarism risk. Unknown strings are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            _ => Self::Unrecognized(s),
        }
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-assigned AI-detection verdict. Unknown strings are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Verdict {
    LikelyHuman,
    Mixed,
    LikelyAi,
    Unrecognized(String),
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Likely Human" => Self::LikelyHuman,
            "Mixed" => Self::Mixed,
            "Likely AI" => Self::LikelyAi,
            _ => Self::Unrecognized(s),
        }
    }
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LikelyHuman => "Likely Human",
            Self::Mixed => "Mixed",
            Self::LikelyAi => "Likely AI",
            Self::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `/analyze/local` and `/analyze/detailed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlagiarismResult {
    /// Cosine similarity in `[0, 1]`.
    pub similarity_score: f64,
    pub risk_level: RiskLevel,
    /// Markdown produced by the detailed (LLM) analysis.
    #[serde(default)]
    pub detailed_analysis: Option<String>,
    /// Status line sent by the local analysis endpoint.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `/detect-ai` and `/detect-ai/file`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiDetectionResult {
    /// Integer percentage, displayed as-is.
    pub ai_probability: i64,
    pub verdict: Verdict,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// A successfully parsed analysis response.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Plagiarism(PlagiarismResult),
    AiDetection(AiDetectionResult),
}

impl AnalysisResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Plagiarism(_) => ResultKind::Plagiarism,
            Self::AiDetection(_) => ResultKind::AiDetection,
        }
    }
}

/// Input problems caught locally, before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter both texts.")]
    MissingComparisonText,
    #[error("Please enter text or upload a file.")]
    MissingDetectionInput,
    #[error("Only .txt and .docx files are supported.")]
    InvalidFileType { name: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Non-success status, network failure, or an unreadable upload.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },
    /// A success response that does not match the endpoint contract.
    #[error("Unexpected response from server: {0}")]
    Protocol(String),
}

impl AnalysisError {
    /// HTTP status of a rejected request, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Validation(_) | Self::Protocol(_) => None,
        }
    }
}

/// A blocking, user-visible message. Every error kind becomes one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&AnalysisError> for Notice {
    fn from(err: &AnalysisError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_known_and_unknown() {
        let low: RiskLevel = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(low, RiskLevel::Low);
        let odd: RiskLevel = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(odd, RiskLevel::Unrecognized("low".into()));
        assert_eq!(odd.to_string(), "low");
    }

    #[test]
    fn verdict_round_trips_display_text() {
        for text in ["Likely Human", "Mixed", "Likely AI", "Unsure"] {
            let v = Verdict::from(text.to_string());
            assert_eq!(v.as_str(), text);
        }
        assert_eq!(Verdict::from("Likely AI".to_string()), Verdict::LikelyAi);
    }

    #[test]
    fn notice_uses_server_detail_verbatim() {
        let err = AnalysisError::Transport {
            status: Some(400),
            message: "Text too short".into(),
        };
        assert_eq!(Notice::from(&err).message, "Text too short");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn status_only_for_answered_transport_failures() {
        let refused = AnalysisError::Transport {
            status: None,
            message: "Analysis failed".into(),
        };
        assert_eq!(refused.status(), None);
        assert_eq!(AnalysisError::Protocol("missing field".into()).status(), None);
        let err = AnalysisError::from(ValidationError::MissingDetectionInput);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn validation_notice_text() {
        let err = AnalysisError::from(ValidationError::MissingComparisonText);
        assert_eq!(Notice::from(&err).message, "Please enter both texts.");
    }

    #[test]
    fn mode_toggle() {
        assert_eq!(Mode::Plagiarism.toggled(), Mode::AiDetection);
        assert_eq!(Mode::AiDetection.toggled(), Mode::Plagiarism);
    }
}
