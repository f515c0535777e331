//! Response-to-view mapping.
//!
//! [`render`] is a pure function of the result: the view is always rebuilt
//! from scratch and never merged with a previous one.

use crate::markdown::RichText;
use crate::{AiDetectionResult, AnalysisResult, PlagiarismResult, RiskLevel, Verdict};

/// Color class applied to the risk level / verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn tone(&self) -> Option<Tone> {
        match self {
            Self::Low => Some(Tone::Low),
            Self::Medium => Some(Tone::Medium),
            Self::High => Some(Tone::High),
            Self::Unrecognized(_) => None,
        }
    }
}

impl Verdict {
    pub fn tone(&self) -> Option<Tone> {
        match self {
            Self::LikelyHuman => Some(Tone::Low),
            Self::Mixed => Some(Tone::Medium),
            Self::LikelyAi => Some(Tone::High),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Which result panel is shown; the other one is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Plagiarism,
    AiDetection,
}

/// Content of the expanded detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    /// Detailed analysis parsed from markdown.
    Analysis(RichText),
    /// The single "Reasoning: ..." line, plain text.
    Reasoning(String),
}

impl Detail {
    pub fn rich_text(&self) -> RichText {
        match self {
            Self::Analysis(rt) => rt.clone(),
            Self::Reasoning(line) => RichText::plain(line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub panel: Panel,
    /// Percentage, e.g. `87%`.
    pub headline: String,
    /// Risk level or verdict, verbatim.
    pub label: String,
    pub tone: Option<Tone>,
    /// `None` means the detail panel is collapsed.
    pub detail: Option<Detail>,
    pub footnote: Option<String>,
}

impl ViewState {
    pub fn detail_expanded(&self) -> bool {
        self.detail.is_some()
    }

    pub fn headline_caption(&self) -> &'static str {
        match self.panel {
            Panel::Plagiarism => "Similarity Score",
            Panel::AiDetection => "AI Probability",
        }
    }

    pub fn label_caption(&self) -> &'static str {
        match self.panel {
            Panel::Plagiarism => "Risk Level",
            Panel::AiDetection => "Verdict",
        }
    }
}

pub fn render(result: &AnalysisResult) -> ViewState {
    match result {
        AnalysisResult::Plagiarism(data) => render_plagiarism(data),
        AnalysisResult::AiDetection(data) => render_ai_detection(data),
    }
}

/// `round(score * 100)` as a whole number.
pub fn similarity_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

fn render_plagiarism(data: &PlagiarismResult) -> ViewState {
    let detail = data
        .detailed_analysis
        .as_deref()
        .filter(|md| !md.is_empty())
        .map(|md| Detail::Analysis(RichText::from_markdown(md)));
    ViewState {
        panel: Panel::Plagiarism,
        headline: format!("{}%", similarity_percent(data.similarity_score)),
        label: data.risk_level.to_string(),
        tone: data.risk_level.tone(),
        detail,
        footnote: data.message.clone().filter(|m| !m.is_empty()),
    }
}

fn render_ai_detection(data: &AiDetectionResult) -> ViewState {
    let detail = data
        .reasoning
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(|r| Detail::Reasoning(format!("Reasoning: {r}")));
    ViewState {
        panel: Panel::AiDetection,
        headline: format!("{}%", data.ai_probability),
        label: data.verdict.to_string(),
        tone: data.verdict.tone(),
        detail,
        footnote: None,
    }
}
