//! The single owned UI state object.
//!
//! Every transition (mode switch, file selection, request start/finish) is a
//! method on [`Session`]; frontends only read derived state from it.

use crate::file::{FileCandidate, FileSelection, PendingFile};
use crate::render::{ViewState, render};
use crate::request::Trigger;
use crate::{AnalysisResult, Mode, Notice, ValidationError};

/// Visibility and enablement of one trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub visible: bool,
    pub enabled: bool,
}

impl Control {
    /// A control can be activated only when shown and not disabled.
    pub fn is_actionable(self) -> bool {
        self.visible && self.enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub quick_check: Control,
    pub detailed_check: Control,
    pub detect_ai: Control,
}

impl Controls {
    pub fn get(&self, trigger: Trigger) -> Control {
        match trigger {
            Trigger::QuickCheck => self.quick_check,
            Trigger::DetailedCheck => self.detailed_check,
            Trigger::DetectAi => self.detect_ai,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: Mode,
    pub text_a: String,
    pub text_b: String,
    /// Free-text AI input. Ignored while a file is pending.
    pub ai_text: String,
    files: FileSelection,
    pub(crate) busy: bool,
    /// Set while the results region is hidden for an in-flight request.
    pub(crate) results_hidden: bool,
    pub(crate) result: Option<AnalysisResult>,
    pub(crate) notice: Option<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode: swaps the visible input region and trigger set and
    /// clears any displayed result.
    pub fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(?mode, "mode switched");
        self.mode = mode;
        self.result = None;
    }

    /// Whether the input region for `mode` is visible.
    pub fn inputs_visible(&self, mode: Mode) -> bool {
        self.mode == mode
    }

    pub fn controls(&self) -> Controls {
        let control = |trigger: Trigger| Control {
            visible: trigger.mode() == self.mode,
            enabled: !self.busy,
        };
        Controls {
            quick_check: control(Trigger::QuickCheck),
            detailed_check: control(Trigger::DetailedCheck),
            detect_ai: control(Trigger::DetectAi),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    // ── File selection ──────────────────────────────────────────────

    /// Stage a file for AI detection. A rejected candidate raises a notice
    /// and leaves the current selection as it was.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<(), ValidationError> {
        match self.files.select(candidate) {
            Ok(_) => Ok(()),
            Err(e) => {
                self.notice = Some(Notice::from(&e));
                Err(e)
            }
        }
    }

    pub fn clear_file(&mut self) {
        self.files.clear();
    }

    pub fn pending_file(&self) -> Option<&PendingFile> {
        self.files.pending()
    }

    pub fn file_badge(&self) -> Option<&str> {
        self.files.badge()
    }

    pub fn ai_text_enabled(&self) -> bool {
        self.files.text_input_enabled()
    }

    // ── Results and notices ─────────────────────────────────────────

    /// The latest result, if it is currently displayed.
    pub fn result(&self) -> Option<&AnalysisResult> {
        if self.results_hidden {
            None
        } else {
            self.result.as_ref()
        }
    }

    /// View state derived from the displayed result.
    pub fn view(&self) -> Option<ViewState> {
        self.result().map(render)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
