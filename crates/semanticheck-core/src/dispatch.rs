//! Request lifecycle: validate, mark busy, send, finalize.
//!
//! A request is started with [`Session::begin`], which hands back an
//! [`InFlight`] ticket, and completed with [`Session::finish`], which consumes
//! it. The busy flag is cleared and the results region restored by a drop
//! guard, so that step runs exactly once whether the request succeeded,
//! failed, or the awaiting future was dropped.

use crate::client::AnalysisApi;
use crate::render::{ViewState, render};
use crate::request::{AiInput, AnalysisRequest, Trigger};
use crate::session::Session;
use crate::{AnalysisError, AnalysisResult, Notice, ValidationError};

/// Proof that a request was started. Not `Clone`: it can be finished once.
#[derive(Debug)]
pub struct InFlight {
    request: AnalysisRequest,
}

impl InFlight {
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

#[derive(Debug)]
pub enum Begin {
    /// The trigger is hidden or disabled; nothing happened.
    Ignored,
    /// Local validation failed; a notice was raised and no request started.
    Rejected(Notice),
    Started(InFlight),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Ignored,
    Rejected(Notice),
    Rendered(ViewState),
    Failed(Notice),
}

impl Session {
    /// Validate the input behind `trigger` and, if valid, enter the busy state.
    pub fn begin(&mut self, trigger: Trigger) -> Begin {
        if !self.controls().get(trigger).is_actionable() {
            tracing::debug!(?trigger, busy = self.busy, "trigger not actionable");
            return Begin::Ignored;
        }

        let request = match self.build_request(trigger) {
            Ok(request) => request,
            Err(e) => {
                let notice = Notice::from(&e);
                self.notice = Some(notice.clone());
                return Begin::Rejected(notice);
            }
        };

        self.busy = true;
        self.results_hidden = true;
        tracing::debug!(endpoint = request.endpoint.path(), "analysis request started");
        Begin::Started(InFlight { request })
    }

    /// Apply the outcome of a started request and leave the busy state.
    pub fn finish(
        &mut self,
        flight: InFlight,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> DispatchResult {
        RequestScope {
            session: self,
            flight,
        }
        .complete(outcome)
    }

    fn build_request(&self, trigger: Trigger) -> Result<AnalysisRequest, ValidationError> {
        match trigger {
            Trigger::QuickCheck => AnalysisRequest::comparison(false, &self.text_a, &self.text_b),
            Trigger::DetailedCheck => AnalysisRequest::comparison(true, &self.text_a, &self.text_b),
            Trigger::DetectAi => {
                AiInput::resolve(self.pending_file(), &self.ai_text).map(AnalysisRequest::detection)
            }
        }
    }

    fn end_request(&mut self) {
        self.busy = false;
        self.results_hidden = false;
        tracing::debug!("analysis request finished");
    }
}

/// Scoped finalization for one request. Dropping it ends the request.
struct RequestScope<'a> {
    session: &'a mut Session,
    flight: InFlight,
}

impl RequestScope<'_> {
    fn complete(self, outcome: Result<AnalysisResult, AnalysisError>) -> DispatchResult {
        let endpoint = self.flight.request.endpoint.path();
        match outcome {
            Ok(result) => {
                let view = render(&result);
                tracing::info!(endpoint, headline = %view.headline, label = %view.label, "analysis complete");
                self.session.result = Some(result);
                DispatchResult::Rendered(view)
            }
            Err(e) => {
                tracing::warn!(endpoint, status = ?e.status(), error = %e, "analysis failed");
                let notice = Notice::from(&e);
                self.session.notice = Some(notice.clone());
                DispatchResult::Failed(notice)
            }
        }
    }
}

impl Drop for RequestScope<'_> {
    fn drop(&mut self) {
        self.session.end_request();
    }
}

/// Run one trigger end to end against `api`.
///
/// Issues at most one call. If the returned future is dropped while the call
/// is pending, the session still leaves the busy state.
pub async fn dispatch<A>(session: &mut Session, api: &A, trigger: Trigger) -> DispatchResult
where
    A: AnalysisApi + ?Sized,
{
    let flight = match session.begin(trigger) {
        Begin::Started(flight) => flight,
        Begin::Ignored => return DispatchResult::Ignored,
        Begin::Rejected(notice) => return DispatchResult::Rejected(notice),
    };
    let scope = RequestScope { session, flight };
    let outcome = api.analyze(&scope.flight.request).await;
    scope.complete(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileCandidate;
    use crate::request::Endpoint;
    use crate::{Mode, PlagiarismResult, RiskLevel};

    fn plag_result(score: f64) -> AnalysisResult {
        AnalysisResult::Plagiarism(PlagiarismResult {
            similarity_score: score,
            risk_level: RiskLevel::Low,
            detailed_analysis: None,
            message: None,
        })
    }

    fn filled() -> Session {
        let mut s = Session::new();
        s.text_a = "first text".into();
        s.text_b = "second text".into();
        s
    }

    #[test]
    fn begin_sets_busy_and_hides_results() {
        let mut s = filled();
        s.result = Some(plag_result(0.1));
        let Begin::Started(flight) = s.begin(Trigger::QuickCheck) else {
            panic!("expected start");
        };
        assert!(s.is_busy());
        assert!(s.view().is_none());
        assert_eq!(flight.request().endpoint, Endpoint::AnalyzeLocal);
    }

    #[test]
    fn second_trigger_while_busy_is_ignored() {
        let mut s = filled();
        let Begin::Started(_flight) = s.begin(Trigger::DetailedCheck) else {
            panic!("expected start");
        };
        assert!(matches!(s.begin(Trigger::QuickCheck), Begin::Ignored));
        assert!(matches!(s.begin(Trigger::DetailedCheck), Begin::Ignored));
        assert!(s.notice().is_none());
    }

    #[test]
    fn hidden_trigger_is_ignored() {
        let mut s = filled();
        assert!(matches!(s.begin(Trigger::DetectAi), Begin::Ignored));
        s.set_mode(Mode::AiDetection);
        assert!(matches!(s.begin(Trigger::QuickCheck), Begin::Ignored));
    }

    #[test]
    fn validation_rejection_never_sets_busy() {
        let mut s = Session::new();
        s.text_b = "hello".into();
        let Begin::Rejected(notice) = s.begin(Trigger::QuickCheck) else {
            panic!("expected rejection");
        };
        assert_eq!(notice.message, "Please enter both texts.");
        assert!(!s.is_busy());
        assert_eq!(s.notice(), Some(&notice));
    }

    #[test]
    fn finish_success_renders_and_clears_busy() {
        let mut s = filled();
        let Begin::Started(flight) = s.begin(Trigger::QuickCheck) else {
            panic!("expected start");
        };
        let result = s.finish(flight, Ok(plag_result(0.873)));
        let DispatchResult::Rendered(view) = result else {
            panic!("expected render");
        };
        assert_eq!(view.headline, "87%");
        assert!(!s.is_busy());
        assert_eq!(s.view(), Some(view));
        assert!(s.controls().quick_check.enabled);
    }

    #[test]
    fn finish_failure_keeps_prior_result() {
        let mut s = filled();
        s.result = Some(plag_result(0.3));
        let before = s.view();
        let Begin::Started(flight) = s.begin(Trigger::QuickCheck) else {
            panic!("expected start");
        };
        let result = s.finish(
            flight,
            Err(AnalysisError::Transport {
                status: Some(400),
                message: "Text too short".into(),
            }),
        );
        assert_eq!(result, DispatchResult::Failed(Notice::new("Text too short")));
        assert!(!s.is_busy());
        assert_eq!(s.view(), before);
        assert_eq!(s.notice().map(|n| n.message.as_str()), Some("Text too short"));
    }

    #[test]
    fn detect_ai_uses_file_when_pending() {
        let mut s = Session::new();
        s.set_mode(Mode::AiDetection);
        s.ai_text = "ignored".into();
        s.select_file(FileCandidate::new("essay.docx", "/tmp/essay.docx"))
            .unwrap();
        let Begin::Started(flight) = s.begin(Trigger::DetectAi) else {
            panic!("expected start");
        };
        assert_eq!(flight.request().endpoint, Endpoint::DetectAiFile);
        // The dispatcher never clears the pending file.
        s.finish(flight, Err(AnalysisError::Protocol("x".into())));
        assert_eq!(s.file_badge(), Some("essay.docx"));
    }

    #[test]
    fn detect_ai_requires_text_or_file() {
        let mut s = Session::new();
        s.set_mode(Mode::AiDetection);
        s.ai_text = "   ".into();
        let Begin::Rejected(notice) = s.begin(Trigger::DetectAi) else {
            panic!("expected rejection");
        };
        assert_eq!(notice.message, "Please enter text or upload a file.");
    }
}
