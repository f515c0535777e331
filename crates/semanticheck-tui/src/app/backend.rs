use semanticheck_core::{AnalysisError, AnalysisResult, DispatchResult};

use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::AnalysisFinished { outcome } => self.finish_request(outcome),
        }
    }

    /// Hand the outcome to the session, consuming the in-flight ticket.
    pub(super) fn finish_request(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        let Some(flight) = self.in_flight.take() else {
            tracing::warn!("analysis result arrived with no request in flight");
            return;
        };
        if let DispatchResult::Rendered(_) = self.session.finish(flight, outcome) {
            self.detail_scroll = 0;
        }
    }
}
