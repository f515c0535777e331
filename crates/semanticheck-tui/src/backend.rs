use std::sync::Arc;

use tokio::sync::mpsc;

use semanticheck_core::{AnalysisApi, AnalysisError, AnalysisRequest, AnalysisResult};

use crate::tui_event::BackendEvent;

/// Guarantees the TUI hears back about a request exactly once.
///
/// If the task ends without calling [`finish`](Self::finish) (panic, runtime
/// shutdown), dropping the guard reports a generic failure instead, so the
/// app never stays busy.
struct CompletionGuard {
    tx: Option<mpsc::UnboundedSender<BackendEvent>>,
    fallback: &'static str,
}

impl CompletionGuard {
    fn new(tx: mpsc::UnboundedSender<BackendEvent>, request: &AnalysisRequest) -> Self {
        Self {
            tx: Some(tx),
            fallback: request.endpoint.failure_message(),
        }
    }

    fn finish(mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(BackendEvent::AnalysisFinished { outcome });
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tracing::warn!("analysis task ended without a result");
            let _ = tx.send(BackendEvent::AnalysisFinished {
                outcome: Err(AnalysisError::Transport {
                    status: None,
                    message: self.fallback.to_string(),
                }),
            });
        }
    }
}

/// Run one analysis request and report the outcome on `tx`.
pub async fn run_analysis(
    api: Arc<dyn AnalysisApi>,
    request: AnalysisRequest,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    let guard = CompletionGuard::new(tx, &request);
    tracing::info!(endpoint = request.endpoint.path(), "sending analysis request");
    let outcome = api.analyze(&request).await;
    guard.finish(outcome);
}
