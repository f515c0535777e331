use semanticheck_core::{AnalysisError, AnalysisRequest, AnalysisResult};

/// Commands sent from the TUI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Send one validated request to the analysis service.
    Analyze { request: AnalysisRequest },
}

/// Events flowing from the backend task to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// The in-flight request finished. Sent exactly once per `Analyze`.
    AnalysisFinished {
        outcome: Result<AnalysisResult, AnalysisError>,
    },
}
