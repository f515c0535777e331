//! Mock analysis service for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::client::AnalysisApi;
use crate::request::AnalysisRequest;
use crate::{AnalysisError, AnalysisResult};

/// A hand-rolled mock implementing [`AnalysisApi`].
///
/// Returns responses in order, repeating the last one once the sequence is
/// exhausted. Every request it receives is recorded.
pub struct MockApi {
    responses: Mutex<Vec<Result<AnalysisResult, AnalysisError>>>,
    fallback: Result<AnalysisResult, AnalysisError>,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl MockApi {
    /// Create a mock that always returns `response`.
    pub fn new(response: Result<AnalysisResult, AnalysisError>) -> Self {
        Self::with_sequence(vec![response])
    }

    /// Create a mock that returns responses in order, repeating the last one.
    ///
    /// # Panics
    /// If `responses` is empty.
    pub fn with_sequence(mut responses: Vec<Result<AnalysisResult, AnalysisError>>) -> Self {
        responses.reverse();
        let fallback = match responses.first() {
            Some(last) => last.clone(),
            None => panic!("sequence must have at least one response"),
        };
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `analyze()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn next_response(&self) -> Result<AnalysisResult, AnalysisError> {
        let popped = self.responses.lock().ok().and_then(|mut seq| seq.pop());
        popped.unwrap_or_else(|| self.fallback.clone())
    }
}

impl AnalysisApi for MockApi {
    fn analyze<'a>(
        &'a self,
        request: &'a AnalysisRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            response
        })
    }
}
