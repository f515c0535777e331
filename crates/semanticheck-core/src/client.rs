//! HTTP boundary to the analysis service.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::request::{AnalysisRequest, Payload};
use crate::{AiDetectionResult, AnalysisError, AnalysisResult, PlagiarismResult, ResultKind};

/// Default service location (the FastAPI dev server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Something that can execute a validated analysis request.
pub trait AnalysisApi: Send + Sync {
    fn analyze<'a>(
        &'a self,
        request: &'a AnalysisRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>>;
}

#[derive(Serialize)]
struct CompareBody<'a> {
    text_a: &'a str,
    text_b: &'a str,
}

#[derive(Serialize)]
struct DetectBody<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// reqwest-backed client. No request timeout is applied.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &AnalysisRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint.path())
    }

    async fn send(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let url = self.url_for(request);
        let fallback = request.endpoint.failure_message();

        let builder = self.client.post(&url);
        let builder = match &request.payload {
            Payload::Compare { text_a, text_b } => builder.json(&CompareBody { text_a, text_b }),
            Payload::Text { text } => builder.json(&DetectBody { text }),
            Payload::File(file) => {
                let bytes = file.read().await.map_err(|e| {
                    tracing::warn!(path = %file.path().display(), error = %e, "failed to read upload");
                    AnalysisError::Transport {
                        status: None,
                        message: format!("{fallback}: {e}"),
                    }
                })?;
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file.name().to_string())
                    .mime_str(file.extension().mime_type())
                    .map_err(|e| AnalysisError::Transport {
                        status: None,
                        message: format!("{fallback}: {e}"),
                    })?;
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        let resp = builder.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "request failed");
            AnalysisError::Transport {
                status: None,
                message: fallback.to_string(),
            }
        })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to read response body");
            AnalysisError::Transport {
                status: Some(status.as_u16()),
                message: fallback.to_string(),
            }
        })?;

        if !status.is_success() {
            let message = error_detail(&body).unwrap_or_else(|| fallback.to_string());
            tracing::warn!(url = %url, status = status.as_u16(), %message, "analysis rejected");
            return Err(AnalysisError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        parse_result(request.result_kind(), &body)
    }
}

impl AnalysisApi for HttpAnalysisClient {
    fn analyze<'a>(
        &'a self,
        request: &'a AnalysisRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}

/// Extract the `detail` string from an error body. Non-string or empty
/// details are ignored so the generic message is used instead.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Parse a success body for `kind`. Missing or mistyped fields fail closed.
pub fn parse_result(kind: ResultKind, body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    let parsed = match kind {
        ResultKind::Plagiarism => {
            serde_json::from_slice::<PlagiarismResult>(body).map(AnalysisResult::Plagiarism)
        }
        ResultKind::AiDetection => {
            serde_json::from_slice::<AiDetectionResult>(body).map(AnalysisResult::AiDetection)
        }
    };
    parsed.map_err(|e| {
        tracing::warn!(error = %e, "malformed analysis response");
        AnalysisError::Protocol(e.to_string())
    })
}
