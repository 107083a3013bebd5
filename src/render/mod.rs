//! Remote markdown-to-HTML rendering.
//!
//! The converter is an external HTTP service. This module holds the client
//! ([`HttpRenderer`]), the seam it sits behind ([`MarkdownRenderer`]), the
//! background dispatcher ([`RenderWorker`]) and the preview state machine
//! ([`RenderState`]).

mod state;
mod worker;

pub use state::{ERROR_MESSAGE, PROCESSING_MESSAGE, RenderState};
pub use worker::{RenderOutcome, RenderWorker};

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3001/api/markdown";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a remote render failed. Every variant shows the same preview text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("render service unreachable: {0}")]
    Network(String),
    #[error("render service returned status {0}")]
    Status(u16),
    #[error("render service response was not valid: {0}")]
    Decode(String),
}

/// Converts a markdown snapshot to HTML.
pub trait MarkdownRenderer: Send + Sync {
    /// # Errors
    /// Returns a [`RenderError`] when the conversion does not produce HTML.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    markdown: &'a str,
}

#[derive(Deserialize)]
struct RenderResponse {
    html: String,
}

/// Request body for a snapshot. An empty document is sent as an empty body.
pub fn request_body(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    serde_json::to_string(&RenderRequest { markdown }).unwrap_or_default()
}

/// Extract the HTML from a success response body.
///
/// # Errors
/// Returns [`RenderError::Decode`] if the body is not `{"html": string}`.
pub fn parse_response(body: &str) -> Result<String, RenderError> {
    serde_json::from_str::<RenderResponse>(body)
        .map(|r| r.html)
        .map_err(|err| RenderError::Decode(err.to_string()))
}

/// Blocking HTTP client for the render service.
pub struct HttpRenderer {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpRenderer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
        }
    }
}

impl std::fmt::Debug for HttpRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRenderer")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl MarkdownRenderer for HttpRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&request_body(markdown));
        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(RenderError::Status(code)),
            Err(err) => return Err(RenderError::Network(err.to_string())),
        };
        let body = response
            .into_string()
            .map_err(|err| RenderError::Network(err.to_string()))?;
        parse_response(&body)
    }
}
