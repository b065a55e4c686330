//! Circuit backend boundary.
//!
//! The editor never talks to the network itself: it hands an
//! [`ExportPayload`] to a [`Backend`] and gets circuit bytes back, or asks for
//! a named [`Template`] to tile. [`HttpBackend`] is the production
//! implementation; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use canvas::error::ErrorCode;
use canvas::export::{ExportPayload, Template};
use tracing::{info, warn};

use crate::config::{BackendTimeouts, StudioConfig};

pub const CIRCUIT_PATH: &str = "/plaquettes/circuit";
pub const TEMPLATES_PATH: &str = "/templates";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP client build error: {0}")]
    HttpClientBuild(String),
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend returned {status}: {body}")]
    Response { status: u16, body: String },
    #[error("backend response parse error: {0}")]
    Parse(String),
    #[error("invalid template name: '{0}'")]
    InvalidTemplateName(String),
}

impl ErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_BACKEND_REQUEST",
            Self::Response { .. } => "E_BACKEND_RESPONSE",
            Self::Parse(_) => "E_BACKEND_PARSE",
            Self::InvalidTemplateName(_) => "E_INVALID_TEMPLATE_NAME",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait]
pub trait Backend: Send + Sync {
    /// Convert plaquettes into circuit file bytes.
    async fn export_circuit(&self, payload: &ExportPayload) -> Result<Vec<u8>, BackendError>;

    /// Fetch a tiling template by name.
    async fn fetch_template(&self, name: &str) -> Result<Template, BackendError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// `HttpClientBuild` if the underlying client cannot be constructed.
    pub fn new(base_url: &str, timeouts: BackendTimeouts) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// # Errors
    ///
    /// `HttpClientBuild` if the underlying client cannot be constructed.
    pub fn from_config(config: &StudioConfig) -> Result<Self, BackendError> {
        Self::new(&config.backend_url, config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn export_circuit(&self, payload: &ExportPayload) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}{CIRCUIT_PATH}", self.base_url);
        info!(%url, plaquettes = payload.plaquettes.len(), "backend: export circuit");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| request_failed(&url, &e))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.map_err(|e| request_failed(&url, &e))?;
            warn!(%url, status, "backend: export rejected");
            return Err(BackendError::Response { status, body });
        }

        let bytes = response.bytes().await.map_err(|e| request_failed(&url, &e))?;
        info!(%url, bytes = bytes.len(), "backend: circuit received");
        Ok(bytes.to_vec())
    }

    async fn fetch_template(&self, name: &str) -> Result<Template, BackendError> {
        validate_template_name(name)?;
        let url = format!("{}{TEMPLATES_PATH}/{name}", self.base_url);
        info!(%url, template = name, "backend: fetch template");

        let response = self.http.get(&url).send().await.map_err(|e| request_failed(&url, &e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| request_failed(&url, &e))?;

        if status != 200 {
            warn!(%url, status, "backend: template fetch rejected");
            return Err(BackendError::Response { status, body: text });
        }

        parse_template(&text)
    }
}

fn request_failed(url: &str, err: &reqwest::Error) -> BackendError {
    warn!(%url, error = %err, "backend: request failed");
    BackendError::Request(err.to_string())
}

// =============================================================================
// PARSING
// =============================================================================

/// Template names become a single URL path segment.
fn validate_template_name(name: &str) -> Result<(), BackendError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && name != "."
        && name != "..";
    if ok { Ok(()) } else { Err(BackendError::InvalidTemplateName(name.to_string())) }
}

fn parse_template(json: &str) -> Result<Template, BackendError> {
    let template: Template = serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))?;
    template.validate().map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok(template)
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
