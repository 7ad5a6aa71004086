use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::WebAppConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Server error: {status}")]
    Status { status: u16 },
    #[error("Invalid server response: {0}")]
    MalformedResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl TransportError {
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::MalformedResponse(_) | Self::Network(_) | Self::Encode(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// One JSON POST exchange. Implementations report only network-level
/// failures; status handling belongs to [`SubmissionClient`].
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError>;
}

/// Request the router is about to send, kept for diagnostics and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub endpoint_path: String,
    pub payload: Value,
}

#[derive(Clone)]
pub struct SubmissionClient {
    transport: Rc<dyn HttpTransport>,
    base_url: Option<String>,
}

impl SubmissionClient {
    pub fn new(transport: Rc<dyn HttpTransport>, config: &WebAppConfig) -> Self {
        Self {
            transport,
            base_url: config.api_base_url.clone(),
        }
    }

    #[must_use]
    pub fn endpoint_url(&self, endpoint_path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/{}", endpoint_path.trim_start_matches('/')),
            None => endpoint_path.to_string(),
        }
    }

    /// No retry and no timeout; the caller sees every failure.
    pub async fn post(&self, request: &SubmissionRequest) -> Result<Value, TransportError> {
        let body = serde_json::to_string(&request.payload)
            .map_err(|error| TransportError::Encode(error.to_string()))?;
        let url = self.endpoint_url(&request.endpoint_path);
        let response = self.transport.post_json(&url, body).await?;
        decode_json_response(response)
    }
}

pub fn decode_json_response(response: HttpResponse) -> Result<Value, TransportError> {
    if !(200..=299).contains(&response.status) {
        return Err(TransportError::Status {
            status: response.status,
        });
    }
    serde_json::from_str(&response.body)
        .map_err(|error| TransportError::MalformedResponse(error.to_string()))
}
