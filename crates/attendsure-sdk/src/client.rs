//! AttendSure HTTP client implementation.

use crate::error::SdkError;
use async_trait::async_trait;
use attendsure_domain::traits::{CallLauncher, CallStatusSource};
use attendsure_domain::{CallDetail, CallId, LaunchRequest, LaunchResponse};
use reqwest::{Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// AttendSure backend client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AttendSureClient {
    api_base: String,
    http: reqwest::Client,
}

impl AttendSureClient {
    /// Create a client for the backend at `api_base` with the default timeout
    pub fn new(api_base: &str) -> Result<Self, SdkError> {
        Self::with_timeout(api_base, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(api_base: &str, timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL requests are sent to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch a call with its patient and stored provider output
    pub async fn get_call_detail(&self, call_id: CallId) -> Result<CallDetail, SdkError> {
        let url = format!("{}/api/calls/{}", self.api_base, call_id);
        debug!(%call_id, "GET {}", url);

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SdkError::NotFound(call_id));
        }

        let detail: CallDetail = ensure_success(response).await?.json().await?;
        Ok(detail)
    }

    /// Create call records for the given patients and queue the calls
    pub async fn launch_calls(&self, request: &LaunchRequest) -> Result<LaunchResponse, SdkError> {
        if request.patient_ids.is_empty() {
            return Err(SdkError::InvalidRequest(
                "at least one patient id is required".to_string(),
            ));
        }

        let url = format!("{}/api/calls/launch", self.api_base);
        debug!(patients = request.patient_ids.len(), "POST {}", url);

        let response = self.http.post(&url).json(request).send().await?;
        let launched: LaunchResponse = ensure_success(response).await?.json().await?;
        Ok(launched)
    }
}

/// Turn a non-success response into an [`SdkError::ApiError`] carrying the body
async fn ensure_success(response: Response) -> Result<Response, SdkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        body
    };

    Err(SdkError::ApiError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CallStatusSource for AttendSureClient {
    type Error = SdkError;

    async fn fetch_call(&self, call_id: CallId) -> Result<CallDetail, Self::Error> {
        self.get_call_detail(call_id).await
    }
}

#[async_trait]
impl CallLauncher for AttendSureClient {
    type Error = SdkError;

    async fn launch_calls(&self, request: LaunchRequest) -> Result<LaunchResponse, Self::Error> {
        AttendSureClient::launch_calls(self, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = AttendSureClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.api_base(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_empty_launch_is_rejected_locally() {
        // Nothing listens here; the request must never be sent
        let client = AttendSureClient::new("http://127.0.0.1:1").unwrap();
        let result = client.launch_calls(&LaunchRequest::now(vec![])).await;
        assert!(matches!(result, Err(SdkError::InvalidRequest(_))));
    }
}
