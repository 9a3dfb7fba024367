//! LiveProof client implementation.

use crate::config::ClientConfig;
use crate::error::SdkError;
use liveproof_domain::{
    ActionType, ExecuteRequest, ExecutionResult, TopSources, TopicComparison, VerificationSession,
    VerifyRequest, VerifyResponse,
};
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Opaque session record returned by `GET /session/{id}`
pub type SessionRecord = serde_json::Map<String, serde_json::Value>;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Service status (e.g. "ok")
    pub status: String,
    /// Service name
    #[serde(default)]
    pub service: Option<String>,
}

/// LiveProof SDK client
///
/// Each operation is a single request/response round trip: no retry,
/// no caching, no deduplication.
#[derive(Debug, Clone)]
pub struct LiveProofClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl LiveProofClient {
    /// Create a new client from a loaded configuration
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| SdkError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Verify a question and return the resulting session
    pub async fn verify(&self, request: &VerifyRequest) -> Result<VerificationSession, SdkError> {
        let url = self.endpoint(&["verify"])?;
        let response: VerifyResponse = self.send_json(Method::POST, url, Some(request)).await?;
        Ok(VerificationSession::from_response(request, response))
    }

    /// Generate an artifact for a verified session
    pub async fn execute(
        &self,
        session_id: &str,
        action_type: ActionType,
    ) -> Result<ExecutionResult, SdkError> {
        let url = self.endpoint(&["execute"])?;
        let body = ExecuteRequest {
            session_id: session_id.to_string(),
            action_type,
        };
        self.send_json(Method::POST, url, Some(&body)).await
    }

    /// Look up a stored session
    pub async fn get_session(&self, session_id: &str) -> Result<SessionRecord, SdkError> {
        let url = self.endpoint(&["session", session_id])?;
        self.send_json::<(), _>(Method::GET, url, None).await
    }

    /// Compare historical sessions sharing a topic
    pub async fn topic_compare(&self, topic: &str) -> Result<TopicComparison, SdkError> {
        let url = self.endpoint(&["topic", topic, "compare"])?;
        self.send_json::<(), _>(Method::GET, url, None).await
    }

    /// Top cited sources, using the server's default limit
    pub async fn top_sources(&self) -> Result<TopSources, SdkError> {
        let url = self.endpoint(&["sources", "top"])?;
        self.send_json::<(), _>(Method::GET, url, None).await
    }

    /// Top cited sources, limited to `limit` entries
    pub async fn top_sources_limited(&self, limit: usize) -> Result<TopSources, SdkError> {
        let mut url = self.endpoint(&["sources", "top"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.send_json::<(), _>(Method::GET, url, None).await
    }

    /// Service health check
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let url = self.endpoint(&["health"])?;
        self.send_json::<(), _>(Method::GET, url, None).await
    }

    /// Build an endpoint URL; each segment is percent-encoded
    ///
    /// Empty and dot-only segments are refused: URL normalization would
    /// drop them and the request would reach a different endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SdkError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            warn!(segment = %segment, "Refusing unaddressable path segment");
            return Err(SdkError::RequestFailed(format!(
                "Cannot address '{}' as a path segment",
                segment
            )));
        }

        let mut url = self.config.api_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidOrigin(self.config.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, SdkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method = %method, path = %url.path(), "Sending request");

        let mut request = self.http_client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = check_status(&method, &url, response).await?;

        Ok(response.json::<T>().await?)
    }
}

/// Turn a non-success response into `RequestFailed` carrying the raw body
async fn check_status(
    method: &Method,
    url: &Url,
    response: Response,
) -> Result<Response, SdkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error body: {}", e));
    warn!(method = %method, path = %url.path(), status = %status, "Request failed");

    Err(SdkError::RequestFailed(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(origin: &str) -> LiveProofClient {
        LiveProofClient::new(ClientConfig::new(origin).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let c = client("http://localhost:8000");
        assert_eq!(c.endpoint(&["verify"]).unwrap().as_str(), "http://localhost:8000/verify");
        assert_eq!(
            c.endpoint(&["session", "s1"]).unwrap().as_str(),
            "http://localhost:8000/session/s1"
        );
    }

    #[test]
    fn test_topic_is_percent_encoded() {
        let c = client("http://localhost:8000");
        let url = c.endpoint(&["topic", "a b", "compare"]).unwrap();
        assert_eq!(url.path(), "/topic/a%20b/compare");

        let url = c.endpoint(&["topic", "c++/rust?", "compare"]).unwrap();
        assert_eq!(url.path(), "/topic/c++%2Frust%3F/compare");
    }

    #[test]
    fn test_dot_segments_are_refused() {
        let c = client("http://localhost:8000");
        for segment in ["", ".", ".."] {
            let err = c.endpoint(&["topic", segment, "compare"]).unwrap_err();
            assert!(matches!(err, SdkError::RequestFailed(_)), "{:?}", segment);
        }
        // Dots inside a segment are ordinary characters
        assert_eq!(
            c.endpoint(&["topic", "...", "compare"]).unwrap().path(),
            "/topic/.../compare"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("https://example.com/api/");
        assert_eq!(
            c.endpoint(&["sources", "top"]).unwrap().as_str(),
            "https://example.com/api/sources/top"
        );
    }

    #[test]
    fn test_health_parsing() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "ok", "service": "liveproof-api"}"#).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.service.as_deref(), Some("liveproof-api"));
    }
}
