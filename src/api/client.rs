use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::models::{ErrorBody, HealthResponse, SummaryResponse, TranscriptResponse};
use crate::api::{ApiError, TranscriptEntry};
use crate::config::Settings;

/// HTTP client for the three TubeNotes backend endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base = settings
            .backend
            .url
            .trim()
            .trim_end_matches('/')
            .to_string();

        Url::parse(&base).with_context(|| format!("Invalid backend URL: {}", base))?;

        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(settings.backend.timeout_secs))
                .build()
                .context("Failed to build backend HTTP client")?,
            base,
        })
    }

    fn health_url(&self) -> String {
        format!("{}/api/", self.base)
    }

    fn transcript_url(&self, video_id: &str) -> String {
        format!(
            "{}/api/api/transcript?video_id={}",
            self.base,
            urlencoding::encode(video_id)
        )
    }

    fn summarize_url(&self, video_id: &str) -> String {
        format!(
            "{}/api/api/summarize?video_id={}",
            self.base,
            urlencoding::encode(video_id)
        )
    }

    /// Probe the backend and return its status message.
    pub async fn health(&self) -> Result<String, ApiError> {
        let body = self.get(self.health_url()).await?;
        let payload: HealthResponse = parse_body("health", &body)?;
        Ok(payload.message)
    }

    /// Fetch the transcript for a video.
    ///
    /// A success body whose `transcript` field is not a sequence of entries
    /// is a shape error, not a transport error.
    pub async fn transcript(&self, video_id: &str) -> Result<Vec<TranscriptEntry>, ApiError> {
        let body = self.get(self.transcript_url(video_id)).await?;
        let payload: TranscriptResponse = parse_body("transcript", &body)?;
        Ok(payload.transcript)
    }

    /// Request AI-generated notes for a video.
    pub async fn summarize(&self, video_id: &str) -> Result<String, ApiError> {
        let body = self.get(self.summarize_url(video_id)).await?;
        let payload: SummaryResponse = parse_body("summary", &body)?;
        Ok(payload.summary)
    }

    /// Issue a GET request and return the raw success body.
    ///
    /// Non-success statuses map to [`ApiError::Backend`], carrying the
    /// backend's `detail` field when the error body provides one.
    async fn get(&self, url: String) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Backend {
                status,
                detail: error_detail(status, &body),
            });
        }

        Ok(body.to_vec())
    }
}

fn parse_body<T: DeserializeOwned>(what: &'static str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Shape { what, source })
}

/// Extract the backend's error detail, falling back to the status line when
/// the body is not a `{ "detail": ... }` document.
fn error_detail(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::from_settings(&Settings::default()).expect("default settings should build")
    }

    #[test]
    fn transcript_url_targets_backend_route() {
        let client = test_client();
        assert_eq!(
            client.transcript_url("abc123"),
            "http://localhost:8000/api/api/transcript?video_id=abc123"
        );
    }

    #[test]
    fn video_id_is_percent_encoded() {
        let client = test_client();
        assert_eq!(
            client.transcript_url("abc 123"),
            "http://localhost:8000/api/api/transcript?video_id=abc%20123"
        );
        assert_eq!(
            client.summarize_url("a&b=c"),
            "http://localhost:8000/api/api/summarize?video_id=a%26b%3Dc"
        );
    }

    #[test]
    fn health_url_has_trailing_slash() {
        let client = test_client();
        assert_eq!(client.health_url(), "http://localhost:8000/api/");
    }

    #[test]
    fn transcript_body_decodes_sequence() {
        let payload: TranscriptResponse = parse_body(
            "transcript",
            br#"{"transcript": [{"start": 1.9, "text": "hi"}]}"#,
        )
        .expect("sequence body should decode");
        assert_eq!(payload.transcript.len(), 1);
        assert_eq!(payload.transcript[0].text, "hi");
    }

    #[test]
    fn transcript_object_is_shape_error() {
        let result: Result<TranscriptResponse, ApiError> = parse_body(
            "transcript",
            br#"{"transcript": {"start": 1.9, "text": "hi"}}"#,
        );
        match result {
            Err(ApiError::Shape { what, .. }) => assert_eq!(what, "transcript"),
            other => panic!("expected shape error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn error_detail_prefers_backend_detail_field() {
        let detail = error_detail(
            StatusCode::BAD_REQUEST,
            br#"{"detail": "Invalid YouTube URL or Video ID"}"#,
        );
        assert_eq!(detail, "Invalid YouTube URL or Video ID");
    }

    #[test]
    fn error_detail_falls_back_to_status_line() {
        let detail = error_detail(StatusCode::BAD_GATEWAY, b"<html>nope</html>");
        assert_eq!(detail, "502 Bad Gateway");
    }

    #[test]
    fn from_settings_rejects_invalid_url() {
        let mut settings = Settings::default();
        settings.backend.url = "not a url".to_string();
        assert!(Client::from_settings(&settings).is_err());
    }
}
