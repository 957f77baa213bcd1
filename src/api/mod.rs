//! HTTP client for the TubeNotes backend
//!
//! Three GET endpoints: health probe, transcript fetch, and AI summary.

mod client;
mod models;

pub use client::Client;
pub use models::TranscriptEntry;

use thiserror::Error;

/// Errors surfaced by backend requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend error: {detail}")]
    Backend {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// The backend answered with a success status but the payload did not
    /// match the expected shape.
    #[error("invalid {what} payload from backend: {source}")]
    Shape {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
