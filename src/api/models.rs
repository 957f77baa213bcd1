//! Typed response bodies for the TubeNotes backend

use serde::Deserialize;

/// A timestamped line of spoken text.
///
/// The backend may also send a `duration` per entry; it is not used here and
/// is ignored on decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptEntry {
    /// Start offset in seconds from the beginning of the video.
    pub start: f64,

    /// Spoken text for this entry.
    pub text: String,
}

impl TranscriptEntry {
    /// Render the entry as it is displayed: floor-rounded start seconds
    /// followed by the text (`12s: hello`).
    pub fn display_line(&self) -> String {
        format!("{}s: {}", self.start.floor() as u64, self.text)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptResponse {
    pub transcript: Vec<TranscriptEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
