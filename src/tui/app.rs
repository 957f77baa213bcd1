//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiError, Client, TranscriptEntry};
use crate::config::Settings;
use crate::export;

/// Backend reachability, set once by the startup probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    /// Probe still in flight.
    Unknown,
    /// Probe answered; holds the backend's status message.
    Healthy(String),
    /// Probe failed. Not retried.
    Unreachable,
}

/// Lifecycle of one fetch kind.
///
/// Starting a fetch is the transition into `Loading`; the paired pane is
/// moved to `Idle` at the same time, so both display regions clear together.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Completed network work, delivered to the event loop over the app channel.
///
/// Transcript and notes outcomes carry the token of the request that started
/// them; outcomes with a stale token are dropped on receipt, so the most
/// recently started fetch wins regardless of arrival order.
#[derive(Debug)]
pub enum FetchOutcome {
    Health(Result<String, ApiError>),
    Transcript {
        token: u64,
        result: Result<Vec<TranscriptEntry>, ApiError>,
    },
    Notes {
        token: u64,
        result: Result<String, ApiError>,
    },
}

/// Main application state
pub struct App {
    settings: Settings,
    client: Client,
    tx: UnboundedSender<FetchOutcome>,
    rx: UnboundedReceiver<FetchOutcome>,

    pub(crate) backend_status: BackendStatus,
    pub(crate) video_id: String,
    pub(crate) transcript: FetchState<Vec<TranscriptEntry>>,
    pub(crate) notes: FetchState<String>,

    /// One-line feedback for the last action (copy/export results).
    pub(crate) message: Option<String>,
    pub(crate) transcript_scroll: usize,
    pub(crate) notes_scroll: usize,

    transcript_token: u64,
    notes_token: u64,
    should_quit: bool,
}

impl App {
    /// Create a new app instance and start the one-shot health probe.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::from_settings(&settings)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let app = Self {
            settings,
            client,
            tx,
            rx,
            backend_status: BackendStatus::Unknown,
            video_id: String::new(),
            transcript: FetchState::Idle,
            notes: FetchState::Idle,
            message: None,
            transcript_scroll: 0,
            notes_scroll: 0,
            transcript_token: 0,
            notes_token: 0,
            should_quit: false,
        };

        app.spawn_health_probe();
        Ok(app)
    }

    fn spawn_health_probe(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.health().await;
            let _ = tx.send(FetchOutcome::Health(result));
        });
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.start_notes_fetch(),
                KeyCode::Char('y') => self.copy_notes(),
                KeyCode::Char('e') => self.export_notes(),
                KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => self.start_transcript_fetch(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Backspace => {
                self.video_id.pop();
            }
            KeyCode::Char(c) => self.video_id.push(c),
            KeyCode::Up => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.transcript_scroll = (self.transcript_scroll + 1).min(self.transcript_len());
            }
            KeyCode::PageUp => {
                self.notes_scroll = self.notes_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.notes_scroll = (self.notes_scroll + 10).min(self.notes_len());
            }
            _ => {}
        }
    }

    /// Start a transcript fetch for the current video id.
    ///
    /// Both panes clear immediately; the transcript pane enters `Loading`.
    pub fn start_transcript_fetch(&mut self) {
        let video_id = self.video_id.clone();

        self.transcript = FetchState::Loading;
        self.notes = FetchState::Idle;
        self.transcript_scroll = 0;
        self.notes_scroll = 0;
        self.message = None;

        self.transcript_token += 1;
        let token = self.transcript_token;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.transcript(&video_id).await;
            let _ = tx.send(FetchOutcome::Transcript { token, result });
        });
    }

    /// Start a notes fetch for the current video id. No-op while the id is
    /// empty.
    pub fn start_notes_fetch(&mut self) {
        if self.video_id.is_empty() {
            return;
        }
        let video_id = self.video_id.clone();

        self.notes = FetchState::Loading;
        self.transcript = FetchState::Idle;
        self.transcript_scroll = 0;
        self.notes_scroll = 0;
        self.message = None;

        self.notes_token += 1;
        let token = self.notes_token;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.summarize(&video_id).await;
            let _ = tx.send(FetchOutcome::Notes { token, result });
        });
    }

    /// Drain completed fetches and apply them to the app state.
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Health(Ok(message)) => {
                self.backend_status = BackendStatus::Healthy(message);
            }
            FetchOutcome::Health(Err(err)) => {
                tracing::warn!("Backend health probe failed: {}", err);
                self.backend_status = BackendStatus::Unreachable;
            }
            FetchOutcome::Transcript { token, result } => {
                if token != self.transcript_token {
                    tracing::debug!(token, "Dropping stale transcript response");
                    return;
                }
                self.transcript = match result {
                    Ok(entries) => FetchState::Loaded(entries),
                    Err(err) => {
                        tracing::warn!("Transcript fetch failed: {}", err);
                        FetchState::Failed(err.to_string())
                    }
                };
            }
            FetchOutcome::Notes { token, result } => {
                if token != self.notes_token {
                    tracing::debug!(token, "Dropping stale notes response");
                    return;
                }
                self.notes = match result {
                    Ok(notes) => FetchState::Loaded(notes),
                    Err(err) => {
                        tracing::warn!("Notes fetch failed: {}", err);
                        FetchState::Failed(err.to_string())
                    }
                };
            }
        }
    }

    /// Copy the notes to the clipboard. Ignored unless notes are loaded.
    fn copy_notes(&mut self) {
        let notes = match self.notes.loaded() {
            Some(notes) => notes.clone(),
            None => return,
        };

        self.message = Some(match export::copy_to_clipboard(&notes) {
            Ok(()) => "Notes copied to clipboard".to_string(),
            Err(err) => format!("Copy failed: {:#}", err),
        });
    }

    /// Export the notes as a PDF. Ignored unless notes are loaded.
    fn export_notes(&mut self) {
        let notes = match self.notes.loaded() {
            Some(notes) => notes.clone(),
            None => return,
        };

        let path = self.settings.pdf_output_path();
        self.message = Some(
            match export::write_pdf(&path, &notes, self.settings.export.margin_mm) {
                Ok(()) => format!("Notes saved to {}", path.display()),
                Err(err) => format!("PDF export failed: {:#}", err),
            },
        );
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn transcript_len(&self) -> usize {
        self.transcript
            .loaded()
            .map(|entries| entries.len().saturating_sub(1))
            .unwrap_or(0)
    }

    fn notes_len(&self) -> usize {
        self.notes
            .loaded()
            .map(|notes| notes.lines().count().saturating_sub(1))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(Settings::default()).expect("app should build with default settings")
    }

    fn shape_error() -> ApiError {
        let source = serde_json::from_str::<Vec<i32>>("{}").unwrap_err();
        ApiError::Shape {
            what: "transcript",
            source,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn typing_edits_video_id() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.video_id, "a");
    }

    #[tokio::test]
    async fn notes_fetch_is_noop_for_empty_video_id() {
        let mut app = test_app();
        app.start_notes_fetch();
        assert_eq!(app.notes, FetchState::Idle);
    }

    #[tokio::test]
    async fn notes_leave_loading_on_every_completion_path() {
        let mut app = test_app();
        app.video_id = "abc123".to_string();

        app.start_notes_fetch();
        assert!(app.notes.is_loading());
        app.apply_outcome(FetchOutcome::Notes {
            token: app.notes_token,
            result: Ok("## Notes".to_string()),
        });
        assert!(!app.notes.is_loading());
        assert_eq!(app.notes.loaded().map(String::as_str), Some("## Notes"));

        app.start_notes_fetch();
        assert!(app.notes.is_loading());
        app.apply_outcome(FetchOutcome::Notes {
            token: app.notes_token,
            result: Err(shape_error()),
        });
        assert!(!app.notes.is_loading());
        assert!(matches!(app.notes, FetchState::Failed(_)));
    }

    #[tokio::test]
    async fn stale_notes_response_is_discarded() {
        let mut app = test_app();
        app.video_id = "first".to_string();
        app.start_notes_fetch();
        let stale = app.notes_token;

        app.video_id = "second".to_string();
        app.start_notes_fetch();

        // The response for the superseded request resolves first here; the
        // pane keeps waiting for the current request.
        app.apply_outcome(FetchOutcome::Notes {
            token: stale,
            result: Ok("old notes".to_string()),
        });
        assert!(app.notes.is_loading());

        app.apply_outcome(FetchOutcome::Notes {
            token: app.notes_token,
            result: Ok("new notes".to_string()),
        });
        assert_eq!(app.notes.loaded().map(String::as_str), Some("new notes"));

        // Even arriving after the winner, the stale response changes nothing.
        app.apply_outcome(FetchOutcome::Notes {
            token: stale,
            result: Ok("old notes".to_string()),
        });
        assert_eq!(app.notes.loaded().map(String::as_str), Some("new notes"));
    }

    #[tokio::test]
    async fn starting_either_fetch_clears_both_panes() {
        let mut app = test_app();
        app.video_id = "abc123".to_string();
        app.transcript = FetchState::Loaded(vec![]);
        app.notes = FetchState::Loaded("notes".to_string());

        app.start_transcript_fetch();
        assert!(app.transcript.is_loading());
        assert_eq!(app.notes, FetchState::Idle);

        app.transcript = FetchState::Loaded(vec![]);
        app.start_notes_fetch();
        assert!(app.notes.is_loading());
        assert_eq!(app.transcript, FetchState::Idle);
    }

    #[tokio::test]
    async fn transcript_shape_error_fails_without_storing_entries() {
        let mut app = test_app();
        app.start_transcript_fetch();
        app.apply_outcome(FetchOutcome::Transcript {
            token: app.transcript_token,
            result: Err(shape_error()),
        });
        assert!(app.transcript.loaded().is_none());
        assert!(matches!(app.transcript, FetchState::Failed(_)));
    }

    #[tokio::test]
    async fn health_outcomes_update_backend_status() {
        let mut app = test_app();
        app.apply_outcome(FetchOutcome::Health(Ok(
            "TubeNotes Backend is running!".to_string()
        )));
        assert_eq!(
            app.backend_status,
            BackendStatus::Healthy("TubeNotes Backend is running!".to_string())
        );

        app.apply_outcome(FetchOutcome::Health(Err(shape_error())));
        assert_eq!(app.backend_status, BackendStatus::Unreachable);
    }

    #[tokio::test]
    async fn export_keys_are_ignored_without_loaded_notes() {
        let mut app = test_app();
        app.handle_key(ctrl('y'));
        app.handle_key(ctrl('e'));
        assert_eq!(app.message, None);
    }

    #[tokio::test]
    async fn escape_requests_quit() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }
}
