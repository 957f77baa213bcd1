//! tubenotes - Terminal client for the TubeNotes backend
//!
//! Fetches video transcripts and AI-generated study notes over HTTP and
//! presents them in an interactive TUI or as one-shot CLI commands.

pub mod api;
pub mod cli;
pub mod config;
pub mod export;
pub mod markdown;
pub mod tui;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "tubenotes";
