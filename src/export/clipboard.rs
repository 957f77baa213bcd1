//! Clipboard export
//!
//! Copies the raw markdown notes to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::info;

/// Copy notes text to the system clipboard. Empty text is a no-op.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        info!("No notes to copy (empty)");
        return Ok(());
    }

    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy notes to clipboard")?;

    info!("Notes copied to clipboard ({} chars)", text.len());
    Ok(())
}
