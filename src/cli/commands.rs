//! CLI command implementations

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::api::Client;
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::export;

/// Probe the backend and report its status.
pub async fn show_health(settings: &Settings) -> Result<()> {
    let client = Client::from_settings(settings)?;

    match client.health().await {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(err) => {
            anyhow::bail!("Error connecting to backend: {}", err);
        }
    }
}

/// Fetch and print the transcript for a video.
pub async fn fetch_transcript(settings: &Settings, video_id: &str) -> Result<()> {
    let client = Client::from_settings(settings)?;

    let entries = client
        .transcript(video_id)
        .await
        .context("Failed to fetch transcript")?;

    if entries.is_empty() {
        println!("(Empty transcript)");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.display_line());
    }

    Ok(())
}

/// Generate AI notes for a video and print them.
pub async fn summarize_video(
    settings: &Settings,
    video_id: &str,
    copy: bool,
    pdf: bool,
) -> Result<()> {
    let client = Client::from_settings(settings)?;

    let notes = client
        .summarize(video_id)
        .await
        .context("Failed to fetch summary")?;

    println!("{}", notes);

    if copy {
        export::copy_to_clipboard(&notes)?;
    }

    if pdf {
        let path = settings.pdf_output_path();
        export::write_pdf(&path, &notes, settings.export.margin_mm)?;
        eprintln!("Saved to: {}", path.display());
    }

    Ok(())
}

/// Generate AI notes for a video and save them as a PDF without printing.
pub async fn export_notes(
    settings: &Settings,
    video_id: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = Client::from_settings(settings)?;

    let notes = client
        .summarize(video_id)
        .await
        .context("Failed to fetch summary")?;

    let path = output.unwrap_or_else(|| settings.pdf_output_path());
    export::write_pdf(&path, &notes, settings.export.margin_mm)?;
    println!("Exported to: {}", path.display());

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
