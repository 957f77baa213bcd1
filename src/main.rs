//! tubenotes - Video transcripts and AI study notes in the terminal
//!
//! Entry point for the tubenotes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tubenotes::cli::{Cli, Commands};
use tubenotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            tubenotes::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            // Execute command
            match command {
                Commands::Health => {
                    tubenotes::cli::commands::show_health(&settings).await?;
                }
                Commands::Transcript { video_id } => {
                    tubenotes::cli::commands::fetch_transcript(&settings, &video_id).await?;
                }
                Commands::Summarize {
                    video_id,
                    copy,
                    pdf,
                } => {
                    tubenotes::cli::commands::summarize_video(&settings, &video_id, copy, pdf)
                        .await?;
                }
                Commands::Export { video_id, output } => {
                    tubenotes::cli::commands::export_notes(&settings, &video_id, output).await?;
                }
                Commands::Tui => {
                    tubenotes::tui::run(&settings).await?;
                }
                Commands::Config(config_cmd) => {
                    tubenotes::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
