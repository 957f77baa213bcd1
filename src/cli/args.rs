//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// tubenotes - Video transcripts and AI study notes in the terminal
#[derive(Parser, Debug)]
#[command(name = "tubenotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the backend is reachable
    Health,

    /// Fetch and print the transcript for a video
    Transcript {
        /// Video identifier (passed through to the backend as-is)
        video_id: String,
    },

    /// Generate AI notes for a video and print them
    Summarize {
        /// Video identifier
        video_id: String,

        /// Also copy the notes to the clipboard
        #[arg(short, long)]
        copy: bool,

        /// Also save the notes as a PDF at the configured output path
        #[arg(short, long)]
        pdf: bool,
    },

    /// Generate AI notes for a video and save them as a PDF
    Export {
        /// Video identifier
        video_id: String,

        /// Output file path (defaults to the configured output path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Launch the interactive TUI
    Tui,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
