//! Application settings management

use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendSettings,

    /// TUI settings
    #[serde(default)]
    pub tui: TuiSettings,

    /// Notes export settings
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the TubeNotes backend
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    /// Show start offsets in the transcript pane
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Color theme (dark, light)
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// File name for exported PDFs
    #[serde(default = "default_pdf_filename")]
    pub pdf_filename: String,

    /// Directory PDFs are written to (empty = user download dir)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Page margin in millimeters
    #[serde(default = "default_margin_mm")]
    pub margin_mm: f64,
}

// Default value functions

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_pdf_filename() -> String {
    "TubeNotes.pdf".to_string()
}

fn default_margin_mm() -> f64 {
    10.0
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            theme: default_theme(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pdf_filename: default_pdf_filename(),
            output_dir: None,
            margin_mm: default_margin_mm(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            tui: TuiSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TUBENOTES_BACKEND_URL") {
            if !url.trim().is_empty() {
                self.backend.url = url;
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "tubenotes", "tubenotes")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the path an exported PDF is written to: the configured output
    /// directory, falling back to the user's download dir, then the current
    /// directory.
    pub fn pdf_output_path(&self) -> PathBuf {
        let dir = self
            .export
            .output_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|d| d.download_dir().map(|p| p.to_path_buf())))
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(&self.export.pdf_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.backend.url, "http://localhost:8000");
    }

    #[test]
    fn pdf_output_path_uses_configured_dir_and_filename() {
        let mut settings = Settings::default();
        settings.export.output_dir = Some(PathBuf::from("/tmp/notes"));
        assert_eq!(
            settings.pdf_output_path(),
            PathBuf::from("/tmp/notes/TubeNotes.pdf")
        );
    }

    #[test]
    fn empty_sections_fill_in_defaults() {
        let settings: Settings = toml::from_str("").expect("empty config should parse");
        assert_eq!(settings.export.pdf_filename, "TubeNotes.pdf");
        assert!(settings.tui.show_timestamps);
        assert_eq!(settings.export.margin_mm, 10.0);
    }
}
