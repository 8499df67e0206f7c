//! Configuration for cellterm.
//!
//! Loaded from `~/.cellterm/config.toml`. Every field is optional; missing
//! or unreadable files fall back to the defaults.
//!
//! ```toml
//! # Line style: ascii, light, rounded, heavy, double
//! line_style = "heavy"
//!
//! # Dash pattern for light and heavy lines: normal, left-dash, right-dash,
//! #   double-dash, triple-dash, quadruple-dash
//! detail = "triple-dash"
//!
//! [border]
//! foreground = "bright-cyan"
//! background = "default"
//! attributes = ["bold"]
//!
//! [terminal]
//! # Cap on colour pairs, below what the terminal reports (optional)
//! max_colour_pairs = 64
//! # Draw without colour pairs
//! colour = true
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::core::attributes::Attributes;
use crate::core::colour::{Colour, Palette};
use crate::glyph::{LineDetail, LineStyle};

/// Errors while writing the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config path")]
    NoHome,

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config: {0}")]
    Io(#[from] io::Error),
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Line style name
    pub line_style: String,
    /// Dash pattern name
    pub detail: String,
    /// Colours and attributes of the window border
    pub border: BorderConfig,
    pub terminal: TerminalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_style: "light".to_string(),
            detail: "normal".to_string(),
            border: BorderConfig::default(),
            terminal: TerminalConfig::default(),
        }
    }
}

/// Border palette settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    pub foreground: String,
    pub background: String,
    pub attributes: Vec<String>,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            foreground: "cyan".to_string(),
            background: "default".to_string(),
            attributes: Vec::new(),
        }
    }
}

/// Terminal settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub max_colour_pairs: Option<u16>,
    pub colour: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            max_colour_pairs: None,
            colour: true,
        }
    }
}

impl Config {
    /// Load configuration from `~/.cellterm/config.toml`
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save configuration to `~/.cellterm/config.toml`
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoHome)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// `~/.cellterm`, also home of the log file
    pub fn dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".cellterm"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join("config.toml"))
    }

    /// Dash pattern, `normal` when the name is unknown
    pub fn line_detail(&self) -> LineDetail {
        LineDetail::by_name(&self.detail).unwrap_or_else(|| {
            warn!("Unknown line detail '{}', using normal", self.detail);
            LineDetail::Normal
        })
    }

    /// Line style, `light` when the name is unknown
    pub fn line_style(&self) -> LineStyle {
        LineStyle::by_name(&self.line_style, self.line_detail()).unwrap_or_else(|| {
            warn!("Unknown line style '{}', using light", self.line_style);
            LineStyle::Light(self.line_detail())
        })
    }

    /// Border palette; unknown colour names become the terminal default
    pub fn border_palette(&self) -> Palette {
        Palette::new(
            colour_or_default(&self.border.foreground),
            colour_or_default(&self.border.background),
        )
    }

    /// Border attributes; unknown names are skipped
    pub fn border_attributes(&self) -> Attributes {
        self.border
            .attributes
            .iter()
            .fold(Attributes::NORMAL, |acc, name| match Attributes::by_name(name) {
                Some(flag) => acc | flag,
                None => {
                    warn!("Unknown attribute '{}'", name);
                    acc
                }
            })
    }

    /// List accepted line style names
    pub fn list_styles() -> Vec<&'static str> {
        vec!["ascii", "light", "rounded", "heavy", "double"]
    }

    /// List accepted dash pattern names
    pub fn list_details() -> Vec<&'static str> {
        vec![
            "normal",
            "left-dash",
            "right-dash",
            "double-dash",
            "triple-dash",
            "quadruple-dash",
        ]
    }
}

fn colour_or_default(name: &str) -> Colour {
    Colour::by_name(name).unwrap_or_else(|| {
        warn!("Unknown colour '{}', using default", name);
        Colour::Default
    })
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
