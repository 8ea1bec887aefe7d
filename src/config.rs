//! Configuration types for gtl.
//!
//! [`Config::load`] layers an optional user file over the embedded defaults.
//! The user file is `$XDG_CONFIG_HOME/gtl/config.toml` (falling back to
//! `~/.config/gtl/config.toml`) unless a path is given explicitly.
//! [`Config::defaults`] returns the defaults without touching the filesystem.
//!
//! CLI flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
format   = "text"
color    = "auto"
show_raw = false

[extract]
parallel = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub color: ColorChoice,
    #[serde(default)]
    pub show_raw: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            color: ColorChoice::default(),
            show_raw: false,
        }
    }
}

/// `[extract]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractConfig {
    /// Scan files concurrently. Same-second events from different nodes may
    /// then tie-break differently between runs.
    #[serde(default)]
    pub parallel: bool,
}

/// Timeline output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Jsonl,
}

/// When to colour text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve `Auto` against whether the output is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the defaults, then `path` (or the per-user file) if it exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let user = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        // An explicitly named file must exist.
        let required = path.is_some();

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(user.as_path()).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("gtl")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
