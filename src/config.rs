//! Configuration management for the geometry calculator.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML settings file

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT: &str = "> ";

/// Command-line arguments for the geometry calculator
#[derive(Debug, Default, Parser)]
#[command(name = "geocalc")]
#[command(about = "Interactive calculator for points and lines in the plane")]
#[command(version)]
pub struct Args {
    /// Settings file to load instead of the default location
    #[arg(long, env = "GEOCALC_CONFIG", help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,

    /// Decimal places used when printing computed numbers
    #[arg(long, help = "Round printed numbers to this many decimals")]
    pub precision: Option<usize>,

    #[arg(long, help = "Prompt shown before each input line")]
    pub prompt: Option<String>,

    /// Commands to run instead of reading standard input
    #[arg(short = 'e', long = "execute", help = "Run a command and exit (repeatable)")]
    pub execute: Vec<String>,

    /// Log level for the calculator
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Settings file contents; every key is optional
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub precision: Option<usize>,
    pub prompt: Option<String>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Decimal places for printed numbers, `None` prints them in full
    pub precision: Option<usize>,
    pub prompt: String,
    /// Commands given with `--execute`
    pub commands: Vec<String>,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    ///
    /// An explicit settings path must exist. The default location is read
    /// only when present.
    pub fn from_args(args: Args) -> Result<Self> {
        let settings = match &args.config {
            Some(path) => SettingsFile::load(path)?,
            None => match default_settings_path() {
                Some(path) if path.is_file() => SettingsFile::load(&path)?,
                _ => SettingsFile::default(),
            },
        };

        Ok(Config {
            precision: args.precision.or(settings.precision),
            prompt: args
                .prompt
                .or(settings.prompt)
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            commands: args.execute,
            log_level: args.log_level,
        })
    }

    /// True when commands came from `--execute` rather than standard input
    pub fn is_batch(&self) -> bool {
        !self.commands.is_empty()
    }
}

/// `<config dir>/geocalc/config.toml`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("geocalc").join("config.toml"))
}
