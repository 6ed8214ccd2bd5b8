//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.personascore.toml` files.

use crate::scoring::{RoundingMode, DEFAULT_TOP_COUNT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".personascore.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scoring settings.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Session scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "personascore_report.md".to_string()
}

/// Scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// How many top buckets to rank.
    #[serde(default = "default_top_count")]
    pub top_count: usize,

    /// Percentage rounding mode.
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_count: default_top_count(),
            rounding: RoundingMode::default(),
        }
    }
}

fn default_top_count() -> usize {
    DEFAULT_TOP_COUNT
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the answer log in the report.
    #[serde(default = "default_true")]
    pub include_answers: bool,

    /// Include insight text in the report.
    #[serde(default = "default_true")]
    pub include_insights: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_answers: true,
            include_insights: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Session file discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Session file extensions to include.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Path components to skip.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Maximum session files to score.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excludes: default_excludes(),
            max_files: default_max_files(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["json", "toml"].into_iter().map(String::from).collect()
}

fn default_excludes() -> Vec<String> {
    vec![".git", "archive"].into_iter().map(String::from).collect()
}

fn default_max_files() -> usize {
    500
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(top) = args.top {
            self.scoring.top_count = top;
        }
        if let Some(rounding) = args.rounding {
            self.scoring.rounding = rounding.into();
        }
        if args.no_answers {
            self.report.include_answers = false;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }
}
