//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::scoring::RoundingMode;
use clap::Parser;
use std::path::PathBuf;

/// PersonaScore - swipe-quiz personality scoring
///
/// Score recorded quiz sessions into feeling / sensing / intuition /
/// thinking percentages, rank the dominant buckets and write a report.
///
/// Examples:
///   personascore --session alex.toml
///   personascore --quiz quiz.json --session alex.json --format json
///   personascore --sessions-dir ./sessions --output team.md
///   personascore --print-sample-quiz > quiz.toml
///   personascore --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Quiz definition file (.toml or .json)
    ///
    /// If not specified, the built-in sample quiz is used.
    #[arg(long, value_name = "FILE", env = "PERSONASCORE_QUIZ")]
    pub quiz: Option<PathBuf>,

    /// Recorded session file to score
    #[arg(short, long, value_name = "FILE", conflicts_with = "sessions_dir")]
    pub session: Option<PathBuf>,

    /// Directory of recorded session files to score in batch
    #[arg(long, value_name = "DIR")]
    pub sessions_dir: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config value (personascore_report.md).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Number of top buckets to rank
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Percentage rounding mode
    #[arg(long, value_name = "MODE")]
    pub rounding: Option<RoundingArg>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .personascore.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Leave the answer log out of the report
    #[arg(long)]
    pub no_answers: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the built-in sample quiz as TOML and exit
    #[arg(long)]
    pub print_sample_quiz: bool,

    /// Generate a default .personascore.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Rounding mode for --rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RoundingArg {
    Independent,
    LargestRemainder,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Independent => RoundingMode::Independent,
            RoundingArg::LargestRemainder => RoundingMode::LargestRemainder,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the invocation exits before scoring anything.
    pub fn is_utility_mode(&self) -> bool {
        self.init_config || self.print_sample_quiz
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_utility_mode() {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match (&self.session, &self.sessions_dir) {
            (None, None) => {
                return Err("One of --session or --sessions-dir is required".to_string());
            }
            (Some(path), _) if !path.is_file() => {
                return Err(format!("Session file does not exist: {}", path.display()));
            }
            (_, Some(dir)) if !dir.is_dir() => {
                return Err(format!("Sessions path is not a directory: {}", dir.display()));
            }
            _ => {}
        }

        if let Some(ref quiz) = self.quiz {
            if !quiz.is_file() {
                return Err(format!("Quiz file does not exist: {}", quiz.display()));
            }
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `general.verbose` from the config file. `--quiet`
    /// overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
