//! Scoring flow behind the command-line front-end.
//!
//! `main` parses arguments and sets up logging; everything from config
//! resolution to the written report lives here.

use crate::cli::{Args, OutputFormat};
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::models::{BatchReport, Report, ReportMetadata, SessionFailure};
use crate::quiz::Quiz;
use crate::recording::SessionFile;
use crate::report::{self, ReportOptions};
use crate::scanner::{ScanConfig, SessionScanner};
use crate::scoring::{build_profile, ScoringSettings};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the active configuration came from.
///
/// Config is resolved before the subscriber exists, so the outcome is
/// kept and logged afterwards with [`ConfigSource::log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Defaults,
    /// The default-location file exists but could not be loaded.
    Broken(String),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Broken(error) => warn!("Failed to load config: {}", error),
        }
    }
}

/// Load configuration from `--config` or the current directory.
pub fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    load_config_from(args, Path::new("."))
}

/// Like [`load_config`], looking for the default file in `dir`.
///
/// A broken explicit file is an error; a broken default file falls back
/// to defaults.
pub fn load_config_from(args: &Args, dir: &Path) -> Result<(Config, ConfigSource)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    match Config::load_from_dir(dir) {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::Broken(format!("{:#}", e)))),
    }
}

/// Score the requested session(s) and write the report.
///
/// Returns the path the report was written to.
pub fn run(args: &Args, mut config: Config) -> Result<PathBuf> {
    config.merge_with_args(args);

    let quiz = load_quiz(args)?;
    let settings = ScoringSettings::from(&config.scoring);
    let options = ReportOptions::from(&config.report);
    let output_path = output_path(args, &config);

    info!(
        "Scoring against '{}' ({} questions, rounding: {})",
        quiz.title,
        quiz.questions.len(),
        settings.rounding
    );

    let content = if let Some(ref session_path) = args.session {
        let scored = score_session(&quiz, session_path, &settings, &options)?;
        print_profile_summary(&scored);
        match args.format {
            OutputFormat::Json => report::generate_json_report(&scored)?,
            OutputFormat::Markdown => report::generate_markdown_report(&scored, &options),
        }
    } else if let Some(ref dir) = args.sessions_dir {
        let batch = score_directory(&quiz, dir, &config, &settings, &options)?;
        println!(
            "📊 Scored {} sessions ({} failed)",
            batch.sessions.len(),
            batch.failures.len()
        );
        match args.format {
            OutputFormat::Json => report::generate_json_batch(&batch)?,
            OutputFormat::Markdown => report::generate_markdown_batch(&batch),
        }
    } else {
        anyhow::bail!("One of --session or --sessions-dir is required");
    };

    report::write_report(&content, &output_path)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(output_path)
}

/// Load one session file and build its report.
pub fn score_session(
    quiz: &Quiz,
    path: &Path,
    settings: &ScoringSettings,
    options: &ReportOptions,
) -> Result<Report> {
    let session = SessionFile::load(path)
        .with_context(|| format!("Failed to load session {}", path.display()))?;

    let now = Utc::now();
    let answers = session.resolve_answers(quiz, now);
    let profile = build_profile(quiz, &answers, settings);

    if profile.skipped_references > 0 {
        warn!(
            "Session '{}': {} answers did not match the quiz and were skipped",
            session.display_name(),
            profile.skipped_references
        );
    }
    if answers.len() < quiz.questions.len() {
        info!(
            "Session '{}' answered {} of {} questions",
            session.display_name(),
            answers.len(),
            quiz.questions.len()
        );
    }

    Ok(Report {
        metadata: ReportMetadata {
            quiz_title: quiz.title.clone(),
            session_name: session.display_name().to_string(),
            generated_at: now,
            rounding: settings.rounding.to_string(),
        },
        profile,
        answers: if options.include_answers {
            answers
        } else {
            Vec::new()
        },
    })
}

/// Score every session file under a directory. Per-file failures are
/// collected into the batch instead of aborting it.
pub fn score_directory(
    quiz: &Quiz,
    dir: &Path,
    config: &Config,
    settings: &ScoringSettings,
    options: &ReportOptions,
) -> Result<BatchReport> {
    let scanner = SessionScanner::new(dir.to_path_buf(), ScanConfig::from(&config.scanner));
    info!("Scanning {}", scanner.root_display()?);

    let files = scanner.scan()?;
    if files.is_empty() {
        warn!("No session files found under {}", dir.display());
    }

    let mut batch = BatchReport {
        quiz_title: quiz.title.clone(),
        generated_at: Utc::now(),
        rounding: settings.rounding.to_string(),
        sessions: Vec::new(),
        failures: Vec::new(),
    };

    for path in &files {
        let shown = scanner.relative(path).display().to_string();
        match score_session(quiz, path, settings, options) {
            Ok(scored) => {
                debug!("Scored {}", shown);
                batch.sessions.push(scored);
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", shown, e);
                batch.failures.push(SessionFailure {
                    path: shown,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    Ok(batch)
}

fn print_profile_summary(scored: &Report) {
    let p = &scored.profile.percentages;
    println!("\n📊 Profile: {}", scored.metadata.session_name);
    println!(
        "   💗 Feeling: {}% | 👁️ Sensing: {}% | ✨ Intuition: {}% | 🧠 Thinking: {}%",
        p.feeling, p.sensing, p.intuition, p.thinking
    );
    let top: Vec<String> = scored
        .profile
        .top
        .iter()
        .map(|t| format!("{} ({}%)", t.bucket, t.value))
        .collect();
    println!("   Top: {}", top.join(", "));
}

/// Load the quiz from --quiz or fall back to the built-in sample.
pub fn load_quiz(args: &Args) -> Result<Quiz> {
    match args.quiz {
        Some(ref path) => {
            info!("Loading quiz from: {}", path.display());
            Quiz::load(path).with_context(|| format!("Failed to load quiz {}", path.display()))
        }
        None => {
            debug!("No quiz file given, using the built-in sample quiz");
            Ok(Quiz::sample())
        }
    }
}

/// Pick the report path, switching the default extension for JSON.
pub fn output_path(args: &Args, config: &Config) -> PathBuf {
    let path = PathBuf::from(&config.general.output);
    if args.output.is_none() && args.format == OutputFormat::Json {
        path.with_extension("json")
    } else {
        path
    }
}
