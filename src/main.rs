//! PersonaScore - swipe-quiz personality scoring CLI
//!
//! Scores recorded quiz sessions into bucket percentages and writes
//! Markdown or JSON profile reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, unreadable quiz or session, write failure)

use anyhow::{Context, Result};
use personascore::app;
use personascore::cli::Args;
use personascore::config::{Config, CONFIG_FILE_NAME};
use personascore::quiz::Quiz;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Utility modes exit before logging is set up
    if args.init_config {
        exit_on_error(handle_init_config());
        return;
    }
    if args.print_sample_quiz {
        exit_on_error(print_sample_quiz());
        return;
    }

    // Config decides the log level, so it is resolved before the subscriber
    let (config, source) = match app::load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(args.log_level(config.general.verbose));

    info!("PersonaScore v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match app::run(&args, config) {
        Ok(path) => println!("✅ Report saved to: {}", path.display()),
        Err(e) => {
            error!("Scoring failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_sample_quiz() -> Result<()> {
    let toml = Quiz::sample()
        .to_toml()
        .context("Failed to serialize the sample quiz")?;
    print!("{}", toml);
    Ok(())
}

/// Handle --init-config: generate a default .personascore.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
    }

    std::fs::write(path, Config::default_toml()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}
