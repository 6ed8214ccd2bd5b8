//! Session file discovery.
//!
//! Walks a directory for recorded session files, respecting the
//! configured extensions, excludes and file limit.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for session discovery.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Extensions to include (e.g., ["json", "toml"])
    pub extensions: Vec<String>,
    /// Names to exclude (e.g., [".git", "archive"])
    pub excludes: Vec<String>,
    /// Maximum number of files to return
    pub max_files: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["json".to_string(), "toml".to_string()],
            excludes: vec![".git".to_string()],
            max_files: None,
        }
    }
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            excludes: config.excludes.clone(),
            max_files: Some(config.max_files),
        }
    }
}

/// Scanner for recorded session files under one root.
pub struct SessionScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl SessionScanner {
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    /// All matching files, sorted by path.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            anyhow::bail!("Not a directory: {}", self.root.display());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_excluded(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();

        if let Some(max) = self.config.max_files {
            if files.len() > max {
                warn!(
                    "Found {} session files, scoring only the first {}",
                    files.len(),
                    max
                );
                files.truncate(max);
            }
        }

        debug!("Found {} session files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Path of a scanned file relative to the root, for display.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Canonical root, for log messages.
    pub fn root_display(&self) -> Result<String> {
        let canonical = std::fs::canonicalize(&self.root)
            .with_context(|| format!("Failed to resolve {}", self.root.display()))?;
        Ok(canonical.display().to_string())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        self.config.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();

        // Hidden files
        if name.starts_with('.') {
            return true;
        }

        self.config.excludes.iter().any(|pattern| name == pattern.as_str())
    }
}
