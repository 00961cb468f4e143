//! Backup management for the ledger file.
//!
//! Destructive operations copy the CSV aside before rewriting it, so a bad
//! delete can be undone by hand from `.backups/`.

use crate::{fs, Config};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

/// Fallback prefix if the store file name has no stem.
const STORE: &str = "expenses";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and
/// settings it needs. Create an instance via `Config::backup()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    store_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            store_path: config.store_path().to_path_buf(),
        }
    }

    /// Copies the ledger file into the backups directory.
    ///
    /// The filename format is `{stem}.YYYY-MM-DD-NNN.csv` where NNN is a
    /// sequence number within the day. Automatically rotates old backups,
    /// keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file.
    pub fn copy_store(&self) -> Result<PathBuf> {
        let prefix = self.prefix();
        let date = today();
        let seq = self.next_sequence_number(&prefix, &date)?;
        let filename = format!("{prefix}.{date}-{seq:03}.csv");
        let path = self.backups_dir.join(&filename);

        fs::copy(&self.store_path, &path)?;
        self.rotate(&prefix)?;

        Ok(path)
    }

    fn prefix(&self) -> String {
        self.store_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(STORE)
            .to_string()
    }

    /// Scans the backups directory for files with the given prefix and
    /// date, and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        let dir = std::fs::read_dir(&self.backups_dir)
            .context("Failed to read the backups directory")?;
        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with
    /// the given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();
        let dir = std::fs::read_dir(&self.backups_dir)
            .context("Failed to read the backups directory")?;
        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            let name = entry.file_name().to_string_lossy().to_string();
            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // The filename format sorts by date then sequence number.
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            std::fs::remove_file(&path)
                .context(format!("Failed to remove old backup {}", path.display()))?;
        }
        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.csv
    let expected_start = format!("{prefix}.{date}-");
    let remainder = filename.strip_prefix(&expected_start)?;
    let seq_str = remainder.strip_suffix(".csv")?;
    seq_str.parse().ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".csv")
}
