//! Configuration file handling.
//!
//! The configuration file is stored at `$OUTLAY_HOME/config.json` and holds
//! the few knobs the tool has: the ledger file name, how many backups to
//! keep, and the currency symbol used when rendering amounts. `Config` also
//! owns the home directory layout and hands out the `Store` and `Backup`
//! handles everything else works through.

use crate::backup::Backup;
use crate::fs;
use crate::store::Store;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "outlay";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CHARTS: &str = "charts";
const CONFIG_JSON: &str = "config.json";
const EXPENSES_CSV: &str = "expenses.csv";
const CURRENCY: &str = "$";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$OUTLAY_HOME`; from there it
/// loads `$OUTLAY_HOME/config.json` and provides paths to the other items
/// expected inside the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    charts: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store_path: PathBuf,
}

impl Config {
    /// Opens `dir` as the outlay home, creating the layout on first use.
    ///
    /// On a fresh directory this creates the root, the `.backups/` and
    /// `charts/` subdirectories, and a default `config.json`. On an existing
    /// home it loads and validates the config file.
    ///
    /// # Errors
    /// - Returns an error if any file operation fails or if the config file
    ///   does not belong to this application.
    pub fn load_or_create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        fs::create_dir_all(&maybe_relative)
            .context("Unable to create the outlay home directory")?;
        let root = maybe_relative.canonicalize().context(format!(
            "Unable to canonicalize the outlay home directory {}",
            maybe_relative.display()
        ))?;

        let backups = root.join(BACKUPS);
        fs::create_dir_all(&backups)?;
        let charts = root.join(CHARTS);
        fs::create_dir_all(&charts)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            ConfigFile::default().save(&config_path)?;
        }
        let config_file = ConfigFile::load(&config_path)?;
        let store_path = root.join(&config_file.store_file);

        Ok(Self {
            root,
            backups,
            charts,
            config_path,
            config_file,
            store_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn charts(&self) -> &Path {
        &self.charts
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The symbol prefixed to amounts in rendered tables.
    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    /// Creates a handle to the ledger file.
    pub fn store(&self) -> Store {
        Store::new(&self.store_path)
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "outlay",
///   "config_version": 1,
///   "store_file": "expenses.csv",
///   "backup_copies": 5,
///   "currency": "$"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "outlay"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Ledger file name, relative to the home directory
    #[serde(default = "default_store_file")]
    store_file: String,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// Symbol prefixed to amounts in rendered tables
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_store_file() -> String {
    EXPENSES_CSV.to_string()
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

fn default_currency() -> String {
    CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            store_file: default_store_file(),
            backup_copies: default_backup_copies(),
            currency: default_currency(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it was
    /// written by some other application.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write_all(path, data).context("Unable to write config file")
    }
}
