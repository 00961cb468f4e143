//! Open command handler.

use crate::Config;
use anyhow::{ensure, Context, Result};
use std::path::Path;
use std::process;
use tracing::debug;

/// Hands the ledger file to whatever the desktop associates with CSV files.
pub fn open(config: &Config) -> Result<()> {
    let path = config.store_path();
    if !path.exists() {
        println!("No expense file found at {}. Add an expense first.", path.display());
        return Ok(());
    }
    println!("Opening {} in your default application.", path.display());
    reveal(path)
}

/// Asks the operating system to open `path` with its default application.
pub(crate) fn reveal(path: &Path) -> Result<()> {
    let mut command = opener(path);
    debug!("running {command:?}");
    let status = command
        .status()
        .with_context(|| format!("unable to run {command:?}"))?;
    ensure!(status.success(), "the file opener exited with {status}");
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> process::Command {
    let mut command = process::Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener(path: &Path) -> process::Command {
    let mut command = process::Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(path: &Path) -> process::Command {
    let mut command = process::Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_open_missing_file_is_not_an_error() {
        let env = TestEnv::new();
        assert!(open(&env.config()).is_ok());
    }

    #[test]
    fn test_opener_targets_the_given_path() {
        let command = opener(Path::new("/tmp/expenses.csv"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.last().map(|a| a.to_str()), Some(Some("/tmp/expenses.csv")));
    }
}
