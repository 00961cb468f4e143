//! Delete command handler.

use crate::{table, Config};
use anyhow::Result;
use tracing::debug;

/// Removes the row at 1-based `position` and persists the remaining rows.
///
/// The ledger is copied into the backups directory before the rewrite, so a
/// deletion can be undone by hand. Deleting the same position twice removes
/// two different records; positions outside `1..=len` are refused.
pub fn delete(config: &Config, position: usize) -> Result<()> {
    let store = config.store();
    if store.path().exists() {
        let backup = config.backup().copy_store()?;
        debug!("ledger backed up to {}", backup.display());
    }
    let (removed, remaining) = store.delete_row(position)?;
    println!(
        "Row {position} has been deleted ({} on {}).",
        removed.description, removed.date
    );
    if remaining == 0 {
        println!("The ledger is now empty.");
        return Ok(());
    }
    println!("Updated data:");
    table::print(&store.load()?, config.currency());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use crate::Error;

    #[test]
    fn test_delete_removes_row_and_backs_up() {
        let env = TestEnv::new();
        let seeded = env.seed();

        delete(&env.config(), 1).unwrap();

        let records = env.config().store().load().unwrap();
        assert_eq!(records.len(), seeded.len() - 1);
        assert_eq!(records[0], seeded[1]);

        // The backup holds the pre-delete ledger.
        let backups: Vec<_> = std::fs::read_dir(env.config().backups())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(backups.len(), 1);
        let backed_up = std::fs::read_to_string(&backups[0]).unwrap();
        assert_eq!(backed_up.lines().count(), seeded.len() + 1);
    }

    #[test]
    fn test_delete_out_of_range_leaves_ledger_alone() {
        let env = TestEnv::new();
        let seeded = env.seed();

        let result = delete(&env.config(), seeded.len() + 1);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::OutOfRange { .. })
        ));
        assert_eq!(env.config().store().load().unwrap(), seeded);
    }

    #[test]
    fn test_delete_missing_file_reports_not_found() {
        let env = TestEnv::new();
        let err = delete(&env.config(), 1).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotFound { .. })
        ));
        // No backup is taken when there is nothing to back up.
        assert_eq!(std::fs::read_dir(env.config().backups()).unwrap().count(), 0);
    }

    #[test]
    fn test_delete_last_row_empties_ledger() {
        let env = TestEnv::new();
        let seeded = env.seed();
        for _ in 0..seeded.len() {
            delete(&env.config(), 1).unwrap();
        }
        assert!(matches!(
            env.config().store().load(),
            Err(Error::EmptyStore)
        ));
    }
}
