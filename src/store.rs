//! The tabular store: a CSV ledger file with one header row.
//!
//! `Store` is an explicit handle over the ledger path. Nothing here caches
//! rows between calls; every operation reads the file fresh and the
//! load-modify-overwrite cycle is not guarded against concurrent writers.

use crate::error::{Error, Result};
use crate::model::{ExpenseRecord, HEADERS};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Handle to the on-disk expense ledger.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in file order.
    ///
    /// Rows that fail to parse are skipped with a warning rather than
    /// failing the whole read. Returns `NotFound` when the file is missing
    /// and `EmptyStore` when it holds no parseable data rows.
    pub fn load(&self) -> Result<Vec<ExpenseRecord>> {
        if !self.path.exists() {
            return Err(Error::NotFound {
                path: self.path.clone(),
            });
        }
        let file = std::fs::File::open(&self.path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for (ix, result) in rdr.deserialize().enumerate() {
            match result {
                Ok(record) => records.push(record),
                // Row numbers are 1-based and offset past the header.
                Err(e) => warn!("skipping unreadable row {}: {e}", ix + 2),
            }
        }
        if records.is_empty() {
            return Err(Error::EmptyStore);
        }
        debug!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Appends one record, writing the header first when the file is
    /// missing or zero-length.
    pub fn append(&self, record: &ExpenseRecord) -> Result<()> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            wtr.write_record(HEADERS)?;
        }
        wtr.serialize(record)?;
        wtr.flush()?;
        debug!("appended a record to {}", self.path.display());
        Ok(())
    }

    /// Rewrites the whole file from `records`, header included.
    ///
    /// This is a full overwrite, not an in-place patch: anything another
    /// writer changed since the last load is lost.
    pub fn overwrite(&self, records: &[ExpenseRecord]) -> Result<()> {
        let file = std::fs::File::create(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record(HEADERS)?;
        for record in records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        debug!(
            "wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Deletes the record at 1-based `position` and persists the rest.
    ///
    /// Returns the removed record and the number of rows remaining.
    pub fn delete_row(&self, position: usize) -> Result<(ExpenseRecord, usize)> {
        let mut records = self.load()?;
        let removed = remove_row(&mut records, position)?;
        self.overwrite(&records)?;
        Ok((removed, records.len()))
    }
}

/// Removes the record at 1-based `position`, shifting later rows up.
pub(crate) fn remove_row(
    records: &mut Vec<ExpenseRecord>,
    position: usize,
) -> Result<ExpenseRecord> {
    if position < 1 || position > records.len() {
        return Err(Error::OutOfRange {
            position,
            len: records.len(),
        });
    }
    Ok(records.remove(position - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Category};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn record(day: u32, category: Category, amount: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
            category,
            Amount::from_str(amount).unwrap(),
            format!("entry {day}"),
        )
    }

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Store::new(dir.path().join("expenses.csv"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_file() {
        let (_dir, store) = temp_store();
        assert!(matches!(store.load(), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_load_header_only_file() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "Date,Category,Amount,Description\n").unwrap();
        assert!(matches!(store.load(), Err(Error::EmptyStore)));
    }

    #[test]
    fn test_load_zero_byte_file() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "").unwrap();
        assert!(matches!(store.load(), Err(Error::EmptyStore)));
    }

    #[test]
    fn test_append_writes_header_once() {
        let (_dir, store) = temp_store();
        store.append(&record(1, Category::Food, "10")).unwrap();
        store.append(&record(2, Category::Rent, "950")).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            text,
            "Date,Category,Amount,Description\n\
             2024-08-01,Food,10.00,entry 1\n\
             2024-08-02,Rent,950.00,entry 2\n"
        );
    }

    #[test]
    fn test_append_to_zero_byte_file_writes_header() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "").unwrap();
        store.append(&record(1, Category::Food, "10")).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("Date,Category,Amount,Description\n"));
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let (_dir, store) = temp_store();
        let original = record(5, Category::Transport, "3.25");
        store.append(&original).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![original]);
    }

    #[test]
    fn test_load_skips_unreadable_rows() {
        let (_dir, store) = temp_store();
        std::fs::write(
            store.path(),
            "Date,Category,Amount,Description\n\
             2024-08-01,Food,10.00,lunch\n\
             not-a-date,Food,1.00,bad\n\
             2024-08-02,Snacks,1.00,unknown category\n\
             2024-08-03,Rent,950.00,rent\n",
        )
        .unwrap();
        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "lunch");
        assert_eq!(records[1].description, "rent");
    }

    #[test]
    fn test_overwrite_empty_leaves_header() {
        let (_dir, store) = temp_store();
        store.append(&record(1, Category::Food, "10")).unwrap();
        store.overwrite(&[]).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "Date,Category,Amount,Description\n");
        assert!(matches!(store.load(), Err(Error::EmptyStore)));
    }

    #[test]
    fn test_delete_row_removes_exactly_one() {
        let (_dir, store) = temp_store();
        let rows = vec![
            record(1, Category::Food, "10"),
            record(2, Category::Rent, "950"),
            record(3, Category::Others, "4.50"),
        ];
        store.overwrite(&rows).unwrap();

        let (removed, remaining) = store.delete_row(2).unwrap();
        assert_eq!(removed, rows[1]);
        assert_eq!(remaining, 2);

        let after = store.load().unwrap();
        assert_eq!(after, vec![rows[0].clone(), rows[2].clone()]);
    }

    #[test]
    fn test_delete_is_not_idempotent() {
        // Each delete consumes a row; repeating the same position hits a
        // different record or runs off the end.
        let (_dir, store) = temp_store();
        store
            .overwrite(&[
                record(1, Category::Food, "10"),
                record(2, Category::Rent, "950"),
            ])
            .unwrap();
        let (first, _) = store.delete_row(2).unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 8, 2).unwrap());
        assert!(matches!(
            store.delete_row(2),
            Err(Error::OutOfRange { position: 2, len: 1 })
        ));
    }

    #[test]
    fn test_delete_position_bounds() {
        let (_dir, store) = temp_store();
        store.overwrite(&[record(1, Category::Food, "10")]).unwrap();
        assert!(matches!(
            store.delete_row(0),
            Err(Error::OutOfRange { position: 0, len: 1 })
        ));
        assert!(matches!(
            store.delete_row(2),
            Err(Error::OutOfRange { position: 2, len: 1 })
        ));
        assert!(store.delete_row(1).is_ok());
    }

    #[test]
    fn test_remove_row_preserves_order() {
        let mut records = vec![
            record(1, Category::Food, "1"),
            record(2, Category::Food, "2"),
            record(3, Category::Food, "3"),
        ];
        let removed = remove_row(&mut records, 1).unwrap();
        assert_eq!(removed.amount.to_string(), "1.00");
        assert_eq!(records[0].amount.to_string(), "2.00");
        assert_eq!(records[1].amount.to_string(), "3.00");
    }
}
