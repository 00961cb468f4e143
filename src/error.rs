//! Error types shared across the crate.
//!
//! Interactive flows inspect these variants to decide between re-prompting
//! and reporting, so each failure class is a distinct value rather than a
//! bare message. The binary boundary in `main.rs` still collects everything
//! into `anyhow` for context-rich exit logging.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Raw user input that could not be read as the requested type.
    #[error("unable to parse '{value}' as {what}")]
    Parse { what: &'static str, value: String },

    /// A well-formed value outside the acceptable domain.
    #[error("{message}")]
    Validation { message: String },

    /// A 1-based row position outside the current table.
    #[error("row {position} is out of range, the table has {len} rows")]
    OutOfRange { position: usize, len: usize },

    /// The store file does not exist yet.
    #[error("no expense file found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The store file exists but holds no data rows.
    #[error("the expense file has no records")]
    EmptyStore,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn parse(what: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            what,
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for the two read-side conditions that degrade to a "no data"
    /// report instead of failing the command.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::EmptyStore)
    }

    /// True when the user can fix the problem by entering something else.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Validation { .. } | Self::OutOfRange { .. }
        ) || self.is_no_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_classification() {
        assert!(Error::NotFound {
            path: PathBuf::from("/tmp/x.csv")
        }
        .is_no_data());
        assert!(Error::EmptyStore.is_no_data());
        assert!(!Error::parse("amount", "abc").is_no_data());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::parse("date", "08/01/2024").is_recoverable());
        assert!(Error::validation("threshold too low").is_recoverable());
        assert!(Error::OutOfRange {
            position: 9,
            len: 3
        }
        .is_recoverable());
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let e = Error::parse("amount", "12x.0");
        assert_eq!(e.to_string(), "unable to parse '12x.0' as amount");
        let e = Error::OutOfRange {
            position: 5,
            len: 2,
        };
        assert_eq!(e.to_string(), "row 5 is out of range, the table has 2 rows");
    }
}
