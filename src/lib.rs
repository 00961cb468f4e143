//! A terminal expense tracker over a CSV ledger.

mod backup;
mod chart;
mod config;
mod error;
mod fs;
mod store;
mod table;

pub mod args;
pub mod commands;
pub mod model;
pub mod report;
pub mod shell;

pub use backup::Backup;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use store::Store;
