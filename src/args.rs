//! These structs provide the CLI interface for outlay.

use crate::model::{Amount, Category};
use crate::report::query::{SortKey, SortOrder, ThresholdMode};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// outlay: a terminal expense tracker.
///
/// Expenses live in a plain CSV file under the outlay home directory, one row
/// per expense with its date, category, amount and description. Run outlay
/// with no subcommand for an interactive menu; every menu action is also a
/// subcommand, and details a subcommand leaves out are prompted for.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a new expense.
    ///
    /// All details can be given as arguments, e.g. `outlay add food 12.50
    /// "lunch at the corner cafe"`; anything omitted is prompted for. The
    /// date defaults to today.
    Add(AddArgs),
    /// Delete one row by its 1-based position.
    ///
    /// The ledger file is copied into the backups directory before the row
    /// is removed.
    Delete(DeleteArgs),
    /// Render a spending chart as an SVG file.
    #[command(subcommand)]
    Chart(ChartCommand),
    /// Open the expense file with its default application.
    Open,
    /// Show the expense table.
    List,
    /// Show the expense table ordered by a column.
    Sort(SortArgs),
    /// Show the expense table filtered by dates, amount or category.
    Filter(FilterArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// The directory where outlay data and configuration is held.
    /// Defaults to ~/.outlay
    #[arg(long, env = "OUTLAY_HOME", default_value_t = default_outlay_home())]
    home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `outlay add` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct AddArgs {
    /// The expense category, e.g. food.
    ///
    /// One of: food, transport, utilities, entertainment, healthcare,
    /// education, rent, others.
    pub category: Option<Category>,

    /// The amount spent, e.g. 12.50. A leading currency sign is accepted.
    pub amount: Option<Amount>,

    /// What the money went on.
    pub description: Option<String>,

    /// The expense date, e.g. 2024-08-14. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Args for the `outlay delete` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct DeleteArgs {
    /// The 1-based row number to delete.
    pub row: Option<usize>,
}

/// The spending charts.
#[derive(Subcommand, Debug, Clone)]
pub enum ChartCommand {
    /// Day-by-day spending across the whole ledger, as a line chart.
    ///
    /// Days without expenses between the first and last recorded date are
    /// drawn as zero.
    Daily {
        /// Write the SVG without opening it.
        #[arg(long)]
        no_open: bool,
    },
    /// Month-by-month totals, as a bar chart.
    Monthly {
        /// Write the SVG without opening it.
        #[arg(long)]
        no_open: bool,
    },
    /// Per-category totals for one month, as a donut chart.
    ///
    /// The month is matched by name only, so records from every year that
    /// shares the month are pooled.
    Categories {
        /// A month name, e.g. august.
        month: Option<String>,

        /// Write the SVG without opening it.
        #[arg(long)]
        no_open: bool,
    },
}

/// Args for the `outlay sort` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SortArgs {
    /// The column to sort by.
    pub key: Option<SortKey>,

    /// The sort direction. Defaults to ascending.
    #[arg(long)]
    pub order: Option<SortOrder>,
}

/// Args for the `outlay filter` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct FilterArgs {
    #[command(subcommand)]
    pub command: Option<FilterCommand>,
}

/// The expense filters.
#[derive(Subcommand, Debug, Clone)]
pub enum FilterCommand {
    /// Keep rows dated within an inclusive range.
    ///
    /// Both dates must fall inside the span the ledger actually covers.
    Dates {
        /// The start date, e.g. 2024-08-01.
        start: Option<NaiveDate>,

        /// The end date, e.g. 2024-08-31.
        end: Option<NaiveDate>,
    },
    /// Keep rows strictly below or strictly above an amount.
    Amount {
        /// Which side of the threshold to keep.
        mode: Option<ThresholdMode>,

        /// The threshold amount.
        threshold: Option<Amount>,
    },
    /// Keep rows in one category.
    Category {
        /// A category name, e.g. food.
        category: Option<Category>,
    },
}

fn default_outlay_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join(".outlay"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or OUTLAY_HOME instead of relying on the default outlay \
                home directory. If you continue using the program right now, your data will land \
                in ./outlay",
            );
            PathBuf::from("outlay")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
