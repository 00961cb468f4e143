//! The interactive menu.
//!
//! Running `outlay` with no subcommand lands here. The menu is a lookup
//! table from a 1-based choice to the same tagged `Command` values the CLI
//! parser produces, so both entry points funnel through one dispatch path.
//! Recoverable problems (bad input, an out-of-range row, a refused filter)
//! print their reason and return to the menu; only hard failures exit.

use crate::args::{AddArgs, ChartCommand, Command, DeleteArgs, FilterArgs, FilterCommand, SortArgs};
use crate::model::{Amount, Category, ExpenseRecord, ALL_CATEGORIES, HEADERS};
use crate::report::aggregate;
use crate::report::query::{self, SortKey, SortOrder, ThresholdMode};
use crate::{commands, table, Config, Error};
use anyhow::Result;
use chrono::{Local, Month, NaiveDate};
use std::io::{self, BufRead, StdinLock, Write};

/// Menu entries in display order: the label shown to the user and the
/// command the choice stands for.
const MENU: [(&str, fn() -> Command); 8] = [
    ("Add an expense", || Command::Add(AddArgs::default())),
    ("Delete a row", || Command::Delete(DeleteArgs::default())),
    ("Daily spending chart", || {
        Command::Chart(ChartCommand::Daily { no_open: false })
    }),
    ("Monthly spending chart", || {
        Command::Chart(ChartCommand::Monthly { no_open: false })
    }),
    ("Monthly spending by category", || {
        Command::Chart(ChartCommand::Categories {
            month: None,
            no_open: false,
        })
    }),
    ("Open the expense file", || Command::Open),
    ("Sort the current data", || Command::Sort(SortArgs::default())),
    ("Filter the current data", || {
        Command::Filter(FilterArgs::default())
    }),
];

/// Reads choices and values from `input`, prompting on stdout.
///
/// Prompts that fail to parse re-ask in place; end of input cancels the
/// current prompt and, at the menu, ends the session.
pub struct Shell<R> {
    input: R,
}

impl Shell<StdinLock<'static>> {
    /// A shell reading from standard input.
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl Default for Shell<StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> Shell<R> {
    /// Shows the menu until the user quits or input runs out.
    pub fn run(&mut self, config: &Config) -> Result<()> {
        loop {
            println!();
            println!("What would you like to do?");
            for (ix, (label, _)) in MENU.iter().enumerate() {
                println!("  {}. {label}", ix + 1);
            }
            let message = format!("Enter a number between 1 and {}, or q to quit: ", MENU.len());
            let Some(choice) = self.read_line(&message)? else {
                return Ok(());
            };
            if choice.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            let entry = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|ix| MENU.get(ix));
            let Some((_, build)) = entry else {
                println!(
                    "Invalid input, please enter a number between 1 and {} or q.",
                    MENU.len()
                );
                continue;
            };
            if let Err(e) = self.dispatch(config, build()) {
                match e.downcast_ref::<Error>() {
                    Some(inner) if inner.is_recoverable() => println!("{inner}"),
                    _ => return Err(e),
                }
            }
        }
    }

    /// Runs one command, prompting for whatever it left unspecified.
    pub fn dispatch(&mut self, config: &Config, command: Command) -> Result<()> {
        match command {
            Command::Add(args) => self.add(config, args),
            Command::Delete(args) => self.delete(config, args),
            Command::Chart(command) => self.chart(config, command),
            Command::Open => commands::open(config),
            Command::List => commands::list(config),
            Command::Sort(args) => self.sort(config, args),
            Command::Filter(args) => self.filter(config, args),
        }
    }

    fn add(&mut self, config: &Config, args: AddArgs) -> Result<()> {
        let category = match args.category {
            Some(category) => category,
            None => match self.read_category()? {
                Some(category) => category,
                None => return Ok(()),
            },
        };
        let amount = match args.amount {
            Some(amount) => amount,
            None => match self.read_amount("Please enter the amount: ")? {
                Some(amount) => amount,
                None => return Ok(()),
            },
        };
        let description = match args.description {
            Some(description) => description,
            None => match self.read_line("Please enter details of the expense: ")? {
                Some(description) => description,
                None => return Ok(()),
            },
        };
        let date = args.date.unwrap_or_else(|| Local::now().date_naive());
        commands::add(config, ExpenseRecord::new(date, category, amount, description))
    }

    fn delete(&mut self, config: &Config, args: DeleteArgs) -> Result<()> {
        let position = match args.row {
            Some(row) => row,
            None => {
                let Some(records) = commands::load_or_report(config)? else {
                    return Ok(());
                };
                println!("Current data:");
                table::print(&records, config.currency());
                match self.read_row()? {
                    Some(row) => row,
                    None => return Ok(()),
                }
            }
        };
        commands::delete(config, position)
    }

    fn chart(&mut self, config: &Config, command: ChartCommand) -> Result<()> {
        match command {
            ChartCommand::Daily { no_open } => {
                commands::chart_daily(config, !no_open).map(|_| ())
            }
            ChartCommand::Monthly { no_open } => {
                commands::chart_monthly(config, !no_open).map(|_| ())
            }
            ChartCommand::Categories { month, no_open } => {
                let month = match month {
                    Some(name) => aggregate::month_from_name(&name)?,
                    None => match self.read_month()? {
                        Some(month) => month,
                        None => return Ok(()),
                    },
                };
                commands::chart_categories(config, month, !no_open).map(|_| ())
            }
        }
    }

    fn sort(&mut self, config: &Config, args: SortArgs) -> Result<()> {
        let (key, order) = match args.key {
            Some(key) => (key, args.order.unwrap_or_default()),
            None => match self.read_sort_choice(args.order)? {
                Some(choice) => choice,
                None => return Ok(()),
            },
        };
        commands::sort(config, key, order)
    }

    fn filter(&mut self, config: &Config, args: FilterArgs) -> Result<()> {
        let Some(records) = commands::load_or_report(config)? else {
            return Ok(());
        };
        let command = match args.command {
            Some(command) => command,
            None => match self.read_filter_choice()? {
                Some(command) => command,
                None => return Ok(()),
            },
        };
        match command {
            FilterCommand::Dates { start, end } => self.filter_dates(config, &records, start, end),
            FilterCommand::Amount { mode, threshold } => {
                self.filter_amount(config, &records, mode, threshold)
            }
            FilterCommand::Category { category } => {
                self.filter_category(config, &records, category)
            }
        }
    }

    fn filter_dates(
        &mut self,
        config: &Config,
        records: &[ExpenseRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<()> {
        // Fully specified on the command line: refusals are final.
        if let (Some(start), Some(end)) = (start, end) {
            let view = query::filter_by_dates(records, start, end)?;
            return show_filtered(config, &view);
        }
        if let Some((min, max)) = query::date_span(records) {
            println!("Recorded dates span {min} to {max}.");
        }
        loop {
            let Some(start) = self.read_date("Please enter the start date (YYYY-MM-DD): ")? else {
                return Ok(());
            };
            let Some(end) = self.read_date("Please enter the end date (YYYY-MM-DD): ")? else {
                return Ok(());
            };
            match query::filter_by_dates(records, start, end) {
                Ok(view) => return show_filtered(config, &view),
                Err(e) => println!("{e}"),
            }
        }
    }

    fn filter_amount(
        &mut self,
        config: &Config,
        records: &[ExpenseRecord],
        mode: Option<ThresholdMode>,
        threshold: Option<Amount>,
    ) -> Result<()> {
        if let (Some(mode), Some(threshold)) = (mode, threshold) {
            let view = query::filter_by_amount(records, mode, threshold)?;
            return show_filtered(config, &view);
        }
        let mode = match mode {
            Some(mode) => mode,
            None => match self.read_threshold_mode()? {
                Some(mode) => mode,
                None => return Ok(()),
            },
        };
        loop {
            let Some(threshold) = self.read_amount("Please enter the amount: ")? else {
                return Ok(());
            };
            match query::filter_by_amount(records, mode, threshold) {
                Ok(view) => return show_filtered(config, &view),
                Err(e) => println!("{e}"),
            }
        }
    }

    fn filter_category(
        &mut self,
        config: &Config,
        records: &[ExpenseRecord],
        category: Option<Category>,
    ) -> Result<()> {
        if let Some(category) = category {
            let view = query::filter_by_category(records, category)?;
            return show_filtered(config, &view);
        }
        println!("Categories with recorded expenses:");
        for category in query::categories_present(records) {
            println!("  {category}");
        }
        loop {
            let Some(line) = self.read_line("Enter the category to filter by: ")? else {
                return Ok(());
            };
            let category = match line.parse::<Category>() {
                Ok(category) => category,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            match query::filter_by_category(records, category) {
                Ok(view) => return show_filtered(config, &view),
                Err(e) => println!("{e}"),
            }
        }
    }

    fn read_category(&mut self) -> Result<Option<Category>> {
        println!("Please select one of the categories:");
        for (ix, category) in ALL_CATEGORIES.iter().enumerate() {
            println!("  {}. {category}", ix + 1);
        }
        loop {
            let Some(choice) = self.read_line("Enter the number of your choice: ")? else {
                return Ok(None);
            };
            match choice.parse::<usize>().ok().and_then(Category::from_index) {
                Some(category) => return Ok(Some(category)),
                None => println!(
                    "Invalid option, please enter a number between 1 and {}.",
                    ALL_CATEGORIES.len()
                ),
            }
        }
    }

    fn read_amount(&mut self, message: &str) -> Result<Option<Amount>> {
        loop {
            let Some(line) = self.read_line(message)? else {
                return Ok(None);
            };
            match line.parse::<Amount>() {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) => println!("{e}, please try again"),
            }
        }
    }

    fn read_date(&mut self, message: &str) -> Result<Option<NaiveDate>> {
        loop {
            let Some(line) = self.read_line(message)? else {
                return Ok(None);
            };
            match line.parse::<NaiveDate>() {
                Ok(date) => return Ok(Some(date)),
                Err(_) => println!("Please enter the date in YYYY-MM-DD format."),
            }
        }
    }

    fn read_row(&mut self) -> Result<Option<usize>> {
        loop {
            let Some(line) = self.read_line("Please enter the row number to delete: ")? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(row) => return Ok(Some(row)),
                Err(_) => println!("Invalid input, please enter a row number."),
            }
        }
    }

    fn read_month(&mut self) -> Result<Option<Month>> {
        loop {
            let Some(line) = self.read_line("Please enter a month name, e.g. August: ")? else {
                return Ok(None);
            };
            match aggregate::month_from_name(&line) {
                Ok(month) => return Ok(Some(month)),
                Err(e) => println!("{e}, please try again"),
            }
        }
    }

    fn read_sort_choice(
        &mut self,
        order: Option<SortOrder>,
    ) -> Result<Option<(SortKey, SortOrder)>> {
        let order = match order {
            Some(order) => order,
            None => loop {
                let message = "Sort in ascending or descending order? Enter A or D: ";
                let Some(choice) = self.read_line(message)? else {
                    return Ok(None);
                };
                match choice.to_ascii_lowercase().as_str() {
                    "a" => break SortOrder::Asc,
                    "d" => break SortOrder::Desc,
                    _ => println!("Please press A for ascending or D for descending."),
                }
            },
        };
        println!("How would you like to sort?");
        // menu positions line up with SortKey::from_index
        for (ix, name) in HEADERS.iter().enumerate() {
            println!("  {}. {name}", ix + 1);
        }
        loop {
            let Some(choice) = self.read_line("Enter the number of your choice: ")? else {
                return Ok(None);
            };
            match choice.parse::<usize>().ok().and_then(SortKey::from_index) {
                Some(key) => return Ok(Some((key, order))),
                None => println!("Please enter a number between 1 and {}.", HEADERS.len()),
            }
        }
    }

    fn read_filter_choice(&mut self) -> Result<Option<FilterCommand>> {
        loop {
            let message =
                "Enter 'a' to filter by date range, 'b' by amount, 'c' by category: ";
            let Some(choice) = self.read_line(message)? else {
                return Ok(None);
            };
            match choice.to_ascii_lowercase().as_str() {
                "a" => return Ok(Some(FilterCommand::Dates { start: None, end: None })),
                "b" => {
                    return Ok(Some(FilterCommand::Amount {
                        mode: None,
                        threshold: None,
                    }))
                }
                "c" => return Ok(Some(FilterCommand::Category { category: None })),
                _ => println!("Invalid option, please choose 'a', 'b' or 'c'."),
            }
        }
    }

    fn read_threshold_mode(&mut self) -> Result<Option<ThresholdMode>> {
        loop {
            let message =
                "Enter 'l' to keep amounts below the threshold or 'g' to keep amounts above: ";
            let Some(choice) = self.read_line(message)? else {
                return Ok(None);
            };
            match choice.to_ascii_lowercase().as_str() {
                "l" => return Ok(Some(ThresholdMode::Less)),
                "g" => return Ok(Some(ThresholdMode::Greater)),
                _ => println!("Invalid option, please choose 'l' or 'g'."),
            }
        }
    }

    /// Prompts once. `None` means the input is exhausted.
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        print!("{message}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn show_filtered(config: &Config, view: &[ExpenseRecord]) -> Result<()> {
    println!("Filtered data:");
    table::print(view, config.currency());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use std::io::Cursor;

    fn shell(input: &str) -> Shell<Cursor<Vec<u8>>> {
        Shell {
            input: Cursor::new(input.as_bytes().to_vec()),
        }
    }

    #[test]
    fn test_quit_immediately() {
        let env = TestEnv::new();
        assert!(shell("q\n").run(&env.config()).is_ok());
    }

    #[test]
    fn test_end_of_input_exits() {
        let env = TestEnv::new();
        assert!(shell("").run(&env.config()).is_ok());
    }

    #[test]
    fn test_invalid_choices_reprompt() {
        let env = TestEnv::new();
        assert!(shell("17\nnope\n\nq\n").run(&env.config()).is_ok());
    }

    #[test]
    fn test_menu_add_writes_record() {
        let env = TestEnv::new();
        // choice 1 (add), category 1 (Food), amount, description, then quit
        shell("1\n1\n12.50\ncoffee and cake\nq\n")
            .run(&env.config())
            .unwrap();

        let records = env.config().store().load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, Category::Food);
        assert_eq!(records[0].amount.to_string(), "12.50");
        assert_eq!(records[0].description, "coffee and cake");
        assert_eq!(records[0].date, Local::now().date_naive());
    }

    #[test]
    fn test_menu_add_reprompts_bad_amount() {
        let env = TestEnv::new();
        shell("1\n1\nten\n-4\n10\nsnack\nq\n").run(&env.config()).unwrap();
        let records = env.config().store().load().unwrap();
        assert_eq!(records[0].amount.to_string(), "10.00");
    }

    #[test]
    fn test_menu_delete_row() {
        let env = TestEnv::new();
        let seeded = env.seed();
        shell("2\n1\nq\n").run(&env.config()).unwrap();
        let records = env.config().store().load().unwrap();
        assert_eq!(records.len(), seeded.len() - 1);
        assert_eq!(records[0], seeded[1]);
    }

    #[test]
    fn test_menu_delete_out_of_range_returns_to_menu() {
        let env = TestEnv::new();
        let seeded = env.seed();
        shell("2\n99\nq\n").run(&env.config()).unwrap();
        assert_eq!(env.config().store().load().unwrap(), seeded);
    }

    #[test]
    fn test_menu_filter_by_category() {
        let env = TestEnv::new();
        env.seed();
        // choice 8 (filter), 'c', a category that exists, then quit
        assert!(shell("8\nc\nfood\nq\n").run(&env.config()).is_ok());
    }

    #[test]
    fn test_menu_filter_absent_category_reprompts() {
        let env = TestEnv::new();
        env.seed();
        // Utilities has no records, Food does
        assert!(shell("8\nc\nutilities\nfood\nq\n").run(&env.config()).is_ok());
    }

    #[test]
    fn test_read_category_reprompts_until_valid() {
        let mut sh = shell("0\n9\nfood\n3\n");
        let category = sh.read_category().unwrap();
        assert_eq!(category, Some(Category::Utilities));
    }

    #[test]
    fn test_read_month_reprompts_until_valid() {
        let mut sh = shell("Augst\naugust\n");
        assert_eq!(sh.read_month().unwrap(), Some(Month::August));
    }

    #[test]
    fn test_read_sort_choice_descending_amount() {
        let mut sh = shell("d\n3\n");
        let choice = sh.read_sort_choice(None).unwrap();
        assert_eq!(choice, Some((SortKey::Amount, SortOrder::Desc)));
    }

    #[test]
    fn test_read_sort_choice_keeps_given_order() {
        let mut sh = shell("2\n");
        let choice = sh.read_sort_choice(Some(SortOrder::Desc)).unwrap();
        assert_eq!(choice, Some((SortKey::Category, SortOrder::Desc)));
    }

    #[test]
    fn test_dispatch_cli_filter_refusal_is_an_error() {
        let env = TestEnv::new();
        env.seed();
        let command = Command::Filter(FilterArgs {
            command: Some(FilterCommand::Category {
                category: Some(Category::Utilities),
            }),
        });
        let result = shell("").dispatch(&env.config(), command);
        assert!(result.is_err());
    }

    #[test]
    fn test_dispatch_sort_defaults_to_ascending() {
        let env = TestEnv::new();
        env.seed();
        let command = Command::Sort(SortArgs {
            key: Some(SortKey::Date),
            order: None,
        });
        assert!(shell("").dispatch(&env.config(), command).is_ok());
    }
}
