use clap::Parser;
use outlay::args::Args;
use outlay::shell::Shell;
use outlay::Config;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    trace!("{args:?}");
    let config = Config::load_or_create(args.common().home().path())?;
    let mut shell = Shell::new();
    match args.command().cloned() {
        Some(command) => shell.dispatch(&config, command),
        None => shell.run(&config),
    }
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG wins when set.
        Some(_) => EnvFilter::from_default_env(),
        // Otherwise apply the requested level to this crate only.
        None => EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
