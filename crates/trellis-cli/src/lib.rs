//! # trellis-cli
//!
//! `trellis` binary: argument parsing, runtime wiring, and one module per
//! subcommand. `main.rs` only parses and maps the outcome to an exit code.

pub mod args;
pub mod commands;
pub mod exit;
pub mod runtime;

pub use args::{Cli, Command};
pub use exit::CliExitCode;

use std::io::Write;

use tracing::debug;

use crate::runtime::Runtime;

/// Run one parsed invocation. `Err` means the process could not start
/// (bad config, unreadable files, unopenable store).
pub async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<CliExitCode> {
    let config = runtime::load_config(cli.config.as_deref(), cli.db.as_deref())?;
    trellis_observability::init_tracing_with(&config.observability, cli.log.as_deref());
    debug!(command = cli.command.name(), "starting");

    match cli.command {
        Command::Describe => commands::describe::run(out),
        Command::Query(args) => {
            let runtime = Runtime::open(config)?;
            commands::query::run(&runtime, &args, out).await
        }
        Command::Serve => {
            let runtime = Runtime::open(config)?;
            commands::serve::run(&runtime).await
        }
        Command::Import(args) => {
            let runtime = Runtime::open(config)?;
            commands::import::run(&runtime, &args, out)
        }
    }
}
