//! Command-line interface layer.

use anyhow::Result;

pub mod args;
pub mod commands;
mod context;
pub mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Sync(cmd)) => commands::sync::sync(cmd),
        Some(Command::Missing(cmd)) => commands::missing::missing(cmd),
        Some(Command::Extract(cmd)) => commands::extract::extract(cmd),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
