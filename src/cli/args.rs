//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Fill a `.ts` catalog from the mapping table
//! - `missing`: Report source strings with no mapping entry
//! - `extract`: List translatable string literals found in sources
//! - `init`: Initialize tssync configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Catalog file to update (overrides config file)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Mapping table (overrides config file)
    #[arg(long)]
    pub map: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MissingCommand {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Mapping table (overrides config file)
    #[arg(long)]
    pub map: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// List every marked literal, not only those needing translation
    #[arg(long)]
    pub all: bool,

    /// Group literals by the file they occur in
    #[arg(long)]
    pub by_file: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fill catalog translations from the mapping table and mark the rest unfinished
    Sync(SyncCommand),
    /// Report source strings that need translation but have no mapping entry
    Missing(MissingCommand),
    /// List string literals passed to translation markers
    Extract(ExtractCommand),
    /// Initialize a new .tssyncrc.json configuration file
    Init,
}
