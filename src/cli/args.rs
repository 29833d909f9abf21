//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: parse per-language modules and write one catalog per target
//!   language
//! - `generate`: parse catalogs and write translated modules per target
//!   language
//! - `init`: write a default `.traduxrc.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Common arguments shared by the conversion commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Package root directory (file paths are relativized against it)
    #[arg(long, default_value = ".")]
    pub package: PathBuf,

    /// Target language (repeatable; overrides the config file)
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Default language code (overrides the config file)
    #[arg(long)]
    pub default_language: Option<String>,

    /// Directory the generated files are written to
    #[arg(short, long, default_value = "out")]
    pub out: PathBuf,

    /// Input files or directories
    pub inputs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract module text into translation catalogs
    Extract(ExtractCommand),
    /// Regenerate per-language modules from edited catalogs
    Generate(GenerateCommand),
    /// Initialize a new .traduxrc.json configuration file
    Init,
}

impl Arguments {
    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.verbose,
            Some(Command::Generate(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}
