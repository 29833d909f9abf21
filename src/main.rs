use std::process::ExitCode;

use clap::Parser;
use tradux::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Arguments::parse();

    let default_filter = if args.verbose() { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    match tradux::cli::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitStatus::Error.into()
        }
    }
}
