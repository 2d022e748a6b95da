//! nmk - tmux launcher
//!
//! Assembles the shell environment around an nmk installation and replaces
//! itself with tmux (or a login shell running inside it).

use std::time::Instant;

use nmk_utils::{init_logging_with_config, LogConfig, Result};

mod cli;
mod dispatch;
mod entrypoint;
mod launch;
mod search;
mod timing;
mod tmux;
mod zsh;

use cli::Args;

fn main() {
    let start = Instant::now();
    // Parse command-line arguments first (before logging setup)
    let args = Args::parse_args();

    if let Err(e) = run(&args, start) {
        tracing::error!("nmk error: {}", e);
        eprintln!("nmk: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: &Args, start: Instant) -> Result<()> {
    init_logging_with_config(LogConfig::from_verbosity(args.debug, args.verbose))?;
    tracing::debug!("CLI args: {:?}", args);

    let launch = entrypoint::prepare(args)?;
    timing::report_usage(start, args.usage);
    Err(launch.exec())
}
