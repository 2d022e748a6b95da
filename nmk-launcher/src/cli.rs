//! Command-line argument parsing for nmk
//!
//! Uses clap for argument parsing with derive macros.

use clap::{ArgAction, Parser};
use nmk_env::ColorOptions;

/// Default tmux socket name
pub const DEFAULT_SOCKET: &str = "nmk";

/// nmk - start or attach to the nmk tmux session
#[derive(Parser, Debug)]
#[command(name = "nmk", author, version, about, long_about = None)]
pub struct Args {
    /// Force tmux to assume the terminal supports 256 colors
    #[arg(short = '2', default_value_t = false)]
    pub force_256_color: bool,

    /// Use a different tmux socket name
    #[arg(short = 'L', long, default_value = DEFAULT_SOCKET)]
    pub socket: String,

    /// Start a login shell instead of tmux
    #[arg(short = 'l', long)]
    pub login: bool,

    /// Destroy the client session when its last window closes
    #[arg(long)]
    pub detach_on_destroy: bool,

    /// Leave the environment as it is
    ///
    /// Disables the container color fix and the zsh global rc workaround.
    #[arg(long)]
    pub no_autofix: bool,

    /// Allow attaching from inside another tmux session
    #[arg(long)]
    pub inception: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the time spent before tmux takes over
    #[arg(long)]
    pub usage: bool,

    /// Print the message of the day first (for ssh logins)
    #[arg(long)]
    pub ssh: bool,

    /// Arguments passed through to tmux
    ///
    /// Example: nmk ls
    /// Example: nmk -- new-session -s work
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tmux_args: Vec<String>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn autofix(&self) -> bool {
        !self.no_autofix
    }

    pub fn color_options(&self) -> ColorOptions {
        ColorOptions {
            force_256_color: self.force_256_color,
            autofix: self.autofix(),
        }
    }
}
