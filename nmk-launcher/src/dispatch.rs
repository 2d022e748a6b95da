//! Session dispatch
//!
//! Decides whether to attach to a running server, pass a command through to
//! it, bootstrap a new one or start a login shell, and turns that decision
//! into the tmux argument vector.

use std::path::{Path, PathBuf};

use nmk_env::names::TMUX;
use nmk_env::EnvMap;
use nmk_utils::{NmkError, Result};

use crate::launch::Launch;

/// argv[0] of the replaced process
pub const TMUX_ARG0: &str = "tmux";

/// Command run by tmux in login mode
const LOGIN_SHELL_COMMAND: &str = "exec zsh --login";

/// Answers whether a tmux server is listening on a socket
pub trait ServerCheck {
    fn is_running(&self, socket: &str) -> bool;
}

/// What the launcher does once the environment is ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Server is up, forward a command to it
    PassThrough(Vec<String>),
    /// Server is up, attach to it
    Attach,
    /// No server yet, start one with our configuration
    Bootstrap(Vec<String>),
    /// Run a login shell through tmux
    LoginShell,
}

/// Inputs of a dispatch decision
#[derive(Debug, Clone, Copy)]
pub struct SessionRequest<'a> {
    pub socket: &'a str,
    pub tmux_args: &'a [String],
    pub allow_nested: bool,
}

/// Drop one leading `--` kept from the command line
pub fn strip_separator(args: &[String]) -> &[String] {
    match args.split_first() {
        Some((first, rest)) if first == "--" => rest,
        _ => args,
    }
}

/// Pick the action for a non-login launch
pub fn plan(
    request: &SessionRequest<'_>,
    env: &EnvMap,
    server: &impl ServerCheck,
) -> Result<SessionAction> {
    let args = strip_separator(request.tmux_args).to_vec();
    if !server.is_running(request.socket) {
        tracing::debug!("No server on socket {:?}", request.socket);
        return Ok(SessionAction::Bootstrap(args));
    }
    if !args.is_empty() {
        return Ok(SessionAction::PassThrough(args));
    }
    if env.contains(TMUX) && !request.allow_nested {
        return Err(NmkError::NestedSession);
    }
    Ok(SessionAction::Attach)
}

impl SessionAction {
    /// Build the tmux argument vector, argv[0] included
    pub fn arguments(&self, socket: &str, color: bool, config: &Path) -> Vec<String> {
        let mut argv = vec![TMUX_ARG0.to_string(), "-L".to_string(), socket.to_string()];
        if color {
            argv.push("-2".to_string());
        }
        match self {
            SessionAction::PassThrough(args) => argv.extend(args.iter().cloned()),
            SessionAction::Attach => argv.push("attach".to_string()),
            SessionAction::Bootstrap(args) => {
                push_config(&mut argv, config);
                argv.extend(args.iter().cloned());
            }
            SessionAction::LoginShell => {
                push_config(&mut argv, config);
                argv.push("-c".to_string());
                argv.push(LOGIN_SHELL_COMMAND.to_string());
            }
        }
        argv
    }

    /// Combine the argument vector with the tmux binary and the final environment
    pub fn into_launch(
        self,
        program: PathBuf,
        socket: &str,
        color: bool,
        config: &Path,
        env: &EnvMap,
    ) -> Launch {
        let args = self.arguments(socket, color, config);
        Launch::new(program, args, env.to_pairs())
    }
}

fn push_config(argv: &mut Vec<String>, config: &Path) {
    argv.push("-f".to_string());
    argv.push(config.to_string_lossy().into_owned());
}

/// Remove the variables tmux exports for its own configuration
///
/// A login shell started outside of our tmux configuration must not inherit
/// them.
pub fn clear_tmux_settings(env: &mut EnvMap, names: &[String]) {
    for name in names {
        env.unset(name);
    }
}
