//! tmux discovery and probing

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use nmk_env::names::{
    NMK_TMUX_256_COLOR, NMK_TMUX_DEFAULT_SHELL, NMK_TMUX_DEFAULT_TERMINAL,
    NMK_TMUX_DETACH_ON_DESTROY, NMK_TMUX_HISTORY, NMK_TMUX_VERSION,
};
use nmk_env::terminal::default_terminal;
use nmk_env::EnvMap;
use nmk_utils::{NmkError, NmkHome, Result};

use crate::dispatch::ServerCheck;
use crate::search::require_binary;

const TMUX_BIN: &str = "tmux";
const ZSH_BIN: &str = "zsh";

/// The tmux installation the session will run on
#[derive(Debug, Clone)]
pub struct Tmux {
    pub bin: PathBuf,
    pub version: String,
    /// `<home>/tmux/<version>.conf`
    pub conf: PathBuf,
}

impl Tmux {
    /// Locate tmux on the search path of `env` and pick its configuration
    ///
    /// `NMK_TMUX_VERSION` skips the `tmux -V` query when set.
    pub fn locate(home: &NmkHome, env: &EnvMap) -> Result<Self> {
        let bin = require_binary(TMUX_BIN, env)?;
        let version = match env.get(NMK_TMUX_VERSION) {
            Some(version) if !version.is_empty() => {
                tracing::debug!("Using tmux version from {}", NMK_TMUX_VERSION);
                version.to_string()
            }
            _ => query_version(&bin, env)?,
        };
        let conf = conf_for_version(&home.tmux_dir(), &version)?;
        tracing::debug!("tmux {} at {}", version, bin.display());
        Ok(Self { bin, version, conf })
    }

    /// Export the variables the tmux configuration reads
    pub fn export_settings(
        &self,
        env: &mut EnvMap,
        home: &NmkHome,
        detach_on_destroy: bool,
        color: bool,
    ) -> Result<()> {
        let zsh = require_binary(ZSH_BIN, env)?;
        env.set(NMK_TMUX_DEFAULT_SHELL, zsh.to_string_lossy());
        env.set(
            NMK_TMUX_DETACH_ON_DESTROY,
            if detach_on_destroy { "on" } else { "off" },
        );
        env.set(
            NMK_TMUX_HISTORY,
            home.tmux_dir().join(".tmux_history").to_string_lossy(),
        );
        env.set(NMK_TMUX_VERSION, &self.version);
        env.set(NMK_TMUX_DEFAULT_TERMINAL, default_terminal(color));
        env.set(NMK_TMUX_256_COLOR, if color { "1" } else { "0" });
        Ok(())
    }
}

fn query_version(bin: &Path, env: &EnvMap) -> Result<String> {
    let output = Command::new(bin)
        .arg("-V")
        .env_clear()
        .envs(env.iter())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;
    parse_version(&String::from_utf8_lossy(&output.stdout))
}

/// Extract the version from `tmux -V` output such as `tmux 3.3a`
pub fn parse_version(output: &str) -> Result<String> {
    let mut fields = output.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some("tmux"), Some(version), None) => Ok(version.to_string()),
        _ => Err(NmkError::BadVersionOutput(output.trim().to_string())),
    }
}

/// The configuration file for `version`, which must exist
pub fn conf_for_version(tmux_dir: &Path, version: &str) -> Result<PathBuf> {
    let conf = tmux_dir.join(format!("{}.conf", version));
    if conf.is_file() {
        Ok(conf)
    } else {
        Err(NmkError::UnsupportedVersion {
            version: version.to_string(),
            path: conf,
        })
    }
}

/// Asks tmux itself whether a server answers on a socket
pub struct TmuxServerCheck<'a> {
    bin: &'a Path,
    env: &'a EnvMap,
}

impl<'a> TmuxServerCheck<'a> {
    pub fn new(bin: &'a Path, env: &'a EnvMap) -> Self {
        Self { bin, env }
    }
}

impl ServerCheck for TmuxServerCheck<'_> {
    fn is_running(&self, socket: &str) -> bool {
        let status = Command::new(self.bin)
            .args(["-L", socket, "list-sessions"])
            .env_clear()
            .envs(self.env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!("Failed to query tmux server: {}", e);
                false
            }
        }
    }
}
