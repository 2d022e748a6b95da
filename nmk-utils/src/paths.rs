//! Path utilities for nmk
//!
//! Locates the installation directory (`$NMK_HOME` or `~/.nmk`) and the
//! well-known files and directories inside it.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::{NmkError, Result};

/// Environment variable naming the installation directory
pub const NMK_HOME: &str = "NMK_HOME";

/// Directory name under the user home used when `NMK_HOME` is unset
const DEFAULT_DIR_NAME: &str = ".nmk";

/// The nmk installation directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmkHome {
    root: PathBuf,
}

impl NmkHome {
    /// Locate the installation directory
    ///
    /// Location: `$NMK_HOME` or `~/.nmk`. The directory must exist.
    pub fn locate() -> Result<Self> {
        Self::locate_from(std::env::var_os(NMK_HOME))
    }

    /// Locate using an explicit `NMK_HOME` value instead of the process environment
    pub fn locate_from(override_dir: Option<OsString>) -> Result<Self> {
        let root = match override_dir {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_dir()?,
        };
        if !root.is_dir() {
            return Err(NmkError::HomeNotFound(root));
        }
        Ok(Self { root })
    }

    /// Wrap a known directory without checking it
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `<home>/bin`
    pub fn bin(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// `<home>/local/bin`, precompiled tmux and zsh
    pub fn local_bin(&self) -> PathBuf {
        self.root.join("local").join("bin")
    }

    /// `<home>/local/lib`, shared libraries for the precompiled binaries
    pub fn local_lib(&self) -> PathBuf {
        self.root.join("local").join("lib")
    }

    /// `<home>/local/bin/zsh`
    pub fn local_zsh(&self) -> PathBuf {
        self.local_bin().join("zsh")
    }

    /// `<home>/tmux`, one configuration file per supported tmux version
    pub fn tmux_dir(&self) -> PathBuf {
        self.root.join("tmux")
    }

    /// `<home>/zsh`, used as `ZDOTDIR`
    pub fn zsh_dir(&self) -> PathBuf {
        self.root.join("zsh")
    }

    /// `<home>/vim`
    pub fn vim_dir(&self) -> PathBuf {
        self.root.join("vim")
    }

    /// `<home>/config.json`
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }
}

impl fmt::Display for NmkHome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.display().fmt(f)
    }
}

fn default_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_DIR_NAME))
        .ok_or_else(|| NmkError::internal("cannot determine home directory"))
}
