//! Process replacement

use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use nmk_utils::NmkError;

/// A fully resolved program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    program: PathBuf,
    /// argv, argv[0] included
    args: Vec<String>,
    env: Vec<(OsString, OsString)>,
}

impl Launch {
    pub fn new(program: PathBuf, args: Vec<String>, env: Vec<(OsString, OsString)>) -> Self {
        Self { program, args, env }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &[(OsString, OsString)] {
        &self.env
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some((arg0, rest)) = self.args.split_first() {
            cmd.arg0(arg0).args(rest);
        }
        cmd.env_clear().envs(self.env().iter().map(|(k, v)| (k, v)));
        cmd
    }

    /// Replace the current process
    ///
    /// Only returns if the replacement failed.
    pub fn exec(self) -> NmkError {
        tracing::debug!("exec {} {:?}", self.program().display(), self.args());
        let source = self.command().exec();
        NmkError::Exec {
            program: self.program,
            source,
        }
    }
}
