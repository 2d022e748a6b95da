//! Binary lookup on the assembled search path
//!
//! The launcher never touches its own `PATH`, so lookups go through the
//! `PATH` held by the [`EnvMap`] instead of `which::which`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use nmk_env::names::PATH;
use nmk_env::EnvMap;
use nmk_utils::{NmkError, Result};

/// Find `name` on the `PATH` of `env`
///
/// Relative and empty `PATH` segments resolve against the working directory,
/// the same way tmux resolves them when it execs.
pub fn find_binary(name: &str, env: &EnvMap) -> Option<PathBuf> {
    find_binary_from(name, env, &working_dir())
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        tracing::debug!("Cannot read working directory, searching from /: {}", e);
        PathBuf::from("/")
    })
}

/// Anchor relative and empty segments of `search_path` at `cwd`
fn anchored_search_path(search_path: &str, cwd: &Path) -> OsString {
    let segments = std::env::split_paths(search_path).map(|segment| {
        if segment.is_absolute() {
            segment
        } else {
            cwd.join(segment)
        }
    });
    std::env::join_paths(segments).unwrap_or_else(|_| search_path.into())
}

fn find_binary_from(name: &str, env: &EnvMap, cwd: &Path) -> Option<PathBuf> {
    let search_path = anchored_search_path(env.get(PATH)?, cwd);
    match which::which_in(name, Some(search_path), cwd) {
        Ok(path) => {
            tracing::trace!("Found {} at {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            tracing::trace!("{} not found: {}", name, e);
            None
        }
    }
}

/// Like [`find_binary`] but a missing binary is an error
pub fn require_binary(name: &str, env: &EnvMap) -> Result<PathBuf> {
    find_binary(name, env).ok_or_else(|| NmkError::dependency(name))
}
