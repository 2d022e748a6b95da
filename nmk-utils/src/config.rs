//! `config.json` loading
//!
//! The installation directory ships a small JSON file listing the variables
//! the tmux configuration exports for its own use. Those must not leak into a
//! login shell.

use std::path::Path;

use serde::Deserialize;

use crate::{NmkError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NmkConfig {
    /// Variable names cleared before a login shell starts
    #[serde(rename = "tmuxSettingEnvs", default)]
    pub tmux_setting_envs: Vec<String>,
}

impl NmkConfig {
    /// Load and validate the configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NmkError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| NmkError::ConfigInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        tracing::debug!("Loaded {}: {:?}", path.display(), config);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match self.tmux_setting_envs.iter().find(|name| !is_env_name(name)) {
            Some(bad) => Err(NmkError::config(format!(
                "tmuxSettingEnvs contains invalid variable name {:?}",
                bad
            ))),
            None => Ok(()),
        }
    }
}

fn is_env_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
