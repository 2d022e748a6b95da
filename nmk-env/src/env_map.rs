//! The exported variable set handed to child processes
//!
//! Built once from the inherited environment, mutated by each setup step and
//! materialized only when a child process is started.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// Split `K=V` on the first `=`
///
/// Returns `None` when there is no `=` at all.
pub fn split_key_value(entry: &str) -> Option<(&str, &str)> {
    entry.split_once('=')
}

pub fn merge_key_value(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Variables are stored as `OsString` so entries that are not valid unicode
/// still reach child processes unchanged. The `&str` accessors only see the
/// unicode ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: HashMap<OsString, OsString>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `K=V` entries; a later entry overrides an earlier one
    pub fn from_vector<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            match split_key_value(entry) {
                Some((k, v)) => {
                    map.vars.insert(k.into(), v.into());
                }
                None => tracing::trace!("ignoring malformed environment entry {:?}", entry),
            }
        }
        map
    }

    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    fn from_os_pairs(pairs: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self {
            vars: pairs.into_iter().collect(),
        }
    }

    /// Value of `key`; `None` when unset or not valid unicode
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(OsStr::new(key)).and_then(|v| v.to_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        tracing::debug!("export {}={:?}", key, value);
        self.vars.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, key: &str) {
        if self.vars.remove(OsStr::new(key)).is_some() {
            tracing::debug!("unset {}", key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(OsStr::new(key))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All entries, unicode or not, for `Command::envs`
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// `K=V` entries in unspecified order, non-unicode bytes replaced
    pub fn to_vector(&self) -> Vec<String> {
        self.iter()
            .map(|(k, v)| merge_key_value(&k.to_string_lossy(), &v.to_string_lossy()))
            .collect()
    }

    /// Owned pairs for `Command::envs`
    pub fn to_pairs(&self) -> Vec<(OsString, OsString)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
