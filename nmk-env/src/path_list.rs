//! Ordered unique path lists (`PATH`, `LD_LIBRARY_PATH`)
//!
//! Segments keep their insertion order and may repeat while the list is being
//! built. Duplicates are dropped when rendering, first occurrence wins.

use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Debug, Formatter};

/// Platform path-list separator
#[cfg(windows)]
pub const SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const SEPARATOR: char = ':';

/// Path segments installed by version managers that would shadow our binaries
const VERSION_MANAGER_SHIMS: &[&str] = &[".pyenv/shims", ".rbenv/shims"];

#[derive(Clone, Default, PartialEq, Eq)]
pub struct PathList {
    segments: VecDeque<String>,
}

impl Debug for PathList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.segments.iter()).finish()
    }
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a separator-joined string; empty input gives an empty list
    ///
    /// Empty segments inside a non-empty string are kept as they are.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::new();
        }
        raw.split(SEPARATOR).map(String::from).collect()
    }

    pub fn prepend(&mut self, segment: impl Into<String>) {
        self.segments.push_front(segment.into())
    }

    pub fn append(&mut self, segment: impl Into<String>) {
        self.segments.push_back(segment.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Keep only the first occurrence of each segment
    pub fn unique(&self) -> Self {
        let mut seen = HashSet::new();
        self.iter()
            .filter(|s| seen.insert(*s))
            .map(String::from)
            .collect()
    }

    /// Drop pyenv and rbenv shim directories
    pub fn without_version_managers(self) -> Self {
        self.segments
            .into_iter()
            .filter(|s| {
                let trimmed = s.trim_end_matches('/');
                !VERSION_MANAGER_SHIMS
                    .iter()
                    .any(|shim| trimmed == *shim || trimmed.ends_with(&format!("/{}", shim)))
            })
            .collect()
    }

    /// Join the deduplicated segments with the platform separator
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.unique().iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(segment);
        }
        out
    }
}

impl FromIterator<String> for PathList {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
