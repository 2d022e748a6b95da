//! Operating system and distribution detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Alpine,
    Arch,
    Unknown,
}

impl Platform {
    /// Detect the running platform
    pub fn detect() -> Self {
        Self::refine(Self::compiled(), Path::new("/etc"))
    }

    #[cfg(target_os = "macos")]
    fn compiled() -> Self {
        Platform::MacOs
    }

    #[cfg(target_os = "linux")]
    fn compiled() -> Self {
        Platform::Linux
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn compiled() -> Self {
        Platform::Unknown
    }

    /// Narrow a generic Linux down to a distribution using release files in `etc`
    fn refine(platform: Self, etc: &Path) -> Self {
        if platform != Platform::Linux {
            return platform;
        }
        if etc.join("alpine-release").exists() {
            Platform::Alpine
        } else if etc.join("arch-release").exists() {
            Platform::Arch
        } else {
            Platform::Linux
        }
    }

    pub fn is_mac(self) -> bool {
        self == Platform::MacOs
    }

    /// Platforms whose global zsh startup files reset `PATH`
    ///
    /// Alpine and Arch source `/etc/profile` from the global zprofile, macOS
    /// reorders `PATH` through `path_helper`.
    pub fn has_unfriendly_global_rcs(self) -> bool {
        matches!(self, Platform::MacOs | Platform::Alpine | Platform::Arch)
    }
}
