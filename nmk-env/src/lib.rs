//! nmk-env: environment assembly and host detection
//!
//! Everything here works on an owned [`EnvMap`] rather than the live process
//! environment, so each piece can be tested in isolation:
//!
//! - [`PathList`]: ordered, deduplicating `PATH`-like lists
//! - [`EnvMap`]: the exported variable set handed to child processes
//! - [`cgroup`]: container / pod detection from `/proc/1/cgroup`
//! - [`terminal`]: 256 color capability detection
//! - [`platform`]: operating system and distribution detection

pub mod cgroup;
pub mod env_map;
pub mod names;
pub mod path_list;
pub mod platform;
pub mod terminal;

pub use env_map::{merge_key_value, split_key_value, EnvMap};
pub use path_list::PathList;
pub use platform::Platform;
pub use terminal::{supports_256_color, ColorOptions};
