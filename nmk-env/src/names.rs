//! Well-known environment variable names

pub const PATH: &str = "PATH";
pub const LD_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";
pub const TERM: &str = "TERM";
pub const COLORTERM: &str = "COLORTERM";
/// Set by tmux inside every session it manages
pub const TMUX: &str = "TMUX";
pub const EDITOR: &str = "EDITOR";
pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";
pub const VIMINIT: &str = "VIMINIT";
pub const ZDOTDIR: &str = "ZDOTDIR";

pub const NMK_HOME: &str = nmk_utils::paths::NMK_HOME;
pub const NMK_BIN: &str = "NMK_BIN";
pub const NMK_ZSH_GLOBAL_RCS: &str = "NMK_ZSH_GLOBAL_RCS";
pub const NMK_TMUX_DEFAULT_SHELL: &str = "NMK_TMUX_DEFAULT_SHELL";
pub const NMK_TMUX_DETACH_ON_DESTROY: &str = "NMK_TMUX_DETACH_ON_DESTROY";
pub const NMK_TMUX_HISTORY: &str = "NMK_TMUX_HISTORY";
pub const NMK_TMUX_VERSION: &str = "NMK_TMUX_VERSION";
pub const NMK_TMUX_DEFAULT_TERMINAL: &str = "NMK_TMUX_DEFAULT_TERMINAL";
pub const NMK_TMUX_256_COLOR: &str = "NMK_TMUX_256_COLOR";
