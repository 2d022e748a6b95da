//! 256 color capability detection

use nmk_utils::Result;

use crate::names::{COLORTERM, TERM};
use crate::EnvMap;

/// `TERM` values known to support 256 colors
const TERM_256_COLOR: &[&str] = &[
    "cygwin",
    "gnome-256color",
    "putty",
    "screen-256color",
    "xterm-256color",
];

/// `COLORTERM` values set by emulators that support 256 colors
const COLORTERM_256_COLOR: &[&str] = &["gnome-terminal", "rxvt-xpm", "xfce4-terminal"];

/// Launcher flags that affect color detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// `-2` was given
    pub force_256_color: bool,
    /// Apply environment fixes (on unless `--no-autofix`)
    pub autofix: bool,
}

fn is_256_color_term(term: &str) -> bool {
    TERM_256_COLOR.contains(&term)
}

fn is_256_color_colorterm(colorterm: &str) -> bool {
    COLORTERM_256_COLOR.contains(&colorterm)
}

/// Whether the terminal supports 256 colors
///
/// Containers usually report a plain `TERM`, so with autofix on a detected
/// container counts as color capable. `in_container` runs only when nothing
/// else matched.
pub fn supports_256_color<F>(opts: &ColorOptions, env: &EnvMap, in_container: F) -> Result<bool>
where
    F: FnOnce() -> Result<bool>,
{
    if opts.force_256_color
        || env.get(TERM).is_some_and(is_256_color_term)
        || env.get(COLORTERM).is_some_and(is_256_color_colorterm)
    {
        return Ok(true);
    }
    if opts.autofix {
        return in_container();
    }
    Ok(false)
}

/// Value for `NMK_TMUX_DEFAULT_TERMINAL`
pub fn default_terminal(color: bool) -> &'static str {
    if color {
        "screen-256color"
    } else {
        "screen"
    }
}
