//! zsh global startup file policy
//!
//! Some platforms ship a global zprofile that rebuilds `PATH` and undoes the
//! search path we just assembled. Our own zsh build under `<home>/local/bin`
//! does not read those files, so the workaround only applies to system zsh.

use nmk_env::names::NMK_ZSH_GLOBAL_RCS;
use nmk_env::{EnvMap, Platform};
use nmk_utils::NmkHome;

/// Whether zsh should read `/etc/zprofile` and friends
pub fn use_global_rcs(autofix: bool, platform: Platform, home: &NmkHome) -> bool {
    if !autofix || !platform.has_unfriendly_global_rcs() {
        return true;
    }
    home.local_zsh().exists()
}

pub fn setup(env: &mut EnvMap, autofix: bool, platform: Platform, home: &NmkHome) {
    let global_rcs = use_global_rcs(autofix, platform, home);
    env.set(NMK_ZSH_GLOBAL_RCS, if global_rcs { "1" } else { "0" });
}
