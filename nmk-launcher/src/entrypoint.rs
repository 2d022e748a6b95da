//! Environment setup and session dispatch
//!
//! Every step works on one [`EnvMap`] snapshot of the inherited environment.
//! The result is a [`Launch`]; `main` performs the actual replacement.

use std::fs::File;
use std::io;
use std::path::Path;

use nmk_env::names::{
    EDITOR, LD_LIBRARY_PATH, NMK_BIN, NMK_HOME, PATH, VIMINIT, VIRTUAL_ENV, ZDOTDIR,
};
use nmk_env::{cgroup, supports_256_color, EnvMap, PathList, Platform};
use nmk_utils::{NmkConfig, NmkError, NmkHome, Result};

use crate::cli::Args;
use crate::dispatch::{self, SessionAction, SessionRequest};
use crate::launch::Launch;
use crate::search::find_binary;
use crate::timing;
use crate::tmux::{Tmux, TmuxServerCheck};
use crate::zsh;

const MOTD_FILES: &[&str] = &["/var/run/motd.dynamic", "/etc/motd"];

/// Tried in order when `EDITOR` is unset
const PREFERRED_EDITORS: &[&str] = &["nvim", "vim"];

/// Prepare the environment and decide what to run
pub fn prepare(args: &Args) -> Result<Launch> {
    if args.ssh {
        if let Err(e) = display_message_of_the_day() {
            tracing::warn!("Failed to print message of the day: {}", e);
        }
    }

    let home = NmkHome::locate()?;
    tracing::debug!("nmk home: {}", home);

    let platform = Platform::detect();
    tracing::debug!("platform: {:?}", platform);

    let exe = std::env::current_exe()?;
    prepare_with(args, &home, EnvMap::from_process(), platform, &exe)
}

fn prepare_with(
    args: &Args,
    home: &NmkHome,
    mut env: EnvMap,
    platform: Platform,
    exe: &Path,
) -> Result<Launch> {
    setup_library_path(&mut env, home);
    setup_search_path(&mut env, home)?;
    setup_environment(&mut env, home, exe);
    setup_preferred_editor(&mut env);
    zsh::setup(&mut env, args.autofix(), platform, home);

    let tmux = Tmux::locate(home, &env)?;
    let color = supports_256_color(&args.color_options(), &env, cgroup::is_inside_container)?;
    tracing::debug!("256 color: {}", color);

    // Both modes need zsh, and the login shell still reads NMK_TMUX_VERSION
    tmux.export_settings(&mut env, home, args.detach_on_destroy, color)?;
    timing::log_processes_spawned(&env);

    let action = if args.login {
        let config = NmkConfig::load(&home.config_file())?;
        dispatch::clear_tmux_settings(&mut env, &config.tmux_setting_envs);
        SessionAction::LoginShell
    } else {
        let request = SessionRequest {
            socket: &args.socket,
            tmux_args: &args.tmux_args,
            allow_nested: args.inception,
        };
        dispatch::plan(&request, &env, &TmuxServerCheck::new(&tmux.bin, &env))?
    };
    tracing::debug!("session action: {:?}", action);

    Ok(action.into_launch(tmux.bin, &args.socket, color, &tmux.conf, &env))
}

fn display_message_of_the_day() -> io::Result<()> {
    let mut stdout = io::stdout();
    MOTD_FILES
        .iter()
        .map(Path::new)
        .filter(|p| p.exists())
        .flat_map(File::open)
        .try_for_each(|mut f| io::copy(&mut f, &mut stdout).map(drop))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Put the libraries of our own tmux and zsh builds first
fn setup_library_path(env: &mut EnvMap, home: &NmkHome) {
    let local_lib = home.local_lib();
    if !local_lib.exists() {
        return;
    }
    let mut lib_path = env.get(LD_LIBRARY_PATH).map(PathList::parse).unwrap_or_default();
    lib_path.prepend(path_string(&local_lib));
    tracing::debug!("{} = {:?}", LD_LIBRARY_PATH, lib_path);
    env.set(LD_LIBRARY_PATH, lib_path.render());
}

fn setup_search_path(env: &mut EnvMap, home: &NmkHome) -> Result<()> {
    let current = env
        .get(PATH)
        .ok_or_else(|| NmkError::MissingVariable(PATH.to_string()))?;
    let mut search_path = PathList::parse(current);
    search_path.prepend(path_string(&home.local_bin()));
    search_path.prepend(path_string(&home.bin()));
    let search_path = search_path.unique().without_version_managers();
    tracing::debug!("{} = {:?}", PATH, search_path);
    env.set(PATH, search_path.render());
    Ok(())
}

fn vim_init(vim_dir: &Path) -> String {
    let init_vim = path_string(&vim_dir.join("init.vim"));
    format!("source {}", init_vim.replace(' ', r"\ "))
}

fn setup_environment(env: &mut EnvMap, home: &NmkHome, exe: &Path) {
    env.set(NMK_HOME, path_string(home.path()));
    env.set(ZDOTDIR, path_string(&home.zsh_dir()));
    env.set(VIMINIT, vim_init(&home.vim_dir()));
    env.unset(VIRTUAL_ENV);
    env.set(NMK_BIN, path_string(exe));
}

/// Keep a valid `EDITOR`, otherwise pick the first preferred editor installed
fn setup_preferred_editor(env: &mut EnvMap) {
    if let Some(editor) = env.get(EDITOR) {
        let program = editor.split_whitespace().next().unwrap_or_default();
        if find_binary(program, env).is_none() {
            tracing::warn!("{} is set to {:?} which is not in the search path", EDITOR, editor);
        }
        return;
    }
    match PREFERRED_EDITORS
        .iter()
        .find(|editor| find_binary(editor, env).is_some())
    {
        Some(editor) => {
            tracing::debug!("Using {} as preferred editor", editor);
            env.set(EDITOR, *editor);
        }
        None => tracing::debug!("No preferred editor found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::fake_binary;
    use clap::Parser;
    use nmk_env::names::{NMK_TMUX_DEFAULT_SHELL, NMK_TMUX_HISTORY, NMK_TMUX_VERSION};
    use std::ffi::{OsStr, OsString};

    fn home(dir: &tempfile::TempDir) -> NmkHome {
        NmkHome::from_path(dir.path())
    }

    // ==================== Library Path Tests ====================

    #[test]
    fn test_library_path_without_local_lib() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = EnvMap::from_vector(["LD_LIBRARY_PATH=/usr/lib"]);
        setup_library_path(&mut env, &home(&dir));
        assert_eq!(env.get(LD_LIBRARY_PATH), Some("/usr/lib"));
    }

    #[test]
    fn test_library_path_prepends_local_lib() {
        let dir = tempfile::tempdir().unwrap();
        let home = home(&dir);
        std::fs::create_dir_all(home.local_lib()).unwrap();
        let mut env = EnvMap::from_vector(["LD_LIBRARY_PATH=/usr/lib"]);
        setup_library_path(&mut env, &home);
        assert_eq!(
            env.get(LD_LIBRARY_PATH).unwrap(),
            format!("{}:/usr/lib", home.local_lib().display())
        );
    }

    #[test]
    fn test_library_path_created_when_unset() {
        let dir = tempfile::tempdir().unwrap();
        let home = home(&dir);
        std::fs::create_dir_all(home.local_lib()).unwrap();
        let mut env = EnvMap::new();
        setup_library_path(&mut env, &home);
        assert_eq!(
            env.get(LD_LIBRARY_PATH).unwrap(),
            home.local_lib().to_string_lossy()
        );
    }

    // ==================== Search Path Tests ====================

    #[test]
    fn test_search_path_order() {
        let home = NmkHome::from_path("/n");
        let mut env = EnvMap::from_vector(["PATH=/usr/bin:/n/bin:/bin"]);
        setup_search_path(&mut env, &home).unwrap();
        assert_eq!(env.get(PATH), Some("/n/bin:/n/local/bin:/usr/bin:/bin"));
    }

    #[test]
    fn test_search_path_drops_shims() {
        let home = NmkHome::from_path("/n");
        let mut env = EnvMap::from_vector(["PATH=/home/u/.pyenv/shims:/usr/bin"]);
        setup_search_path(&mut env, &home).unwrap();
        assert_eq!(env.get(PATH), Some("/n/bin:/n/local/bin:/usr/bin"));
    }

    #[test]
    fn test_search_path_missing() {
        let home = NmkHome::from_path("/n");
        let err = setup_search_path(&mut EnvMap::new(), &home).unwrap_err();
        assert!(matches!(err, NmkError::MissingVariable(ref name) if name == "PATH"));
    }

    // ==================== Environment Tests ====================

    #[test]
    fn test_vim_init() {
        assert_eq!(
            vim_init(Path::new("/home/user/.nmk/vim")),
            "source /home/user/.nmk/vim/init.vim"
        );
        assert_eq!(
            vim_init(Path::new("/home/user with space/.nmk/vim")),
            r"source /home/user\ with\ space/.nmk/vim/init.vim"
        );
    }

    #[test]
    fn test_setup_environment() {
        let home = NmkHome::from_path("/n");
        let mut env = EnvMap::from_vector(["VIRTUAL_ENV=/venv", "KEEP=1"]);
        setup_environment(&mut env, &home, Path::new("/n/bin/nmk"));
        assert_eq!(env.get(NMK_HOME), Some("/n"));
        assert_eq!(env.get(ZDOTDIR), Some("/n/zsh"));
        assert_eq!(env.get(VIMINIT), Some("source /n/vim/init.vim"));
        assert_eq!(env.get(NMK_BIN), Some("/n/bin/nmk"));
        assert!(!env.contains(VIRTUAL_ENV));
        assert_eq!(env.get("KEEP"), Some("1"));
    }

    // ==================== Editor Tests ====================

    fn env_with_bins(dir: &tempfile::TempDir, bins: &[&str]) -> EnvMap {
        for name in bins {
            fake_binary(dir.path(), name);
        }
        let mut env = EnvMap::new();
        env.set(PATH, dir.path().to_string_lossy());
        env
    }

    #[test]
    fn test_editor_prefers_nvim() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = env_with_bins(&dir, &["vim", "nvim"]);
        setup_preferred_editor(&mut env);
        assert_eq!(env.get(EDITOR), Some("nvim"));
    }

    #[test]
    fn test_editor_falls_back_to_vim() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = env_with_bins(&dir, &["vim"]);
        setup_preferred_editor(&mut env);
        assert_eq!(env.get(EDITOR), Some("vim"));
    }

    #[test]
    fn test_editor_none_installed() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = env_with_bins(&dir, &[]);
        setup_preferred_editor(&mut env);
        assert!(!env.contains(EDITOR));
    }

    #[test]
    fn test_existing_editor_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = env_with_bins(&dir, &["nvim"]);
        env.set(EDITOR, "nano");
        setup_preferred_editor(&mut env);
        assert_eq!(env.get(EDITOR), Some("nano"));
    }

    // ==================== Login Mode Tests ====================

    struct LoginFixture {
        bin_dir: tempfile::TempDir,
        home_dir: tempfile::TempDir,
    }

    impl LoginFixture {
        fn new(bins: &[&str]) -> Self {
            let bin_dir = tempfile::tempdir().unwrap();
            for name in bins {
                fake_binary(bin_dir.path(), name);
            }
            let home_dir = tempfile::tempdir().unwrap();
            let tmux_dir = home_dir.path().join("tmux");
            std::fs::create_dir(&tmux_dir).unwrap();
            std::fs::write(tmux_dir.join("3.2.conf"), "").unwrap();
            std::fs::write(
                home_dir.path().join("config.json"),
                r#"{"tmuxSettingEnvs": ["NMK_TMUX_HISTORY"]}"#,
            )
            .unwrap();
            Self { bin_dir, home_dir }
        }

        fn env(&self) -> EnvMap {
            let mut env = EnvMap::new();
            env.set(PATH, self.bin_dir.path().to_string_lossy());
            env.set(NMK_TMUX_VERSION, "3.2");
            env
        }

        fn prepare(&self, argv: &[&str]) -> Result<Launch> {
            let args = Args::parse_from(argv);
            let home = NmkHome::from_path(self.home_dir.path());
            let exe = self.bin_dir.path().join("nmk");
            prepare_with(&args, &home, self.env(), Platform::Linux, &exe)
        }
    }

    fn launch_var<'a>(launch: &'a Launch, name: &str) -> Option<&'a OsString> {
        launch
            .env()
            .iter()
            .find(|(key, _)| key.as_os_str() == OsStr::new(name))
            .map(|(_, value)| value)
    }

    #[test]
    fn test_login_without_zsh() {
        let fixture = LoginFixture::new(&["tmux"]);
        let err = fixture.prepare(&["nmk", "-2", "-l"]).unwrap_err();
        match err {
            NmkError::DependencyNotFound { name } => assert_eq!(name, "zsh"),
            other => panic!("Expected DependencyNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_login_keeps_unlisted_tmux_settings() {
        let fixture = LoginFixture::new(&["tmux", "zsh"]);
        let launch = fixture.prepare(&["nmk", "-2", "-l"]).unwrap();

        assert_eq!(
            launch_var(&launch, NMK_TMUX_VERSION),
            Some(&OsString::from("3.2"))
        );
        assert!(launch_var(&launch, NMK_TMUX_DEFAULT_SHELL).is_some());
        assert_eq!(launch_var(&launch, NMK_TMUX_HISTORY), None);
        assert!(launch.program().ends_with("tmux"));
        let args = launch.args();
        assert_eq!(args[args.len() - 2..], ["-c", "exec zsh --login"]);
    }

    #[test]
    fn test_login_without_config() {
        let fixture = LoginFixture::new(&["tmux", "zsh"]);
        std::fs::remove_file(fixture.home_dir.path().join("config.json")).unwrap();
        let err = fixture.prepare(&["nmk", "-2", "-l"]).unwrap_err();
        assert!(matches!(err, NmkError::FileRead { .. }));
    }
}
