//! Startup cost reporting

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use nmk_env::EnvMap;

/// Report the time spent before handing over to tmux
///
/// Printed to stdout with `--usage`, logged otherwise.
pub fn report_usage(start: Instant, print: bool) {
    let elapsed = start.elapsed();
    if print {
        let mut stdout = std::io::stdout();
        let _ = writeln!(stdout, "{}", format_millis(elapsed));
        let _ = stdout.flush();
    } else {
        tracing::debug!("usage time: {} ms", format_millis(elapsed));
    }
}

/// Whole milliseconds, the format scripts reading `--usage` expect
fn format_millis(elapsed: Duration) -> String {
    elapsed.as_millis().to_string()
}

/// Processes started on the host since this one, estimated from pid allocation
///
/// Spawns `sh -c 'echo $$'` and compares its pid with ours. Pids wrap and are
/// shared with every other process, so this is only a rough indicator of how
/// many children setup has forked.
pub fn processes_spawned(env: &EnvMap) -> Option<u32> {
    let output = Command::new("sh")
        .args(["-c", "echo $$"])
        .env_clear()
        .envs(env.iter())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    let child = parse_pid(&String::from_utf8_lossy(&output.stdout))?;
    Some(pid_distance(std::process::id(), child))
}

fn parse_pid(output: &str) -> Option<u32> {
    output.trim().parse().ok()
}

/// Pids allocated strictly between `ours` and `child`
fn pid_distance(ours: u32, child: u32) -> u32 {
    child.saturating_sub(ours).saturating_sub(1)
}

/// Log [`processes_spawned`] when debug logging is on
pub fn log_processes_spawned(env: &EnvMap) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    match processes_spawned(env) {
        Some(count) => tracing::debug!("{} processes spawned during setup", count),
        None => tracing::debug!("Unable to count processes spawned during setup"),
    }
}
