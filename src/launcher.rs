//! External command resolution and launch
//!
//! Resolves a command name against the session's `PATH`, spawns the child
//! with the materialized environment view and inherited descriptors, and
//! blocks until it terminates. Resolution and spawn failures are local to
//! the current segment; they never abort the read loop.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::session::Session;
use crate::tokens;

/// Status reported when a command cannot be resolved.
pub const STATUS_NOT_FOUND: i32 = 127;
/// Status reported when the resolved file is not executable.
pub const STATUS_NO_PERMISSION: i32 = 126;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("not found")]
    NotFound,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("can't launch: {0}")]
    Spawn(#[from] io::Error),
}

/// Check whether `path` names an executable regular file.
pub fn is_command(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match path.metadata() {
            Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Resolve `cmd` against the `PATH` entries in the session environment.
///
/// A name containing `/` is probed directly instead of searched. An empty
/// `PATH` entry stands for the current directory.
pub fn find_path(session: &Session, cmd: &str) -> Result<PathBuf, LaunchError> {
    if cmd.contains('/') {
        let path = PathBuf::from(cmd);
        if is_command(&path) {
            return Ok(path);
        }
        if path.is_file() {
            return Err(LaunchError::PermissionDenied);
        }
        return Err(LaunchError::NotFound);
    }

    let search = session.getenv("PATH").unwrap_or("");
    for dir in tokens::split_on(search, ':') {
        let candidate = if dir.is_empty() {
            PathBuf::from(cmd)
        } else {
            Path::new(&dir).join(cmd)
        };
        if is_command(&candidate) {
            return Ok(candidate);
        }
    }
    Err(LaunchError::NotFound)
}

/// Launch `argv` as an external command and wait for its exit status.
pub fn execute(session: &mut Session, argv: &[String]) -> Result<i32, LaunchError> {
    let path = find_path(session, &argv[0])?;
    log::debug!("resolved {} -> {}", argv[0], path.display());

    // Buffered output must land before the child writes to the same fd.
    session.console.flush();

    let mut command = Command::new(&path);
    command.args(&argv[1..]);
    command.env_clear();
    for entry in session.environ() {
        if let Some((key, value)) = entry.split_once('=') {
            command.env(key, value);
        }
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.arg0(&argv[0]);
    }

    let mut child = command.spawn().map_err(|err| match err.kind() {
        io::ErrorKind::PermissionDenied => LaunchError::PermissionDenied,
        io::ErrorKind::NotFound => LaunchError::NotFound,
        _ => LaunchError::Spawn(err),
    })?;
    session.exec_count += 1;

    let status = child.wait()?;
    Ok(decode_status(status))
}

/// Decode a child's termination into a shell exit status.
fn decode_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    #[cfg(unix)]
    fn resolves_through_path_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_executable(second.path(), "husk-probe");
        let mut session = Session::new("husk");
        session.set_env(
            "PATH",
            &format!("{}:{}", first.path().display(), second.path().display()),
        );
        let resolved = find_path(&session, "husk-probe").unwrap();
        assert_eq!(resolved, second.path().join("husk-probe"));
    }

    #[test]
    fn missing_command_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new("husk");
        session.set_env("PATH", &dir.path().display().to_string());
        assert!(matches!(
            find_path(&session, "husk-no-such-cmd"),
            Err(LaunchError::NotFound)
        ));
    }

    #[test]
    #[cfg(unix)]
    fn slash_names_are_probed_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = make_executable(dir.path(), "direct");
        let mut session = Session::new("husk");
        // An empty PATH must not matter for direct names.
        session.set_env("PATH", "");
        let resolved = find_path(&session, &path.display().to_string()).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    #[cfg(unix)]
    fn non_executable_file_is_permission_denied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, "not a program").unwrap();
        let session = Session::new("husk");
        assert!(matches!(
            find_path(&session, &path.display().to_string()),
            Err(LaunchError::PermissionDenied)
        ));
    }

    #[test]
    #[cfg(unix)]
    fn execute_reports_child_status() {
        let mut session = Session::new("husk");
        let ok = execute(&mut session, &["true".to_string()]).unwrap();
        assert_eq!(ok, 0);
        let fail = execute(&mut session, &["false".to_string()]).unwrap();
        assert_eq!(fail, 1);
        assert_eq!(session.exec_count, 2);
    }

    #[test]
    #[cfg(unix)]
    fn child_sees_session_environment() {
        let mut session = Session::new("husk");
        session.set_env("HUSK_CHILD_VAR", "visible");
        let status = execute(
            &mut session,
            &["printenv".to_string(), "HUSK_CHILD_VAR".to_string()],
        )
        .unwrap();
        assert_eq!(status, 0);
        session.unset_env("HUSK_CHILD_VAR");
        let status = execute(
            &mut session,
            &["printenv".to_string(), "HUSK_CHILD_VAR".to_string()],
        )
        .unwrap();
        assert_ne!(status, 0);
    }
}
