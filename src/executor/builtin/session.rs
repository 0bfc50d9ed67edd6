// src/executor/builtin/session.rs
use std::io::Write;

use crate::shell::Shell;

/// `cd` with no argument leaves the directory alone. Arguments past the
/// first are ignored.
pub fn builtin_cd(shell: &mut Shell, target: Option<&str>, err: &mut dyn Write) {
    let Some(target) = target else { return };

    match std::env::set_current_dir(target) {
        Ok(()) => shell.last_return_code = 0,
        Err(e) => {
            if let Err(write_err) = writeln!(err, "cd: {target}: {e}") {
                tracing::warn!(error = %write_err, "cd: failed to write diagnostic");
            }
            shell.last_return_code = e.raw_os_error().unwrap_or(1);
        }
    }
}

pub fn builtin_rc(shell: &Shell, out: &mut dyn Write) {
    if let Err(e) = writeln!(out, "{}", shell.last_return_code) {
        tracing::warn!(error = %e, "rc: failed to write");
    }
}
