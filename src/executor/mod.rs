// src/executor/mod.rs
pub mod builtin;

use std::io::{self, Write};
use std::process::{Command as Proc, ExitStatus};

use crate::error::{Failure, ShellError};
use crate::parser::CommandBuffer;
use crate::shell::Shell;
use builtin::BuiltinOutcome;

/// What the loop should do after a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run the parsed command: a builtin in-process, anything else as a child
/// process that inherits stdin/stdout/stderr. Blocks until the child exits;
/// there is no timeout. Builtins write to `out`, their diagnostics to `err`.
pub fn execute(
    shell: &mut Shell,
    buf: &CommandBuffer,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Flow, ShellError> {
    if buf.is_empty() {
        return Err(ShellError::NoCommand);
    }

    match builtin::try_builtin(shell, buf, out, err) {
        BuiltinOutcome::Executed => return Ok(Flow::Continue),
        BuiltinOutcome::ExitRequested => return Ok(Flow::Exit),
        BuiltinOutcome::NotBuiltin => {}
    }

    // Builtins may have written to `out`; keep ordering with the child's output
    out.flush().ok();
    err.flush().ok();
    run_external(shell, &buf.argv())?;
    Ok(Flow::Continue)
}

fn run_external(shell: &mut Shell, argv: &[&str]) -> Result<(), ShellError> {
    // The line editor may have left the terminal in raw mode
    crossterm::terminal::disable_raw_mode().ok();

    let mut cmd = Proc::new(argv[0]);
    cmd.args(&argv[1..]);
    tracing::debug!(program = argv[0], args = ?&argv[1..], "spawning");

    let result = match cmd.status() {
        Ok(status) => record_status(shell, status),
        Err(e) => record_spawn_error(shell, &e),
    };
    if let Err(e) = &result {
        tracing::info!(program = argv[0], rc = shell.last_return_code, error = %e, "command failed");
    }
    result
}

fn record_status(shell: &mut Shell, status: ExitStatus) -> Result<(), ShellError> {
    match status.code() {
        Some(0) => {
            shell.last_return_code = 0;
            Ok(())
        }
        Some(code) => {
            shell.last_return_code = code;
            Err(ShellError::ExecutionFailed(Failure::Exited(code)))
        }
        None => {
            shell.last_return_code = -1;
            Err(ShellError::ExecutionFailed(Failure::Signaled(termination_signal(&status))))
        }
    }
}

/// std reports exec failures in the child as spawn errors. The well-known
/// ones are treated as if the child had exited with that errno; anything
/// else means no process was created. Errors without an OS code (bad
/// arguments rejected by std) are recorded as EINVAL, never as -1.
fn record_spawn_error(shell: &mut Shell, e: &io::Error) -> Result<(), ShellError> {
    let code = e.raw_os_error().unwrap_or(libc::EINVAL);
    shell.last_return_code = code;
    match code {
        libc::ENOENT | libc::EACCES | libc::ENOEXEC => {
            Err(ShellError::ExecutionFailed(Failure::Exited(code)))
        }
        _ => {
            tracing::warn!(error = %e, "could not create process");
            Err(ShellError::SpawnFailed { code, reason: e.to_string() })
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
