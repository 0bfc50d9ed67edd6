// src/executor/builtin/mod.rs
mod session;
mod dragon;

pub use dragon::print_dragon;

use std::io::Write;

use crate::config::EXIT_CMD;
use crate::parser::CommandBuffer;
use crate::shell::Shell;

/// Commands that run inside the shell process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Dragon,
    Cd,
    Rc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    NotBuiltin,
    Executed,
    ExitRequested,
}

pub const BUILTIN_NAMES: &[&str] = &[EXIT_CMD, "dragon", "cd", "rc"];

impl Builtin {
    /// Exact, case-sensitive match on the command name.
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            EXIT_CMD => Some(Builtin::Exit),
            "dragon" => Some(Builtin::Dragon),
            "cd"     => Some(Builtin::Cd),
            "rc"     => Some(Builtin::Rc),
            _        => None,
        }
    }
}

pub fn try_builtin(
    shell: &mut Shell,
    buf: &CommandBuffer,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> BuiltinOutcome {
    let Some(builtin) = buf.token(0).and_then(Builtin::from_name) else {
        return BuiltinOutcome::NotBuiltin;
    };
    tracing::debug!(?builtin, "running builtin");

    match builtin {
        Builtin::Exit   => return BuiltinOutcome::ExitRequested,
        Builtin::Dragon => print_dragon(out),
        Builtin::Cd     => session::builtin_cd(shell, buf.token(1), err),
        Builtin::Rc     => session::builtin_rc(shell, out),
    }
    BuiltinOutcome::Executed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(shell: &mut Shell, line: &str) -> (BuiltinOutcome, String) {
        let mut buf = CommandBuffer::allocate().unwrap();
        parse(line, &mut buf).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = try_builtin(shell, &buf, &mut out, &mut err);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(Builtin::from_name("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::from_name("Exit"), None);
        assert_eq!(Builtin::from_name("RC"), None);
        assert_eq!(Builtin::from_name("ls"), None);
    }

    #[test]
    fn empty_buffer_is_not_builtin() {
        let mut shell = Shell::default();
        let buf = CommandBuffer::allocate().unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(try_builtin(&mut shell, &buf, &mut out, &mut err), BuiltinOutcome::NotBuiltin);
    }

    #[test]
    fn external_name_is_not_builtin() {
        let mut shell = Shell::default();
        assert_eq!(run(&mut shell, "ls -la").0, BuiltinOutcome::NotBuiltin);
    }

    #[test]
    fn exit_requests_exit_with_trailing_args() {
        let mut shell = Shell::default();
        assert_eq!(run(&mut shell, "exit 3 4").0, BuiltinOutcome::ExitRequested);
    }

    #[test]
    fn rc_prints_last_code() {
        let mut shell = Shell::default();
        shell.last_return_code = 7;
        let (outcome, printed) = run(&mut shell, "rc");
        assert_eq!(outcome, BuiltinOutcome::Executed);
        assert_eq!(printed, "7\n");
        assert_eq!(shell.last_return_code, 7);
    }

    #[test]
    fn cd_failure_goes_to_error_writer() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut buf = CommandBuffer::allocate().unwrap();
        parse(&format!("cd {}", missing.display()), &mut buf).unwrap();

        let mut shell = Shell::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(try_builtin(&mut shell, &buf, &mut out, &mut err), BuiltinOutcome::Executed);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("cd: "), "{err}");
        assert_eq!(shell.last_return_code, libc::ENOENT);
    }

    #[test]
    fn dragon_prints_something() {
        let mut shell = Shell::default();
        let (outcome, printed) = run(&mut shell, "dragon");
        assert_eq!(outcome, BuiltinOutcome::Executed);
        assert!(printed.lines().count() > 5);
        assert_eq!(shell.last_return_code, 0);
    }
}
