// src/shell.rs
use std::io::Write;

use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{self, Flow};
use crate::parser::{self, CommandBuffer};

/// Per-session state threaded through the builtins and the executor.
pub struct Shell {
    /// Exit status of the last external command, or the errno of a failed
    /// `cd`. -1 after a child was killed by a signal.
    pub last_return_code: i32,
    pub config: Config,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Shell { last_return_code: 0, config }
    }

    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    /// Parse one line into `buf` and run it.
    pub fn run_line(
        &mut self,
        line: &str,
        buf: &mut CommandBuffer,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        parser::parse(line, buf)?;
        executor::execute(self, buf, out, err)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Config::default())
    }
}
