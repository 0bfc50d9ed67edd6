// src/main.rs
mod completion;
mod config;
mod error;
mod executor;
mod parser;
mod readline;
mod shell;

use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::ShellError;
use executor::Flow;
use parser::CommandBuffer;
use readline::{ReadlineError, ShellReadline};
use shell::Shell;

fn main() -> ExitCode {
    // DSH_LOG=debug for tracing output on stderr
    let filter = EnvFilter::try_from_env("DSH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(&Config::default_path()).unwrap_or_else(|e| {
        eprintln!("dsh: warning: {e:#}");
        Config::default()
    });
    if !config.color {
        colored::control::set_override(false);
    }

    let mut buf = match CommandBuffer::allocate() {
        Ok(buf) => buf,
        Err(e) => {
            eprintln!("dsh: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut readline = ShellReadline::new(&config.history);
    let mut shell = Shell::new(config);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    loop {
        let line = match readline.readline(shell.prompt()) {
            Ok(line) => line,
            // Ctrl+C drops the current line only
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(ReadlineError::Other(e)) => {
                eprintln!("dsh: readline error: {e}");
                break;
            }
        };

        match shell.run_line(&line, &mut buf, &mut stdout, &mut stderr) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => report(&e),
        }
    }

    buf.release();
    ExitCode::SUCCESS
}

fn report(e: &ShellError) {
    if e.is_silent() {
        return;
    }
    eprintln!("{}", format!("dsh: {e}").red());
}
