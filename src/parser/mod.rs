// src/parser/mod.rs
pub mod buffer;

pub use buffer::CommandBuffer;

use crate::error::ShellError;

/// Tokenize `line` into `buf`, replacing whatever the buffer held before.
///
/// Double quotes toggle quoting and are never stored; whitespace inside
/// quotes is literal, outside it separates tokens. An unterminated quote
/// closes at end of line. An unquoted `|` is rejected as a pipeline, and a
/// NUL byte is rejected because it cannot be passed to a child.
pub fn parse(line: &str, buf: &mut CommandBuffer) -> Result<(), ShellError> {
    buf.clear()?;
    let kept = buf.store_line(line)?;
    let line = &line[..kept];

    let rest = line.trim_start();
    if rest.is_empty() {
        return Err(ShellError::NoCommand);
    }

    let mut in_quotes = false;
    for c in rest.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\0' => return Err(ShellError::ParseFailed { reason: "NUL byte in input" }),
            '|' if !in_quotes => return Err(ShellError::PipelineUnsupported),
            c if c.is_whitespace() && !in_quotes => buf.end_token()?,
            c => buf.push_char(c),
        }
    }
    buf.end_token()?;

    // Only empty quoted segments, e.g. `""`
    if buf.is_empty() {
        return Err(ShellError::NoCommand);
    }

    tracing::debug!(line = buf.raw(), argc = buf.token_count(), argv = ?buf.argv(), "parsed command");
    Ok(())
}
