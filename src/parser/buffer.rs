// src/parser/buffer.rs
//
// Reusable command buffer. One is allocated when the loop starts, cleared
// before every line and released when the loop ends.

use std::ops::Range;

use crate::error::ShellError;

/// Maximum bytes kept from one input line, terminator slot included.
pub const SH_CMD_MAX: usize = 64 + 256;

/// Maximum number of tokens (command name included) in one command.
pub const CMD_ARGV_MAX: usize = 8;

#[derive(Debug, Default)]
pub struct CommandBuffer {
    /// Raw input line. `None` until allocated and after release.
    raw: Option<String>,
    /// Token text with quotes removed, tokens laid end to end.
    words: String,
    /// One span into `words` per token.
    spans: Vec<Range<usize>>,
}

impl CommandBuffer {
    /// Reserve the fixed-capacity storage up front so parsing never allocates.
    pub fn allocate() -> Result<Self, ShellError> {
        let mut raw = String::new();
        let mut words = String::new();
        let mut spans = Vec::new();
        raw.try_reserve_exact(SH_CMD_MAX)
            .and_then(|_| words.try_reserve_exact(SH_CMD_MAX))
            .map_err(|_| ShellError::OutOfMemory)?;
        spans
            .try_reserve_exact(CMD_ARGV_MAX)
            .map_err(|_| ShellError::OutOfMemory)?;

        tracing::debug!(capacity = SH_CMD_MAX, max_args = CMD_ARGV_MAX, "command buffer allocated");
        Ok(CommandBuffer { raw: Some(raw), words, spans })
    }

    /// Reset content and tokens, keeping the allocation.
    pub fn clear(&mut self) -> Result<(), ShellError> {
        let raw = self.raw.as_mut().ok_or(ShellError::InvalidState)?;
        raw.clear();
        self.words.clear();
        self.spans.clear();
        Ok(())
    }

    /// Drop the storage. Safe to call more than once.
    pub fn release(&mut self) {
        if self.raw.take().is_some() {
            tracing::debug!("command buffer released");
        }
        self.words = String::new();
        self.spans = Vec::new();
    }

    /// The (possibly truncated) line most recently stored.
    pub fn raw(&self) -> &str {
        self.raw.as_deref().unwrap_or("")
    }

    pub fn token_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Token `i`, or `None` at and past `token_count()`.
    pub fn token(&self, i: usize) -> Option<&str> {
        self.spans.get(i).map(|span| &self.words[span.clone()])
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(|span| &self.words[span.clone()])
    }

    pub fn argv(&self) -> Vec<&str> {
        self.tokens().collect()
    }

    /// Copy `line` into the raw buffer, cutting it at `SH_CMD_MAX - 1` bytes.
    /// Returns the number of bytes kept.
    pub(super) fn store_line(&mut self, line: &str) -> Result<usize, ShellError> {
        let raw = self.raw.as_mut().ok_or(ShellError::InvalidState)?;
        let mut end = line.len().min(SH_CMD_MAX - 1);
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        raw.push_str(&line[..end]);
        Ok(end)
    }

    pub(super) fn push_char(&mut self, c: char) {
        self.words.push(c);
    }

    /// Close the token being built. Empty tokens are dropped.
    pub(super) fn end_token(&mut self) -> Result<(), ShellError> {
        let start = self.spans.last().map_or(0, |span| span.end);
        if start == self.words.len() {
            return Ok(());
        }
        if self.spans.len() >= CMD_ARGV_MAX {
            return Err(ShellError::TooManyTokens { limit: CMD_ARGV_MAX });
        }
        self.spans.push(start..self.words.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_starts_empty() {
        let buf = CommandBuffer::allocate().unwrap();
        assert!(buf.raw.is_some());
        assert_eq!(buf.token_count(), 0);
        assert_eq!(buf.token(0), None);
        assert_eq!(buf.raw(), "");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = CommandBuffer::allocate().unwrap();
        buf.store_line("echo hi").unwrap();
        "echo".chars().for_each(|c| buf.push_char(c));
        buf.end_token().unwrap();
        let cap = buf.raw.as_ref().unwrap().capacity();

        buf.clear().unwrap();
        assert_eq!(buf.raw(), "");
        assert_eq!(buf.token_count(), 0);
        assert_eq!(buf.raw.as_ref().unwrap().capacity(), cap);
    }

    #[test]
    fn clear_after_release_is_invalid() {
        let mut buf = CommandBuffer::allocate().unwrap();
        buf.release();
        assert_eq!(buf.clear(), Err(ShellError::InvalidState));

        let mut never = CommandBuffer::default();
        assert_eq!(never.clear(), Err(ShellError::InvalidState));
    }

    #[test]
    fn release_is_idempotent() {
        let mut buf = CommandBuffer::allocate().unwrap();
        buf.release();
        buf.release();
        assert!(buf.raw.is_none());
    }

    #[test]
    fn store_line_truncates_on_char_boundary() {
        let mut buf = CommandBuffer::allocate().unwrap();
        let long = "é".repeat(SH_CMD_MAX);
        let kept = buf.store_line(&long).unwrap();
        assert!(kept <= SH_CMD_MAX - 1);
        assert_eq!(buf.raw().len(), kept);
        assert!(buf.raw().chars().all(|c| c == 'é'));
    }

    #[test]
    fn token_past_count_is_none() {
        let mut buf = CommandBuffer::allocate().unwrap();
        buf.push_char('l');
        buf.push_char('s');
        buf.end_token().unwrap();
        buf.end_token().unwrap();
        assert_eq!(buf.token_count(), 1);
        assert_eq!(buf.token(0), Some("ls"));
        assert_eq!(buf.token(1), None);
    }
}
