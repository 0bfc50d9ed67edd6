// src/readline/mod.rs
// Line acquisition: reedline when stdin is a terminal, plain line reads
// when it is a pipe or file.

use std::borrow::Cow;
use std::io::{BufRead, IsTerminal, Write};

use reedline::{
    ColumnarMenu, Completer, DefaultHinter, EditCommand, FileBackedHistory, KeyCode,
    KeyModifiers, MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu, Signal, Span, Suggestion,
};

use crate::completion;
use crate::config::HistoryConfig;

// ── Prompt ───────────────────────────────────────────────────────────────────

pub struct DshPrompt<'a> {
    pub text: &'a str,
}

impl Prompt for DshPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.text)
    }
    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let indicator = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-search: {}) ", indicator, history_search.term))
    }
}

// ── Tab completer ────────────────────────────────────────────────────────────

pub struct DshCompleter;

impl Completer for DshCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let partial = &before_cursor[word_start..];
        let is_first_word = before_cursor[..word_start].trim().is_empty();

        completion::complete(partial, is_first_word)
            .into_iter()
            .map(|c| Suggestion {
                value: c.value,
                description: c.builtin.then(|| "builtin".to_string()),
                style: None,
                extra: None,
                span: Span::new(word_start, pos),
                append_whitespace: c.is_word,
            })
            .collect()
    }
}

// ── Line source ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ReadlineError {
    Interrupted,
    Eof,
    Other(String),
}

pub enum ShellReadline {
    Editor(Box<Reedline>),
    Plain,
}

impl ShellReadline {
    /// Interactive editor on a terminal, plain reads otherwise.
    pub fn new(history: &HistoryConfig) -> Self {
        if std::io::stdin().is_terminal() {
            ShellReadline::Editor(Box::new(build_editor(history)))
        } else {
            ShellReadline::Plain
        }
    }

    pub fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        match self {
            ShellReadline::Editor(editor) => match editor.read_line(&DshPrompt { text: prompt }) {
                Ok(Signal::Success(line)) => Ok(line),
                Ok(Signal::CtrlC) => Err(ReadlineError::Interrupted),
                Ok(Signal::CtrlD) => Err(ReadlineError::Eof),
                Err(e) => Err(ReadlineError::Other(e.to_string())),
            },
            ShellReadline::Plain => read_plain(&mut std::io::stdin().lock(), prompt),
        }
    }
}

fn build_editor(history: &HistoryConfig) -> Reedline {
    let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

    let mut keybindings = reedline::default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('l'),
        ReedlineEvent::ClearScreen,
    );
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('u'),
        ReedlineEvent::Edit(vec![EditCommand::CutFromStart]),
    );

    let editor = Reedline::create()
        .with_completer(Box::new(DshCompleter))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(reedline::Emacs::new(keybindings)))
        .with_hinter(Box::new(
            DefaultHinter::default().with_style(
                nu_ansi_term::Style::new()
                    .italic()
                    .fg(nu_ansi_term::Color::DarkGray),
            ),
        ));

    let path = history.path();
    match FileBackedHistory::with_file(history.size, path.clone()) {
        Ok(h) => editor.with_history(Box::new(h)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "history disabled");
            editor
        }
    }
}

/// Print the prompt, read one line, strip the line ending.
fn read_plain(input: &mut impl BufRead, prompt: &str) -> Result<String, ReadlineError> {
    print!("{prompt}");
    std::io::stdout().flush().ok();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Err(ReadlineError::Eof),
        Ok(_) => {
            let end = line.trim_end_matches(['\n', '\r']).len();
            line.truncate(end);
            Ok(line)
        }
        Err(e) => Err(ReadlineError::Other(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reads_one_line_at_a_time() {
        let mut input = std::io::Cursor::new("ls -la\r\nrc\n");
        assert_eq!(read_plain(&mut input, "").unwrap(), "ls -la");
        assert_eq!(read_plain(&mut input, "").unwrap(), "rc");
        assert!(matches!(read_plain(&mut input, ""), Err(ReadlineError::Eof)));
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let mut input = std::io::Cursor::new("exit");
        assert_eq!(read_plain(&mut input, "").unwrap(), "exit");
    }

    #[test]
    fn completer_replaces_current_word() {
        let mut completer = DshCompleter;
        let got = completer.complete("dr", 2);
        let dragon = got.iter().find(|s| s.value == "dragon").unwrap();
        assert_eq!(dragon.span, Span::new(0, 2));
        assert_eq!(dragon.description.as_deref(), Some("builtin"));
    }
}
