//! Masked entry of the API key on the terminal.

use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, Editor, Helper};
use std::borrow::Cow::{self, Owned};

const MASK: char = '*';

/// Line helper that redraws every typed character as [`MASK`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialMask;

impl Helper for CredentialMask {}

impl Completer for CredentialMask {
    type Candidate = String;
}

impl Hinter for CredentialMask {
    type Hint = String;
}

impl Validator for CredentialMask {}

impl Highlighter for CredentialMask {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Owned(std::iter::repeat(MASK).take(line.chars().count()).collect())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Prompt that reads the API key without echoing it.
pub struct CredentialPrompt {
    editor: Editor<CredentialMask, DefaultHistory>,
}

impl CredentialPrompt {
    pub fn new() -> rustyline::Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CredentialMask));
        // Highlighting is what hides the key, so it must stay on without a color terminal.
        editor.set_color_mode(ColorMode::Forced);
        editor.set_auto_add_history(false);
        Ok(Self { editor })
    }

    /// Ask until a non-blank key is entered. Returns `None` when the user
    /// interrupts or closes the input.
    pub fn read_key(&mut self, prompt: &str) -> rustyline::Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let key = line.trim();
                    if !key.is_empty() {
                        return Ok(Some(key.to_string()));
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }
}
