//! Interactive prompts for CLI user input.
//!
//! Prompts are line based: questions and menus go to stderr, answers are read
//! from stdin, so piped answers work and stdout stays clean for `--format json`.
//! End of input or a blank answer cancels.

mod input;
mod select;

pub use input::Input;
pub use select::Select;

use std::io::{self, BufRead, IsTerminal, Write};

use syllabus_tree::prompt::{PromptError, PromptResult, Prompter};

/// Check if we're in interactive mode
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Prompt theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub prompt_prefix: String,
    pub prompt_suffix: String,
    pub error_prefix: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt_prefix: "?".to_string(),
            prompt_suffix: "›".to_string(),
            error_prefix: "✗".to_string(),
        }
    }
}

impl Theme {
    pub fn ascii() -> Self {
        Self {
            prompt_prefix: "?".to_string(),
            prompt_suffix: ">".to_string(),
            error_prefix: "!".to_string(),
        }
    }
}

/// Read one answer line. `None` on end of input or a blank line.
pub(crate) fn read_answer<R: BufRead>(reader: &mut R) -> PromptResult<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// [`Prompter`] over a line reader and a writer for the prompts.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    theme: Theme,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter on the process's stdin and stderr.
    pub fn stdio() -> Self {
        let theme = if is_interactive() {
            Theme::default()
        } else {
            Theme::ascii()
        };
        Self::new(io::stdin().lock(), io::stderr(), theme)
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W, theme: Theme) -> Self {
        Self {
            reader,
            writer,
            theme,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask_question(&mut self, prompt: &str) -> PromptResult<String> {
        Input::new(prompt).interact(&mut self.reader, &mut self.writer, &self.theme)
    }

    fn ask_choice(&mut self, prompt: &str, options: &[String]) -> PromptResult<String> {
        if options.is_empty() {
            return Err(PromptError::Cancelled);
        }
        Select::new(prompt, options).interact(&mut self.reader, &mut self.writer, &self.theme)
    }
}
