//! User interaction seam.

use std::collections::VecDeque;

use crate::error::TreeError;

/// Result type for prompts.
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors that can occur during prompts.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("input cancelled by user")]
    Cancelled,

    #[error("not running in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PromptError> for TreeError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => TreeError::Cancelled,
            other => TreeError::Prompt(other.to_string()),
        }
    }
}

/// Asks the user for input.
pub trait Prompter {
    /// Free-text answer.
    fn ask_question(&mut self, prompt: &str) -> PromptResult<String>;

    /// One of `options`, returned verbatim.
    fn ask_choice(&mut self, prompt: &str, options: &[String]) -> PromptResult<String>;
}

/// Prompter answering from a fixed script, for non-interactive runs and
/// tests. `None` answers, and running out of answers, cancel.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, prompt: &str) -> PromptResult<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .flatten()
            .ok_or(PromptError::Cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_question(&mut self, prompt: &str) -> PromptResult<String> {
        self.next(prompt)
    }

    fn ask_choice(&mut self, prompt: &str, options: &[String]) -> PromptResult<String> {
        let answer = self.next(prompt)?;
        if options.contains(&answer) {
            Ok(answer)
        } else {
            Err(PromptError::Cancelled)
        }
    }
}
