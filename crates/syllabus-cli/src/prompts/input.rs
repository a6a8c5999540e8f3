//! Free-text input prompt.

use std::io::{BufRead, Write};

use syllabus_tree::prompt::{PromptError, PromptResult};

use super::{read_answer, Theme};

/// Free-text question.
pub struct Input<'a> {
    prompt: &'a str,
}

impl<'a> Input<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self { prompt }
    }

    pub fn interact<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        theme: &Theme,
    ) -> PromptResult<String> {
        write!(
            writer,
            "{} {} {} ",
            theme.prompt_prefix, self.prompt, theme.prompt_suffix
        )?;
        writer.flush()?;
        read_answer(reader)?.ok_or(PromptError::Cancelled)
    }
}
