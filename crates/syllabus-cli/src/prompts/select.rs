//! Numbered menu prompt.

use std::io::{BufRead, Write};

use syllabus_tree::prompt::{PromptError, PromptResult};

use super::{read_answer, Theme};

/// Pick one of a list of options by number or by name.
pub struct Select<'a> {
    prompt: &'a str,
    options: &'a [String],
}

impl<'a> Select<'a> {
    pub fn new(prompt: &'a str, options: &'a [String]) -> Self {
        Self { prompt, options }
    }

    /// Option matching `answer`: a 1-based number or the option text, ignoring case.
    fn resolve(&self, answer: &str) -> Option<&'a String> {
        if let Ok(n) = answer.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.options.get(i));
        }
        self.options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(answer))
    }

    pub fn interact<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        theme: &Theme,
    ) -> PromptResult<String> {
        writeln!(writer, "{} {}", theme.prompt_prefix, self.prompt)?;
        for (i, option) in self.options.iter().enumerate() {
            writeln!(writer, "  {:>2}) {option}", i + 1)?;
        }

        loop {
            write!(writer, "{} ", theme.prompt_suffix)?;
            writer.flush()?;
            let answer = read_answer(reader)?.ok_or(PromptError::Cancelled)?;
            if let Some(option) = self.resolve(&answer) {
                return Ok(option.clone());
            }
            writeln!(
                writer,
                "{} enter a number from 1 to {}",
                theme.error_prefix,
                self.options.len()
            )?;
        }
    }
}
