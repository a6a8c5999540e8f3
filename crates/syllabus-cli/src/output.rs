//! Output formatting utilities for CLI commands.

use serde::Serialize;
use std::io::Write;

use syllabus_tree::{AdherenceReport, BatchOutcome};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Render `value` in the context's format.
pub fn render<T>(format: OutputFormat, value: &T) -> Result<String, CliError>
where
    T: FormattedOutput + Serialize,
{
    Ok(match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    })
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    let stdout = std::io::stdout();
    write_output(ctx, value, stdout.lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(ctx: &CommandContext, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = render(ctx.format, value)?;
    writeln!(writer, "{output}")?;
    Ok(())
}

/// Helper for success/error status outputs
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub status: String,
    pub message: String,
}

impl StatusOutput {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

impl FormattedOutput for StatusOutput {
    fn format_text(&self) -> String {
        match self.status.as_str() {
            "success" => format!("✓ {}", self.message),
            _ => format!("{}: {}", self.status, self.message),
        }
    }
}

/// One row of `syllabus list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub ordinal: usize,
    pub name: String,
    pub topics: usize,
}

/// Output of `syllabus list`.
#[derive(Debug, Default, Serialize)]
pub struct ModuleList {
    pub modules: Vec<ModuleSummary>,
}

impl FormattedOutput for ModuleList {
    fn format_text(&self) -> String {
        if self.modules.is_empty() {
            return "No modules yet.".to_string();
        }
        let width = self
            .modules
            .iter()
            .map(|m| m.name.chars().count())
            .max()
            .unwrap_or(0);
        self.modules
            .iter()
            .map(|m| {
                let noun = if m.topics == 1 { "topic" } else { "topics" };
                format!("{:03}  {:<width$}  {} {noun}", m.ordinal, m.name, m.topics)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FormattedOutput for BatchOutcome {
    fn format_text(&self) -> String {
        let mut lines = vec![format!(
            "Created {} of {} topic(s) in {}",
            self.succeeded, self.requested, self.module
        )];
        for failure in &self.failures {
            lines.push(format!("  ✗ {failure}"));
        }
        if self.cancelled {
            lines.push("Cancelled before all topics were named.".to_string());
        }
        lines.join("\n")
    }
}

impl FormattedOutput for AdherenceReport {
    fn format_text(&self) -> String {
        let mut lines = vec![
            format!("Modules:      {}", self.modules),
            format!("Topics:       {}", self.topics),
            format!("Renamed:      {}", self.renamed),
            format!("Populated:    {}", self.populated),
            format!("Regenerated:  {}", self.regenerated),
            format!("Cumulative:   {}", self.cumulative),
        ];
        if !self.incomplete.is_empty() {
            lines.push("Incomplete topics (content files missing):".to_string());
            for path in &self.incomplete {
                lines.push(format!("  ! {}", path.display()));
            }
        }
        if !self.failures.is_empty() {
            lines.push("Failures:".to_string());
            for failure in &self.failures {
                lines.push(format!("  ✗ {failure}"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_list_text_aligns_names() {
        let list = ModuleList {
            modules: vec![
                ModuleSummary {
                    ordinal: 1,
                    name: "Arrays".to_string(),
                    topics: 1,
                },
                ModuleSummary {
                    ordinal: 2,
                    name: "Linked Lists".to_string(),
                    topics: 0,
                },
            ],
        };
        assert_eq!(
            list.format_text(),
            "001  Arrays        1 topic\n002  Linked Lists  0 topics"
        );
    }

    #[test]
    fn test_empty_module_list() {
        assert_eq!(ModuleList::default().format_text(), "No modules yet.");
    }

    #[test]
    fn test_batch_text_reports_failures_and_cancel() {
        let batch = BatchOutcome {
            module: "Arrays".to_string(),
            requested: 3,
            succeeded: 1,
            failed: 1,
            cancelled: true,
            failures: vec!["Search: invalid input: topic name is empty".to_string()],
        };
        let text = batch.format_text();
        assert!(text.starts_with("Created 1 of 3 topic(s) in Arrays\n"));
        assert!(text.contains("✗ Search"));
        assert!(text.ends_with("Cancelled before all topics were named."));
    }

    #[test]
    fn test_json_rendering() {
        let status = StatusOutput::success("done");
        let json = render(OutputFormat::Json, &status).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "done");
    }
}
