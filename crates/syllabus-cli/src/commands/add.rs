//! Add command implementation.

use clap::Parser;

use syllabus_tree::workflow;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_output;
use crate::prompts::TerminalPrompter;

/// Add topics to a module
///
/// Without flags, asks for the module, the number of topics and each topic
/// name. With `--module` and `--topic`, creates the named topics directly.
#[derive(Debug, Parser)]
pub struct AddCommand {
    /// Module to add topics to; created if it does not exist
    #[arg(short, long, requires = "topics")]
    pub module: Option<String>,

    /// Topic name (repeatable)
    #[arg(short = 't', long = "topic", requires = "module")]
    pub topics: Vec<String>,
}

impl AddCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut workspace = ctx.open_workspace().await?;

        let batch = match &self.module {
            Some(module) if !self.topics.is_empty() => {
                workflow::create_topics(&mut workspace, module, &self.topics).await
            }
            _ => {
                let mut prompter = TerminalPrompter::stdio();
                workflow::add_topics(&mut workspace, &mut prompter).await?
            }
        };

        print_output(ctx, &batch)
    }
}
