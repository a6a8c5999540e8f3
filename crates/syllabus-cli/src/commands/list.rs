//! List command implementation.

use clap::Parser;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, ModuleList, ModuleSummary};

/// List modules with their topic counts
#[derive(Debug, Parser)]
pub struct ListCommand {}

impl ListCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let workspace = ctx.open_workspace().await?;
        let modules = workspace
            .index()
            .iter()
            .enumerate()
            .map(|(i, (key, topics))| ModuleSummary {
                ordinal: i + 1,
                name: workspace.naming().display_name(key),
                topics,
            })
            .collect();
        print_output(ctx, &ModuleList { modules })
    }
}
