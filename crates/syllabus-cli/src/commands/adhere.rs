//! Adhere command implementation.

use clap::Parser;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_output;

/// Renumber everything and repair missing or empty files
#[derive(Debug, Parser)]
pub struct AdhereCommand {}

impl AdhereCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut workspace = ctx.open_workspace().await?;
        let report = workspace.adhere().await?;
        print_output(ctx, &report)
    }
}
