//! Module command implementation.

use clap::Parser;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, StatusOutput};

/// Create a module after the last one
#[derive(Debug, Parser)]
pub struct ModuleCommand {
    /// Module name, in any casing or separator style
    pub name: String,
}

impl ModuleCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut workspace = ctx.open_workspace().await?;
        let created = workspace.create_module(&self.name).await?;
        print_output(
            ctx,
            &StatusOutput::success(format!("Created module {}", created.dir_name)),
        )
    }
}
