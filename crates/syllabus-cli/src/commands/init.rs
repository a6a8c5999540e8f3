//! Init command implementation.

use clap::Parser;
use serde::Serialize;

use syllabus_common_config::{ConfigLoader, SyllabusConfig};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Create the modules directory and a default configuration file
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Overwrite an existing configuration file with the defaults
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct InitOutput {
    root: String,
    config: String,
    config_written: bool,
    modules: usize,
}

impl FormattedOutput for InitOutput {
    fn format_text(&self) -> String {
        let config = if self.config_written {
            format!("wrote {}", self.config)
        } else {
            format!("kept {}", self.config)
        };
        format!(
            "✓ Initialized {} ({} module(s), {config})",
            self.root, self.modules
        )
    }
}

impl InitCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let loader = ConfigLoader::new(&ctx.root);
        let config_path = loader.config_path();
        let config_written = self.force || !config_path.exists();
        if config_written {
            loader.save(&SyllabusConfig::default())?;
        }

        let workspace = ctx.open_workspace().await?;

        print_output(
            ctx,
            &InitOutput {
                root: ctx.root.display().to_string(),
                config: config_path.display().to_string(),
                config_written,
                modules: workspace.index().module_count(),
            },
        )
    }
}
