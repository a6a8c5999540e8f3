//! Watch command implementation.

use clap::Parser;
use tracing::info;

use syllabus_tree::{ChangeReactor, TreeWatcher};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, StatusOutput};

/// Keep numbering contiguous while the tree is edited
///
/// Runs until interrupted with Ctrl-C.
#[derive(Debug, Parser)]
pub struct WatchCommand {
    /// Run an adherence pass before watching
    #[arg(long)]
    pub adhere: bool,
}

impl WatchCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut workspace = ctx.open_workspace().await?;
        if self.adhere {
            let report = workspace.adhere().await?;
            print_output(ctx, &report)?;
        }

        let (watcher, events) = TreeWatcher::channel(
            workspace.modules_dir(),
            ctx.config.watch.channel_capacity,
        )?;
        info!(path = %watcher.modules_dir().display(), "watching for changes");
        eprintln!(
            "Watching {} (Ctrl-C to stop)",
            watcher.modules_dir().display()
        );

        let reactor = ChangeReactor::new(workspace, events);
        let workspace = reactor
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            })
            .await;
        drop(watcher);

        print_output(
            ctx,
            &StatusOutput::success(format!(
                "Stopped watching; {} module(s) indexed",
                workspace.index().module_count()
            )),
        )
    }
}
