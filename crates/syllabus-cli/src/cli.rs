//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use tracing::debug;

use syllabus_common_config::{ConfigLoader, Environment, SyllabusConfig};
use syllabus_tree::Workspace;

use crate::commands::{
    AddCommand, AdhereCommand, InitCommand, ListCommand, ModuleCommand, WatchCommand,
};
use crate::error::CliError;

/// Syllabus - numbered course content trees
///
/// Scaffold modules and topics, keep their numbering contiguous and repair
/// missing or empty files.
#[derive(Debug, Parser)]
#[command(
    name = "syllabus",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error logging"
    )]
    pub quiet: bool,

    /// Directory holding `modules/`
    #[arg(
        short,
        long,
        global = true,
        env = "SYLLABUS_ROOT",
        value_hint = ValueHint::DirPath,
        help = "Workspace root (defaults to the current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "SYLLABUS_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the modules directory and a default configuration file
    Init(InitCommand),

    /// Create a module after the last one
    Module(ModuleCommand),

    /// Add topics to a module, interactively or from flags
    Add(AddCommand),

    /// Renumber everything and repair missing or empty files
    Adhere(AdhereCommand),

    /// Keep numbering contiguous while the tree is edited
    Watch(WatchCommand),

    /// List modules with their topic counts
    #[command(visible_alias = "ls")]
    List(ListCommand),
}

impl Cli {
    /// Resolve the workspace root. `init` may create it.
    fn resolve_root(&self) -> Result<PathBuf, CliError> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()
                .map_err(|e| CliError::io("cannot determine the current directory", e))?,
        };

        if matches!(self.command, Command::Init(_)) {
            std::fs::create_dir_all(&root)
                .map_err(|e| CliError::io_with_path("cannot create workspace root", e, &root))?;
        }

        std::fs::canonicalize(&root).map_err(|e| {
            CliError::io_with_path(format!("workspace root {} is not usable", root.display()), e, &root)
        })
    }

    /// Load configuration from `--config`, or the workspace's own file, then
    /// apply environment overrides.
    pub fn load_config(&self, root: &Path) -> Result<SyllabusConfig, CliError> {
        let loader = ConfigLoader::new(root);
        let mut config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };
        Environment::apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self) -> Result<(), CliError> {
        let root = self.resolve_root()?;
        let config = self.load_config(&root)?;
        debug!(root = %root.display(), "workspace resolved");

        let ctx = CommandContext {
            root,
            config,
            format: self.format,
        };

        match self.command {
            Command::Init(cmd) => cmd.execute(&ctx).await,
            Command::Module(cmd) => cmd.execute(&ctx).await,
            Command::Add(cmd) => cmd.execute(&ctx).await,
            Command::Adhere(cmd) => cmd.execute(&ctx).await,
            Command::Watch(cmd) => cmd.execute(&ctx).await,
            Command::List(cmd) => cmd.execute(&ctx).await,
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub root: PathBuf,
    pub config: SyllabusConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Open the workspace on disk with the loaded configuration.
    pub async fn open_workspace(&self) -> Result<Workspace, CliError> {
        Ok(Workspace::open_local(&self.root, self.config.clone()).await?)
    }
}
