//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_project_manifest, Manifest};
use crate::environment::{ResolvedContext, RuntimeContext};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load the manifest and resolve the runtime context for `cli`.
    pub fn environment(&self, cli: &Cli) -> Result<(Manifest, ResolvedContext)> {
        let manifest = load_project_manifest(&self.project_root, cli.config.as_deref())?;
        let resolved = RuntimeContext::resolve(&cli.context_flags(), &manifest.context_layer())?;
        Ok((manifest, resolved))
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Check(args) => {
                let (_, resolved) = self.environment(cli)?;
                let cmd = super::check::CheckCommand::new(resolved.context, args.clone());
                cmd.execute(ui)
            }
            Commands::List(args) => {
                let (manifest, resolved) = self.environment(cli)?;
                let cmd = super::list::ListCommand::new(manifest, resolved.context, args.clone());
                cmd.execute(ui)
            }
            Commands::Context(args) => {
                let (_, resolved) = self.environment(cli)?;
                let cmd = super::context::ContextCommand::new(resolved, args.clone());
                cmd.execute(ui)
            }
            Commands::Pid(args) => {
                let cmd = super::pid::PidCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
