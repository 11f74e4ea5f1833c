//! `envgate pid` command.

use crate::cli::args::PidArgs;
use crate::error::Result;
use crate::process::{process_identity, ResolvedIdentity};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::to_json;

/// The pid command implementation.
pub struct PidCommand {
    identity: &'static ResolvedIdentity,
    args: PidArgs,
}

impl PidCommand {
    pub fn new(args: PidArgs) -> Self {
        Self::with_identity(process_identity(), args)
    }

    /// Report a given identity instead of this process's (for testing).
    pub fn with_identity(identity: &'static ResolvedIdentity, args: PidArgs) -> Self {
        Self { identity, args }
    }
}

impl Command for PidCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            ui.raw(&to_json(self.identity)?);
        } else {
            ui.raw(&self.identity.value);
            ui.detail(&format!("resolved via {}", self.identity.source));
        }
        Ok(CommandResult::success())
    }
}
