//! `envgate context` command.

use crate::cli::args::ContextArgs;
use crate::environment::{ResolvedContext, ValueSource};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::to_json;

/// The context command implementation.
pub struct ContextCommand {
    resolved: ResolvedContext,
    args: ContextArgs,
}

impl ContextCommand {
    pub fn new(resolved: ResolvedContext, args: ContextArgs) -> Self {
        Self { resolved, args }
    }

    fn line(ui: &mut dyn UserInterface, label: &str, value: Option<&str>, source: &ValueSource) {
        ui.message(&format!(
            "{:<8} {} ({})",
            format!("{}:", label),
            value.unwrap_or("(none)"),
            source
        ));
    }
}

impl Command for ContextCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            ui.raw(&to_json(&self.resolved)?);
            return Ok(CommandResult::success());
        }

        let ctx = &self.resolved.context;
        let mode = ctx.mode.to_string();
        Self::line(ui, "Mode", Some(&mode), &self.resolved.mode_source);
        Self::line(ui, "Profile", ctx.profile.as_deref(), &self.resolved.profile_source);
        Self::line(ui, "Group", ctx.group.as_deref(), &self.resolved.group_source);

        Ok(CommandResult::success())
    }
}
