//! `envgate check` command.
//!
//! Exit codes: 0 when every tag admits the context, 1 when one does not,
//! 2 when `--strict` is set and the tags conflict.

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::environment::{
    find_conflicts, matches, matches_all, EnvironmentTag, RuntimeContext, TagConflict,
};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::to_json;

/// Exit code for conflicting tags under `--strict`.
pub const EXIT_CONFLICT: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    context: RuntimeContext,
    args: CheckArgs,
}

#[derive(Serialize)]
struct TagReport<'a> {
    tag: &'a EnvironmentTag,
    matches: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    context: &'a RuntimeContext,
    tags: Vec<TagReport<'a>>,
    conflicts: Vec<String>,
    admissible: bool,
}

impl CheckCommand {
    pub fn new(context: RuntimeContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    fn exit_code(&self, admissible: bool, conflicts: &[TagConflict]) -> i32 {
        if self.args.strict && !conflicts.is_empty() {
            EXIT_CONFLICT
        } else if admissible {
            0
        } else {
            1
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let tags = &self.args.tags;
        let conflicts = find_conflicts(tags);
        let admissible = matches_all(tags, &self.context);

        if self.args.json {
            let report = CheckReport {
                context: &self.context,
                tags: tags
                    .iter()
                    .map(|tag| TagReport {
                        tag,
                        matches: matches(tag, &self.context),
                    })
                    .collect(),
                conflicts: conflicts.iter().map(ToString::to_string).collect(),
                admissible,
            };
            ui.raw(&to_json(&report)?);
        } else {
            for conflict in &conflicts {
                ui.warning(&format!("Warning: {}", conflict));
            }

            ui.detail(&format!("Context: {}", self.context));
            for tag in tags {
                let mark = if matches(tag, &self.context) { "✓" } else { "✗" };
                ui.message(&format!("  {} {}", mark, tag));
            }

            if admissible {
                ui.success(&format!("Admissible in {}", self.context));
            } else {
                ui.message(&format!("Not admissible in {}", self.context));
            }
        }

        let exit_code = self.exit_code(admissible, &conflicts);
        if exit_code == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(exit_code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Mode;
    use crate::ui::MockUI;

    fn prod_blue_east() -> RuntimeContext {
        RuntimeContext::new(Mode::Prod)
            .with_profile("blue")
            .with_group("east")
    }

    fn check(tags: Vec<EnvironmentTag>) -> CheckArgs {
        CheckArgs {
            tags,
            ..Default::default()
        }
    }

    #[test]
    fn no_tags_is_admissible() {
        let mut ui = MockUI::new();
        let result = CheckCommand::new(prod_blue_east(), check(vec![]))
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.successes()[0].starts_with("Admissible"));
    }

    #[test]
    fn matching_tags_are_admissible() {
        let mut ui = MockUI::new();
        let args = check(vec![EnvironmentTag::group("EAST")]);
        let result = CheckCommand::new(prod_blue_east(), args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 0);
        assert!(ui.messages().iter().any(|m| m.contains("✓ group=EAST")));
    }

    #[test]
    fn one_failing_tag_rejects() {
        let mut ui = MockUI::new();
        let args = check(vec![EnvironmentTag::mode(Mode::Prod), EnvironmentTag::group("west")]);
        let result = CheckCommand::new(prod_blue_east(), args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.messages().iter().any(|m| m.contains("✗ group=west")));
        assert!(ui.messages().iter().any(|m| m.starts_with("Not admissible")));
    }

    #[test]
    fn conflicts_warn_but_do_not_fail() {
        let mut ui = MockUI::new();
        let args = check(vec![EnvironmentTag::mode(Mode::Prod), EnvironmentTag::profile("blue")]);
        let result = CheckCommand::new(prod_blue_east(), args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(ui.warnings().len(), 1);
    }

    #[test]
    fn strict_conflicts_fail() {
        let mut ui = MockUI::new();
        let args = CheckArgs {
            tags: vec![EnvironmentTag::mode(Mode::Prod), EnvironmentTag::profile("blue")],
            strict: true,
            json: false,
        };
        let result = CheckCommand::new(prod_blue_east(), args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, EXIT_CONFLICT);
    }

    #[test]
    fn json_report() {
        let mut ui = MockUI::new();
        let args = CheckArgs {
            tags: vec![EnvironmentTag::group("east").unless()],
            strict: false,
            json: true,
        };
        let result = CheckCommand::new(prod_blue_east(), args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);

        let report: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert_eq!(report["admissible"], false);
        assert_eq!(report["tags"][0]["tag"], "!group=east");
        assert_eq!(report["tags"][0]["matches"], false);
        assert_eq!(report["context"]["mode"], "prod");
        assert!(ui.messages().is_empty());
    }
}
