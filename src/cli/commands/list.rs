//! `envgate list` command.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::component::{Activation, ComponentDescriptor, ComponentRegistry};
use crate::config::Manifest;
use crate::environment::RuntimeContext;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::to_json;

/// The list command implementation.
pub struct ListCommand {
    manifest: Manifest,
    context: RuntimeContext,
    args: ListArgs,
}

#[derive(Serialize)]
struct ListReport<'a> {
    context: &'a RuntimeContext,
    active: &'a [ComponentDescriptor],
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'a [ComponentDescriptor]>,
}

impl ListCommand {
    pub fn new(manifest: Manifest, context: RuntimeContext, args: ListArgs) -> Self {
        Self {
            manifest,
            context,
            args,
        }
    }

    fn show_component(ui: &mut dyn UserInterface, component: &ComponentDescriptor) {
        ui.message(&format!("  {}", component.name));
        if !component.metadata.is_empty() {
            let metadata: Vec<String> = component.metadata.iter().map(|m| m.to_string()).collect();
            ui.detail(&format!("    [{}]", metadata.join(", ")));
        }
    }

    fn show(&self, ui: &mut dyn UserInterface, activation: &Activation) {
        ui.detail(&format!("Context: {}", self.context));

        ui.success(&format!("Active ({}):", activation.active.len()));
        for component in &activation.active {
            Self::show_component(ui, component);
        }

        if !self.args.active_only {
            ui.message(&format!("Skipped ({}):", activation.skipped.len()));
            for component in &activation.skipped {
                Self::show_component(ui, component);
            }
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = ComponentRegistry::new(self.context.clone());
        let descriptors = self.manifest.descriptors()?;

        for component in &descriptors {
            for conflict in registry.conflicts(component) {
                ui.warning(&format!("Warning: {}: {}", component.name, conflict));
            }
        }

        let activation = registry.activate(descriptors);

        if self.args.json {
            let report = ListReport {
                context: &self.context,
                active: &activation.active,
                skipped: (!self.args.active_only).then_some(activation.skipped.as_slice()),
            };
            ui.raw(&to_json(&report)?);
        } else {
            self.show(ui, &activation);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_manifest;
    use crate::environment::Mode;
    use crate::ui::MockUI;
    use std::path::Path;

    const MANIFEST: &str = r#"
components:
  - name: debug-toolbar
    tags: [mode=dev]
  - name: east-cache
    tags:
      - kind: group
        value: EAST
  - name: reporting
    tags:
      - kind: schedule
        value: nightly
  - name: mixed
    tags: [mode=prod, profile=blue]
"#;

    fn manifest() -> Manifest {
        parse_manifest(MANIFEST, Path::new("envgate.yml")).unwrap()
    }

    fn prod_east() -> RuntimeContext {
        RuntimeContext::new(Mode::Prod).with_group("east")
    }

    #[test]
    fn lists_active_and_skipped() {
        let mut ui = MockUI::new();
        ListCommand::new(manifest(), prod_east(), ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.successes(), ["Active (2):"]);
        let messages = ui.messages();
        assert!(messages.contains(&"  east-cache".to_string()));
        assert!(messages.contains(&"  reporting".to_string()));
        assert!(messages.contains(&"Skipped (2):".to_string()));
        assert!(messages.contains(&"  debug-toolbar".to_string()));
    }

    #[test]
    fn warns_about_conflicting_components() {
        let mut ui = MockUI::new();
        ListCommand::new(manifest(), prod_east(), ListArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.warnings().len(), 1);
        assert!(ui.warnings()[0].contains("mixed"));
    }

    #[test]
    fn active_only_hides_skipped() {
        let mut ui = MockUI::new();
        let args = ListArgs {
            active_only: true,
            json: false,
        };
        ListCommand::new(manifest(), prod_east(), args)
            .execute(&mut ui)
            .unwrap();
        assert!(!ui.messages().iter().any(|m| m.starts_with("Skipped")));
    }

    #[test]
    fn json_output() {
        let mut ui = MockUI::new();
        let args = ListArgs {
            active_only: false,
            json: true,
        };
        ListCommand::new(manifest(), prod_east(), args)
            .execute(&mut ui)
            .unwrap();

        let report: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert_eq!(report["active"][0]["name"], "east-cache");
        assert_eq!(report["active"][1]["metadata"][0], "schedule=nightly");
        assert_eq!(report["skipped"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn json_active_only_omits_skipped() {
        let mut ui = MockUI::new();
        let args = ListArgs {
            active_only: true,
            json: true,
        };
        ListCommand::new(manifest(), prod_east(), args)
            .execute(&mut ui)
            .unwrap();

        let report: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert!(report.get("skipped").is_none());
    }
}
