//! Component activation.
//!
//! Splits a set of component descriptors into those admissible in the
//! current runtime context and those that are skipped.

use serde::Serialize;

use super::descriptor::ComponentDescriptor;
use crate::environment::{find_conflicts, matches_element, Gated, RuntimeContext, TagConflict};

/// The outcome of activating a set of components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Activation {
    /// Components admissible in the context, in input order.
    pub active: Vec<ComponentDescriptor>,
    /// Components whose tags rejected the context, in input order.
    pub skipped: Vec<ComponentDescriptor>,
}

impl Activation {
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|c| c.name == name)
    }

    pub fn active_names(&self) -> Vec<&str> {
        self.active.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Decides which components get registered for a runtime context.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    context: RuntimeContext,
}

impl ComponentRegistry {
    pub fn new(context: RuntimeContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.context
    }

    /// Check a single component.
    pub fn admits(&self, component: &ComponentDescriptor) -> bool {
        matches_element(component, &self.context)
    }

    /// Conflicting tag declarations on a component.
    pub fn conflicts(&self, component: &ComponentDescriptor) -> Vec<TagConflict> {
        find_conflicts(component.environment_tags())
    }

    /// Activate every component admissible in the context.
    pub fn activate<I>(&self, components: I) -> Activation
    where
        I: IntoIterator<Item = ComponentDescriptor>,
    {
        let mut activation = Activation::default();
        for component in components {
            for conflict in self.conflicts(&component) {
                tracing::warn!(component = %component.name, "{}", conflict);
            }

            if self.admits(&component) {
                tracing::debug!(component = %component.name, context = %self.context, "activating component");
                activation.active.push(component);
            } else {
                tracing::debug!(component = %component.name, context = %self.context, "skipping component");
                activation.skipped.push(component);
            }
        }
        activation
    }
}
