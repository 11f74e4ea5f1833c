//! Component descriptors and their declarative metadata.

use serde::Serialize;
use std::fmt;

use crate::environment::{EnvironmentTag, Gated};

/// One piece of metadata declared on a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    /// An environment tag, evaluated by the matcher.
    Environment(EnvironmentTag),
    /// Metadata of any other kind; carried along but never evaluated.
    Other { kind: String, value: String },
}

impl Metadata {
    pub fn other(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Metadata::Other {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn as_environment_tag(&self) -> Option<&EnvironmentTag> {
        match self {
            Metadata::Environment(tag) => Some(tag),
            Metadata::Other { .. } => None,
        }
    }
}

impl From<EnvironmentTag> for Metadata {
    fn from(tag: EnvironmentTag) -> Self {
        Metadata::Environment(tag)
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metadata::Environment(tag) => write!(f, "{}", tag),
            Metadata::Other { kind, value } => write!(f, "{}={}", kind, value),
        }
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A registrable component and everything declared about it.
///
/// # Example
///
/// ```
/// use envgate::component::ComponentDescriptor;
/// use envgate::environment::{matches_element, EnvironmentTag, Mode, RuntimeContext};
///
/// let mailer = ComponentDescriptor::new("mailer")
///     .with_tag(EnvironmentTag::mode(Mode::Dev).unless())
///     .with_metadata("owner", "ops");
///
/// assert!(matches_element(&mailer, &RuntimeContext::new(Mode::Prod)));
/// assert!(!matches_element(&mailer, &RuntimeContext::new(Mode::Dev)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    /// Component name.
    pub name: String,
    /// Declared metadata, in declaration order.
    pub metadata: Vec<Metadata>,
}

impl ComponentDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Vec::new(),
        }
    }

    /// Declare an environment tag.
    pub fn with_tag(mut self, tag: EnvironmentTag) -> Self {
        self.metadata.push(Metadata::Environment(tag));
        self
    }

    /// Declare metadata that is not an environment tag.
    pub fn with_metadata(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push(Metadata::other(kind, value));
        self
    }
}

impl Gated for ComponentDescriptor {
    fn metadata(&self) -> &[Metadata] {
        &self.metadata
    }
}
