//! Manifest schema.
//!
//! A manifest declares the runtime context and the components whose
//! activation depends on it:
//!
//! ```yaml
//! context:
//!   mode: prod
//!   profile: blue
//!   group: east
//! components:
//!   - name: mailer
//!     tags:
//!       - profile=blue
//!       - kind: group
//!         value: west
//!         unless: true
//! ```

use serde::Deserialize;

use crate::component::{ComponentDescriptor, Metadata};
use crate::environment::{ContextLayer, EnvironmentTag, Mode};
use crate::error::{EnvgateError, Result};

/// Root manifest structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    /// Context values; each may be overridden by flags.
    #[serde(default)]
    pub context: ContextConfig,

    /// Components in registration order.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

/// The `context:` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContextConfig {
    pub mode: Option<Mode>,
    pub profile: Option<String>,
    pub group: Option<String>,
}

impl From<&ContextConfig> for ContextLayer {
    fn from(config: &ContextConfig) -> Self {
        ContextLayer {
            mode: config.mode,
            profile: config.profile.clone(),
            group: config.group.clone(),
        }
    }
}

/// A component entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentConfig {
    pub name: String,

    #[serde(default)]
    pub tags: Vec<TagDeclaration>,
}

/// A tag as written in a manifest, either `kind=value` or a map.
///
/// Kinds other than `mode`, `profile` and `group` are accepted and kept
/// as opaque metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagDeclaration {
    /// `kind=value`, prefixed with `!` for `unless`.
    Compact(String),
    /// `{ kind, value, unless }`.
    Full {
        kind: String,
        value: String,
        #[serde(default)]
        unless: bool,
    },
}

impl TagDeclaration {
    /// Convert into component metadata.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTag` for a compact declaration without `=`, or an
    /// environment tag with an empty value. Returns `UnknownMode` for a
    /// mode tag naming an unknown mode.
    pub fn to_metadata(&self) -> Result<Metadata> {
        let (kind, value, unless) = match self {
            TagDeclaration::Compact(spec) => {
                let trimmed = spec.trim();
                let (unless, body) = match trimmed.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, trimmed),
                };
                let (kind, value) = body.split_once('=').ok_or_else(|| EnvgateError::InvalidTag {
                    spec: spec.clone(),
                    message: "expected kind=value".to_string(),
                })?;
                (kind.trim(), value.trim(), unless)
            }
            TagDeclaration::Full {
                kind,
                value,
                unless,
            } => (kind.trim(), value.trim(), *unless),
        };

        match EnvironmentTag::from_parts(kind, value, unless)? {
            Some(tag) => Ok(Metadata::Environment(tag)),
            None => Ok(Metadata::other(kind, value)),
        }
    }
}

impl ComponentConfig {
    pub fn to_descriptor(&self) -> Result<ComponentDescriptor> {
        let metadata = self
            .tags
            .iter()
            .map(TagDeclaration::to_metadata)
            .collect::<Result<Vec<_>>>()?;
        Ok(ComponentDescriptor {
            name: self.name.clone(),
            metadata,
        })
    }
}

impl Manifest {
    /// Component descriptors in declaration order.
    pub fn descriptors(&self) -> Result<Vec<ComponentDescriptor>> {
        self.components
            .iter()
            .map(ComponentConfig::to_descriptor)
            .collect()
    }

    /// The manifest's layer of the context priority chain.
    pub fn context_layer(&self) -> ContextLayer {
        ContextLayer::from(&self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let yaml = r#"
context:
  mode: PROD
  profile: blue
  group: east
components:
  - name: mailer
    tags:
      - profile=blue
      - kind: group
        value: west
        unless: true
  - name: plain
"#;
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.context.mode, Some(Mode::Prod));
        assert_eq!(manifest.context.group.as_deref(), Some("east"));
        assert_eq!(manifest.components.len(), 2);
        assert!(manifest.components[1].tags.is_empty());

        let descriptors = manifest.descriptors().unwrap();
        assert_eq!(
            descriptors[0].metadata,
            vec![
                Metadata::Environment(EnvironmentTag::profile("blue")),
                Metadata::Environment(EnvironmentTag::group("west").unless()),
            ]
        );
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest: Manifest = serde_yaml::from_str("{}").unwrap();
        assert_eq!(manifest, Manifest::default());
        assert!(manifest.descriptors().unwrap().is_empty());
    }

    #[test]
    fn unknown_mode_in_context_fails_to_parse() {
        let result: std::result::Result<Manifest, _> =
            serde_yaml::from_str("context:\n  mode: nightly\n");
        assert!(result.is_err());
    }

    #[test]
    fn unrecognized_kinds_become_other_metadata() {
        let compact = TagDeclaration::Compact("audit=weekly".to_string());
        assert_eq!(
            compact.to_metadata().unwrap(),
            Metadata::other("audit", "weekly")
        );

        let full = TagDeclaration::Full {
            kind: "owner".to_string(),
            value: "ops".to_string(),
            unless: false,
        };
        assert_eq!(full.to_metadata().unwrap(), Metadata::other("owner", "ops"));
    }

    #[test]
    fn compact_unless_prefix() {
        let decl = TagDeclaration::Compact("!mode=dev".to_string());
        assert_eq!(
            decl.to_metadata().unwrap(),
            Metadata::Environment(EnvironmentTag::mode(Mode::Dev).unless())
        );
    }

    #[test]
    fn compact_without_equals_fails() {
        let decl = TagDeclaration::Compact("profile".to_string());
        assert!(matches!(
            decl.to_metadata(),
            Err(EnvgateError::InvalidTag { .. })
        ));
    }

    #[test]
    fn bad_mode_tag_fails() {
        let decl = TagDeclaration::Full {
            kind: "mode".to_string(),
            value: "nightly".to_string(),
            unless: false,
        };
        assert!(matches!(
            decl.to_metadata(),
            Err(EnvgateError::UnknownMode { .. })
        ));
    }

    #[test]
    fn context_layer_from_config() {
        let config = ContextConfig {
            mode: Some(Mode::Uat),
            profile: Some("blue".to_string()),
            group: None,
        };
        let layer = ContextLayer::from(&config);
        assert_eq!(layer.mode, Some(Mode::Uat));
        assert_eq!(layer.profile.as_deref(), Some("blue"));
        assert_eq!(layer.group, None);
    }
}
