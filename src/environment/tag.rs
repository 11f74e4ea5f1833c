//! Declarative environment tags.
//!
//! A tag is a condition on one axis of the runtime context: its
//! [`Mode`], its profile or its node group. Every tag carries an
//! `unless` flag which inverts the condition.
//!
//! Tags have a compact textual form used on the command line and in
//! manifests:
//!
//! ```text
//! mode=prod        active only in PROD mode
//! !profile=blue    active unless the profile is "blue"
//! group=east       active only in the "east" node group
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::mode::Mode;
use crate::error::EnvgateError;

/// The closed set of tag kinds the matcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Mode,
    Profile,
    Group,
}

impl TagKind {
    /// Look up a tag kind by its case-insensitive name.
    ///
    /// Returns `None` for anything outside the closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mode" => Some(TagKind::Mode),
            "profile" => Some(TagKind::Profile),
            "group" => Some(TagKind::Group),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Mode => "mode",
            TagKind::Profile => "profile",
            TagKind::Group => "group",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check whether a metadata kind name is one of the environment tag kinds.
///
/// Callers use this to separate environment tags from unrelated metadata
/// attached to the same component.
///
/// ```
/// use envgate::environment::is_recognized_tag_type;
///
/// assert!(is_recognized_tag_type("profile"));
/// assert!(is_recognized_tag_type("GROUP"));
/// assert!(!is_recognized_tag_type("schedule"));
/// ```
pub fn is_recognized_tag_type(name: &str) -> bool {
    TagKind::from_name(name).is_some()
}

/// A declared environment requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentTag {
    /// Requires the context mode to equal `mode`.
    Mode { mode: Mode, unless: bool },
    /// Requires the context profile to equal `profile`, ignoring case.
    Profile { profile: String, unless: bool },
    /// Requires the context node group to equal `group`, ignoring case.
    Group { group: String, unless: bool },
}

impl EnvironmentTag {
    pub fn mode(mode: Mode) -> Self {
        EnvironmentTag::Mode {
            mode,
            unless: false,
        }
    }

    pub fn profile(profile: impl Into<String>) -> Self {
        EnvironmentTag::Profile {
            profile: profile.into(),
            unless: false,
        }
    }

    pub fn group(group: impl Into<String>) -> Self {
        EnvironmentTag::Group {
            group: group.into(),
            unless: false,
        }
    }

    /// Invert this tag: it then matches every context except the declared value.
    pub fn unless(self) -> Self {
        self.with_unless(true)
    }

    /// Set the `unless` flag explicitly.
    pub fn with_unless(self, unless: bool) -> Self {
        match self {
            EnvironmentTag::Mode { mode, .. } => EnvironmentTag::Mode { mode, unless },
            EnvironmentTag::Profile { profile, .. } => EnvironmentTag::Profile { profile, unless },
            EnvironmentTag::Group { group, .. } => EnvironmentTag::Group { group, unless },
        }
    }

    pub fn kind(&self) -> TagKind {
        match self {
            EnvironmentTag::Mode { .. } => TagKind::Mode,
            EnvironmentTag::Profile { .. } => TagKind::Profile,
            EnvironmentTag::Group { .. } => TagKind::Group,
        }
    }

    pub fn is_unless(&self) -> bool {
        match self {
            EnvironmentTag::Mode { unless, .. }
            | EnvironmentTag::Profile { unless, .. }
            | EnvironmentTag::Group { unless, .. } => *unless,
        }
    }

    /// Build a tag from a kind name and a value.
    ///
    /// Returns `Ok(None)` when the kind is not an environment tag kind, so
    /// callers can keep such metadata around without acting on it.
    pub fn from_parts(kind: &str, value: &str, unless: bool) -> Result<Option<Self>, EnvgateError> {
        let Some(kind) = TagKind::from_name(kind) else {
            return Ok(None);
        };

        let value = value.trim();
        if value.is_empty() {
            return Err(EnvgateError::InvalidTag {
                spec: format!("{}=", kind),
                message: "tag value must not be empty".to_string(),
            });
        }

        let tag = match kind {
            TagKind::Mode => EnvironmentTag::mode(value.parse()?),
            TagKind::Profile => EnvironmentTag::profile(value),
            TagKind::Group => EnvironmentTag::group(value),
        };
        Ok(Some(tag.with_unless(unless)))
    }
}

impl FromStr for EnvironmentTag {
    type Err = EnvgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let (unless, body) = match spec.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let invalid = |message: &str| EnvgateError::InvalidTag {
            spec: s.to_string(),
            message: message.to_string(),
        };

        let (kind, value) = body
            .split_once('=')
            .ok_or_else(|| invalid("expected kind=value"))?;

        match EnvironmentTag::from_parts(kind, value, unless) {
            Ok(Some(tag)) => Ok(tag),
            Ok(None) => Err(invalid("unknown tag kind (expected mode, profile or group)")),
            Err(EnvgateError::InvalidTag { message, .. }) => Err(invalid(&message)),
            Err(e @ EnvgateError::UnknownMode { .. }) => Err(invalid(&e.to_string())),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for EnvironmentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unless() {
            f.write_str("!")?;
        }
        match self {
            EnvironmentTag::Mode { mode, .. } => write!(f, "mode={}", mode.name()),
            EnvironmentTag::Profile { profile, .. } => write!(f, "profile={}", profile),
            EnvironmentTag::Group { group, .. } => write!(f, "group={}", group),
        }
    }
}

// Serialized in compact form for JSON output.
impl Serialize for EnvironmentTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
