//! Runtime context resolution.
//!
//! Each axis of the context (mode, profile, node group) is resolved
//! independently using the priority chain:
//! 1. Explicit command-line flag
//! 2. Manifest `context:` section
//! 3. Environment variable (`ENVGATE_MODE`, `ENVGATE_PROFILE`, `ENVGATE_GROUP`)
//! 4. Default (`PROD` mode, no profile, no group)

use serde::Serialize;
use std::fmt;

use super::mode::Mode;
use crate::error::Result;

/// Environment variable consulted for the mode.
pub const MODE_VAR: &str = "ENVGATE_MODE";
/// Environment variable consulted for the profile.
pub const PROFILE_VAR: &str = "ENVGATE_PROFILE";
/// Environment variable consulted for the node group.
pub const GROUP_VAR: &str = "ENVGATE_GROUP";

/// The runtime context tags are matched against.
///
/// A context is fixed for the lifetime of a process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RuntimeContext {
    /// The current mode.
    pub mode: Mode,
    /// The current profile, if any.
    pub profile: Option<String>,
    /// The current node group, if any.
    pub group: Option<String>,
}

impl RuntimeContext {
    /// Create a context with the given mode and no profile or group.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            profile: None,
            group: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl fmt::Display for RuntimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mode={} profile={} group={}",
            self.mode,
            self.profile.as_deref().unwrap_or("-"),
            self.group.as_deref().unwrap_or("-")
        )
    }
}

/// How a context value was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Set via a command-line flag.
    Flag,
    /// Set in the manifest `context:` section.
    Manifest,
    /// Read from an environment variable.
    EnvVar(String),
    /// Nothing set it.
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::Manifest => write!(f, "manifest"),
            Self::EnvVar(var) => write!(f, "env {}", var),
            Self::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Context values supplied by one layer of the priority chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextLayer {
    pub mode: Option<Mode>,
    pub profile: Option<String>,
    pub group: Option<String>,
}

/// A resolved context together with where each value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContext {
    pub context: RuntimeContext,
    pub mode_source: ValueSource,
    pub profile_source: ValueSource,
    pub group_source: ValueSource,
}

impl RuntimeContext {
    /// Resolve the context from flags, manifest and process environment.
    pub fn resolve(flags: &ContextLayer, manifest: &ContextLayer) -> Result<ResolvedContext> {
        Self::resolve_with_env(flags, manifest, |key| std::env::var(key))
    }

    /// Resolve with a custom env var lookup (for testing).
    ///
    /// # Errors
    ///
    /// Returns `UnknownMode` if `ENVGATE_MODE` is consulted and holds an
    /// unknown mode name.
    pub fn resolve_with_env<F>(
        flags: &ContextLayer,
        manifest: &ContextLayer,
        env_fn: F,
    ) -> Result<ResolvedContext>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let env_value = |var: &str| env_fn(var).ok().and_then(non_empty);

        let (mode, mode_source) = if let Some(mode) = flags.mode {
            (mode, ValueSource::Flag)
        } else if let Some(mode) = manifest.mode {
            (mode, ValueSource::Manifest)
        } else if let Some(raw) = env_value(MODE_VAR) {
            (raw.parse::<Mode>()?, ValueSource::EnvVar(MODE_VAR.to_string()))
        } else {
            (Mode::default(), ValueSource::Default)
        };

        let (profile, profile_source) = resolve_label(
            flags.profile.as_deref(),
            manifest.profile.as_deref(),
            env_value(PROFILE_VAR),
            PROFILE_VAR,
        );
        let (group, group_source) = resolve_label(
            flags.group.as_deref(),
            manifest.group.as_deref(),
            env_value(GROUP_VAR),
            GROUP_VAR,
        );

        let resolved = ResolvedContext {
            context: RuntimeContext {
                mode,
                profile,
                group,
            },
            mode_source,
            profile_source,
            group_source,
        };
        tracing::debug!(context = %resolved.context, "resolved runtime context");
        Ok(resolved)
    }
}

fn resolve_label(
    flag: Option<&str>,
    manifest: Option<&str>,
    env: Option<String>,
    var: &str,
) -> (Option<String>, ValueSource) {
    if let Some(value) = flag.and_then(non_empty) {
        return (Some(value), ValueSource::Flag);
    }
    if let Some(value) = manifest.and_then(non_empty) {
        return (Some(value), ValueSource::Manifest);
    }
    if let Some(value) = env {
        return (Some(value), ValueSource::EnvVar(var.to_string()));
    }
    (None, ValueSource::Default)
}

fn non_empty<S: AsRef<str>>(value: S) -> Option<String> {
    let value = value.as_ref().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
