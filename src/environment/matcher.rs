//! Matching environment tags against the runtime context.
//!
//! Matching is a pure predicate: no I/O, no shared state, no errors.
//! Missing context values simply fail to match.

use std::fmt;

use super::context::RuntimeContext;
use super::tag::{EnvironmentTag, TagKind};
use crate::component::Metadata;

/// Check whether a single tag admits the given context.
///
/// ```
/// use envgate::environment::{matches, EnvironmentTag, Mode, RuntimeContext};
///
/// let ctx = RuntimeContext::new(Mode::Prod).with_group("east");
/// assert!(matches(&EnvironmentTag::group("EAST"), &ctx));
/// assert!(!matches(&EnvironmentTag::group("east").unless(), &ctx));
/// ```
pub fn matches(tag: &EnvironmentTag, ctx: &RuntimeContext) -> bool {
    let result = match tag {
        EnvironmentTag::Mode { mode, unless } => apply_unless(*unless, ctx.mode == *mode),
        EnvironmentTag::Profile { profile, unless } => {
            apply_unless(*unless, eq_ignore_case(ctx.profile.as_deref(), profile))
        }
        EnvironmentTag::Group { group, unless } => {
            apply_unless(*unless, eq_ignore_case(ctx.group.as_deref(), group))
        }
    };
    tracing::trace!(tag = %tag, matched = result, "evaluated environment tag");
    result
}

/// Check whether every tag admits the given context.
///
/// An empty sequence admits every context.
pub fn matches_all<'a, I>(tags: I, ctx: &RuntimeContext) -> bool
where
    I: IntoIterator<Item = &'a EnvironmentTag>,
{
    tags.into_iter().all(|tag| matches(tag, ctx))
}

/// Something that carries declarative metadata, some of which may be
/// environment tags.
pub trait Gated {
    /// All metadata declared on this element, in declaration order.
    fn metadata(&self) -> &[Metadata];

    /// The environment tags among this element's metadata.
    ///
    /// Metadata of any other kind is skipped.
    fn environment_tags(&self) -> Vec<&EnvironmentTag> {
        self.metadata()
            .iter()
            .filter_map(Metadata::as_environment_tag)
            .collect()
    }
}

/// Check whether an element's environment tags all admit the context.
///
/// Elements without environment tags are always admissible.
pub fn matches_element<G: Gated + ?Sized>(element: &G, ctx: &RuntimeContext) -> bool {
    element
        .metadata()
        .iter()
        .filter_map(Metadata::as_environment_tag)
        .all(|tag| matches(tag, ctx))
}

/// A combination of tags that works, but goes against how tags are meant
/// to be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagConflict {
    /// A mode tag declared together with a profile or group tag.
    ModeCombined { with: TagKind },
    /// More than one tag of the same kind.
    Duplicate { kind: TagKind, count: usize },
}

impl fmt::Display for TagConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagConflict::ModeCombined { with } => {
                write!(f, "mode tag should not be combined with a {} tag", with)
            }
            TagConflict::Duplicate { kind, count } => {
                write!(f, "{} {} tags declared, expected at most one", count, kind)
            }
        }
    }
}

/// Report declaration conflicts in a tag list.
///
/// This is a diagnostic only. [`matches_all`] evaluates conflicting tags
/// with plain AND semantics regardless of what this reports.
pub fn find_conflicts<'a, I>(tags: I) -> Vec<TagConflict>
where
    I: IntoIterator<Item = &'a EnvironmentTag>,
{
    let mut counts = [(TagKind::Mode, 0usize), (TagKind::Profile, 0), (TagKind::Group, 0)];
    for tag in tags {
        if let Some(entry) = counts.iter_mut().find(|(kind, _)| *kind == tag.kind()) {
            entry.1 += 1;
        }
    }

    let mut conflicts = Vec::new();
    let has_mode = counts[0].1 > 0;
    if has_mode {
        for (kind, count) in &counts[1..] {
            if *count > 0 {
                conflicts.push(TagConflict::ModeCombined { with: *kind });
            }
        }
    }
    for (kind, count) in counts {
        if count > 1 {
            conflicts.push(TagConflict::Duplicate { kind, count });
        }
    }
    conflicts
}

fn apply_unless(unless: bool, natural: bool) -> bool {
    unless ^ natural
}

fn eq_ignore_case(current: Option<&str>, declared: &str) -> bool {
    current.is_some_and(|current| current.to_lowercase() == declared.to_lowercase())
}
