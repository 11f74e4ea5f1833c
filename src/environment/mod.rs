//! Environment gating.
//!
//! Decides whether a component should be active in the current runtime
//! context. The context has three independent axes:
//!
//! - [`Mode`] - a closed set (`DEV`, `SIT`, `UAT`, `PROD`), compared exactly
//! - profile - a free-form label, compared ignoring case
//! - node group - a free-form label, compared ignoring case
//!
//! Components declare [`EnvironmentTag`]s; a component is admissible when
//! every one of its tags matches (see [`matches_all`]).

pub mod context;
pub mod matcher;
pub mod mode;
pub mod tag;

pub use context::{ContextLayer, ResolvedContext, RuntimeContext, ValueSource};
pub use matcher::{find_conflicts, matches, matches_all, matches_element, Gated, TagConflict};
pub use mode::Mode;
pub use tag::{is_recognized_tag_type, EnvironmentTag, TagKind};
