//! envgate - Environment gating for components.
//!
//! envgate decides whether a unit of code should be active in the current
//! runtime context. The context has three independent axes: a mode
//! (`DEV`, `SIT`, `UAT`, `PROD`), a profile and a node group. Components
//! declare environment tags; a component is active when all of its tags
//! match.
//!
//! It also provides a best-effort process identity for labelling logs.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`component`] - Component descriptors and activation
//! - [`config`] - Manifest loading and parsing
//! - [`environment`] - Modes, tags, runtime context and matching
//! - [`error`] - Error types and result aliases
//! - [`process`] - Process identity resolution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use envgate::environment::{matches_all, EnvironmentTag, Mode, RuntimeContext};
//!
//! let ctx = RuntimeContext::new(Mode::Prod)
//!     .with_profile("blue")
//!     .with_group("east");
//!
//! assert!(matches_all(&[EnvironmentTag::group("EAST")], &ctx));
//! assert!(!matches_all(
//!     &[EnvironmentTag::mode(Mode::Prod), EnvironmentTag::group("west")],
//!     &ctx,
//! ));
//! ```

pub mod cli;
pub mod component;
pub mod config;
pub mod environment;
pub mod error;
pub mod process;
pub mod ui;

pub use error::{EnvgateError, Result};
