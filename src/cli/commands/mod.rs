//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves the
//! manifest and runtime context once and routes CLI subcommands to their
//! implementations.

pub mod check;
pub mod context;
pub mod dispatcher;
pub mod list;
pub mod pid;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use serde::Serialize;

use crate::error::Result;

/// Render a report as pretty-printed JSON.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?)
}
