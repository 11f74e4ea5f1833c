//! Command-line interface for envgate.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, ContextArgs, ListArgs, PidArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
