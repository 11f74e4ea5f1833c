//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::environment::{ContextLayer, EnvironmentTag, Mode};

/// envgate - Environment gating for components.
#[derive(Debug, Parser)]
#[command(name = "envgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to manifest (overrides default envgate.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Runtime mode (dev, sit, uat, prod)
    #[arg(long, global = true, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Runtime profile
    #[arg(long, global = true, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Runtime node group
    #[arg(long, global = true, value_name = "GROUP")]
    pub group: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The context values given as flags.
    pub fn context_flags(&self) -> ContextLayer {
        ContextLayer {
            mode: self.mode,
            profile: self.profile.clone(),
            group: self.group.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether tags admit the current context
    Check(CheckArgs),

    /// List active and skipped components from the manifest
    List(ListArgs),

    /// Show the resolved runtime context
    Context(ContextArgs),

    /// Show the process identity
    Pid(PidArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Tags to check, e.g. `mode=prod` or `!group=west`
    #[arg(value_name = "TAG")]
    pub tags: Vec<EnvironmentTag>,

    /// Fail when tags are combined in unsupported ways
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only list active components
    #[arg(long)]
    pub active_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `context` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ContextArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `pid` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PidArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_with_tags() {
        let cli = Cli::parse_from(["envgate", "check", "mode=prod", "!group=west", "--strict"]);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(
                    args.tags,
                    vec![
                        EnvironmentTag::mode(Mode::Prod),
                        EnvironmentTag::group("west").unless()
                    ]
                );
                assert!(args.strict);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_global_context_flags() {
        let cli = Cli::parse_from([
            "envgate", "context", "--mode", "DEV", "--profile", "blue", "--group", "east",
        ]);
        let flags = cli.context_flags();
        assert_eq!(flags.mode, Some(Mode::Dev));
        assert_eq!(flags.profile.as_deref(), Some("blue"));
        assert_eq!(flags.group.as_deref(), Some("east"));
    }

    #[test]
    fn invalid_mode_is_rejected() {
        assert!(Cli::try_parse_from(["envgate", "context", "--mode", "nightly"]).is_err());
    }

    #[test]
    fn invalid_tag_is_rejected() {
        assert!(Cli::try_parse_from(["envgate", "check", "colour=blue"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["envgate"]).is_err());
    }

    #[test]
    fn parse_pid_json() {
        let cli = Cli::parse_from(["envgate", "pid", "--json"]);
        assert!(matches!(cli.command, Commands::Pid(PidArgs { json: true })));
    }
}
