//! Process identity.
//!
//! Provides a best-effort, human-readable identifier for the running
//! process, computed once and cached for the lifetime of the process.

pub mod identity;

pub use identity::{
    current_thread_id, process_id, process_identity, runtime_name, IdentityProbe,
    IdentitySource, ProcSelfProbe, ProcessIdentityResolver, ResolvedIdentity, RuntimeNameProbe,
    ShellProbe, DEFAULT_SHELL_TIMEOUT,
};
