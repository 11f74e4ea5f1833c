//! Process identity resolution.
//!
//! Resolves a best-effort identifier for the running process. The
//! identifier is meant for labelling log lines and reports, not for
//! uniqueness across machines.
//!
//! Strategies are tried in order and the first one producing a non-empty
//! value wins:
//! 1. `/proc/self` link target (unix)
//! 2. `echo $PPID` through `/bin/sh` (unix)
//! 3. `<pid>@<host>` runtime name (non-unix)
//! 4. The resolving thread's id, which always succeeds
//!
//! Strategy failures are logged at debug level and never surfaced.

use serde::Serialize;
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::sync::{LazyLock, OnceLock};
use std::thread;
use std::time::Duration;

/// Default wait for the shell strategy before the child is killed.
pub const DEFAULT_SHELL_TIMEOUT: Duration = Duration::from_secs(2);

/// Which strategy produced the process identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Final path segment of the `/proc/self` link.
    ProcSelf,
    /// First line printed by a shell.
    Shell,
    /// Prefix of a `<pid>@<host>` runtime name.
    RuntimeName,
    /// Id of the thread that performed the resolution.
    ThreadId,
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcSelf => write!(f, "/proc/self"),
            Self::Shell => write!(f, "shell"),
            Self::RuntimeName => write!(f, "runtime name"),
            Self::ThreadId => write!(f, "thread id"),
        }
    }
}

impl Serialize for IdentitySource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One way of finding out the process identity.
pub trait IdentityProbe: Send + Sync {
    /// The source reported when this probe wins.
    fn source(&self) -> IdentitySource;

    /// Try to determine the identity. `None` means "try the next probe".
    fn probe(&self) -> Option<String>;
}

/// Reads the target of the self-process link.
#[derive(Debug, Clone)]
pub struct ProcSelfProbe {
    path: PathBuf,
}

impl ProcSelfProbe {
    pub fn new() -> Self {
        Self::with_path("/proc/self")
    }

    /// Use a different link path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcSelfProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProbe for ProcSelfProbe {
    fn source(&self) -> IdentitySource {
        IdentitySource::ProcSelf
    }

    fn probe(&self) -> Option<String> {
        match std::fs::canonicalize(&self.path) {
            Ok(target) => target
                .file_name()
                .and_then(|name| name.to_str())
                .map(String::from),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "cannot resolve self link");
                None
            }
        }
    }
}

/// Asks a POSIX shell for the id of its parent, which is this process.
#[derive(Debug, Clone)]
pub struct ShellProbe {
    shell: PathBuf,
    command: String,
    timeout: Duration,
}

impl ShellProbe {
    pub fn new() -> Self {
        Self::with_command("/bin/sh", "echo $PPID")
    }

    /// Use a different shell and command (for testing).
    pub fn with_command(shell: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            command: command.into(),
            timeout: DEFAULT_SHELL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }
}

impl Default for ShellProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProbe for ShellProbe {
    fn source(&self) -> IdentitySource {
        IdentitySource::Shell
    }

    fn probe(&self) -> Option<String> {
        if !self.shell.exists() {
            tracing::debug!(shell = %self.shell.display(), "shell not found");
            return None;
        }

        let mut child = match Command::new(&self.shell)
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(shell = %self.shell.display(), error = %e, "cannot spawn shell");
                return None;
            }
        };

        let stdout = child.stdout.take()?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut line = String::new();
            let read = BufReader::new(stdout).read_line(&mut line);
            let _ = tx.send(read.map(|_| line));
        });

        let first_line = match rx.recv_timeout(self.timeout) {
            Ok(Ok(line)) => Some(line),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "cannot read shell output");
                None
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.timeout, "shell did not answer in time");
                let _ = child.kill();
                None
            }
        };
        let _ = child.wait();

        first_line
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    }
}

type NameProvider = Box<dyn Fn() -> Option<String> + Send + Sync>;

/// Extracts the id from a runtime name of the form `<pid>@<host>`.
pub struct RuntimeNameProbe {
    name: NameProvider,
}

impl RuntimeNameProbe {
    /// Probe the name this process reports for itself.
    pub fn new() -> Self {
        Self::with_name(|| Some(runtime_name()))
    }

    /// Use a different name provider (for testing).
    pub fn with_name<F>(name: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: Box::new(name),
        }
    }
}

impl Default for RuntimeNameProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuntimeNameProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeNameProbe").finish_non_exhaustive()
    }
}

impl IdentityProbe for RuntimeNameProbe {
    fn source(&self) -> IdentitySource {
        IdentitySource::RuntimeName
    }

    fn probe(&self) -> Option<String> {
        let name = (self.name)()?;
        match name.split_once('@') {
            Some((id, _host)) if !id.trim().is_empty() => Some(id.trim().to_string()),
            _ => {
                tracing::debug!(name = %name, "runtime name has no id prefix");
                None
            }
        }
    }
}

/// The name this process reports for itself: `<pid>@<host>`.
pub fn runtime_name() -> String {
    let host = ["COMPUTERNAME", "HOSTNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "localhost".to_string());
    format!("{}@{}", std::process::id(), host)
}

/// The numeric id of the current thread, as a string.
pub fn current_thread_id() -> String {
    // ThreadId only exposes its number through Debug: `ThreadId(7)`.
    let debug = format!("{:?}", thread::current().id());
    debug
        .strip_prefix("ThreadId(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(String::from)
        .unwrap_or(debug)
}

/// A resolved process identity and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentity {
    pub value: String,
    pub source: IdentitySource,
}

/// Resolves the process identity once and caches it.
///
/// # Example
///
/// ```
/// use envgate::process::{IdentitySource, ProcessIdentityResolver, RuntimeNameProbe};
///
/// let resolver = ProcessIdentityResolver::new(vec![Box::new(RuntimeNameProbe::with_name(
///     || Some("4242@build-host".to_string()),
/// ))]);
/// assert_eq!(resolver.get(), "4242");
/// assert_eq!(resolver.resolved().source, IdentitySource::RuntimeName);
/// ```
pub struct ProcessIdentityResolver {
    probes: Vec<Box<dyn IdentityProbe>>,
    resolved: OnceLock<ResolvedIdentity>,
}

impl ProcessIdentityResolver {
    /// Create a resolver trying `probes` in order before the thread id fallback.
    pub fn new(probes: Vec<Box<dyn IdentityProbe>>) -> Self {
        Self {
            probes,
            resolved: OnceLock::new(),
        }
    }

    /// The strategies appropriate for the current platform.
    pub fn platform_default() -> Self {
        let probes: Vec<Box<dyn IdentityProbe>> = if cfg!(unix) {
            vec![Box::new(ProcSelfProbe::new()), Box::new(ShellProbe::new())]
        } else {
            vec![Box::new(RuntimeNameProbe::new())]
        };
        Self::new(probes)
    }

    /// The process identity. Resolved on first call, cached afterwards.
    pub fn get(&self) -> &str {
        &self.resolved().value
    }

    /// The process identity with the strategy that produced it.
    pub fn resolved(&self) -> &ResolvedIdentity {
        self.resolved.get_or_init(|| self.resolve())
    }

    fn resolve(&self) -> ResolvedIdentity {
        for probe in &self.probes {
            let source = probe.source();
            match probe.probe() {
                Some(value) if !value.trim().is_empty() => {
                    tracing::debug!(%source, id = %value, "resolved process identity");
                    return ResolvedIdentity { value, source };
                }
                _ => tracing::debug!(%source, "identity strategy failed, trying next"),
            }
        }

        let value = current_thread_id();
        tracing::debug!(id = %value, "falling back to thread id for process identity");
        ResolvedIdentity {
            value,
            source: IdentitySource::ThreadId,
        }
    }
}

impl fmt::Debug for ProcessIdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessIdentityResolver")
            .field("probes", &self.probes.len())
            .field("resolved", &self.resolved.get())
            .finish()
    }
}

static PROCESS_IDENTITY: LazyLock<ProcessIdentityResolver> =
    LazyLock::new(ProcessIdentityResolver::platform_default);

/// The identity of the running process.
pub fn process_id() -> &'static str {
    &process_identity().value
}

/// The identity of the running process with the strategy that produced it.
pub fn process_identity() -> &'static ResolvedIdentity {
    PROCESS_IDENTITY.resolved()
}
