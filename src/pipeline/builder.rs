//! External build step for one sample application.
//!
//! The build is an opaque process: it runs in the application directory with its
//! output discarded, and only its exit status (or the lack of one before the
//! deadline) is observed.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Default build command, run in each application directory
pub const DEFAULT_BUILD_COMMAND: [&str; 3] = ["npm", "run", "build"];

/// Default upper bound on a single build
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(60);

/// How an application's build ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Exit status zero
    Succeeded,
    /// Non-zero exit (`code` is `None` when terminated by a signal)
    Failed {
        /// Process exit code
        code: Option<i32>,
    },
    /// Still running at the deadline; the process was killed
    TimedOut {
        /// The deadline that was exceeded
        timeout: Duration,
    },
    /// The command could not be started
    SpawnFailed {
        /// OS error message
        reason: String,
    },
}

impl BuildOutcome {
    /// Whether the build produced usable output
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "build succeeded"),
            Self::Failed { code: Some(code) } => write!(f, "build exited with code {}", code),
            Self::Failed { code: None } => write!(f, "build terminated by signal"),
            Self::TimedOut { timeout } => {
                write!(f, "build timed out after {}s", timeout.as_secs())
            }
            Self::SpawnFailed { reason } => write!(f, "build could not start: {}", reason),
        }
    }
}

/// Runs the configured build command for an application directory
pub struct AppBuilder<CE: CommandExecutor = RealCommandExecutor> {
    command: Vec<String>,
    timeout: Duration,
    executor: CE,
}

impl AppBuilder<RealCommandExecutor> {
    /// Create a builder that spawns real processes
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self::with_executor(command, timeout, RealCommandExecutor)
    }
}

impl Default for AppBuilder<RealCommandExecutor> {
    fn default() -> Self {
        Self::new(
            DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect(),
            DEFAULT_BUILD_TIMEOUT,
        )
    }
}

impl<CE: CommandExecutor> AppBuilder<CE> {
    /// Create a builder with a custom executor
    pub fn with_executor(command: Vec<String>, timeout: Duration, executor: CE) -> Self {
        Self {
            command,
            timeout,
            executor,
        }
    }

    /// Command line as a single display string
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Executor used to run the command
    pub fn executor(&self) -> &CE {
        &self.executor
    }

    /// Per-build deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the build in `app_dir` and classify the result. Never panics or errors.
    pub fn build(&self, app_dir: &Path) -> BuildOutcome {
        let Some((program, args)) = self.command.split_first() else {
            return BuildOutcome::SpawnFailed {
                reason: "empty build command".to_string(),
            };
        };

        let result = self.executor.run(
            |cmd| cmd.args(args).current_dir(app_dir),
            program,
            self.timeout,
        );

        let outcome = match result {
            Ok(Some(status)) if status.success() => BuildOutcome::Succeeded,
            Ok(Some(status)) => BuildOutcome::Failed {
                code: status.code(),
            },
            Ok(None) => BuildOutcome::TimedOut {
                timeout: self.timeout,
            },
            Err(e) => BuildOutcome::SpawnFailed {
                reason: e.to_string(),
            },
        };
        log::debug!("{} in {}: {}", self.command_line(), app_dir.display(), outcome);
        outcome
    }
}
