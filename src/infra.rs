//! Infrastructure traits for abstracting I/O operations.
//!
//! This module provides trait abstractions for filesystem and command execution operations,
//! so the resolver and the orchestrator can be exercised without real builds.

use std::fs::{Metadata, ReadDir};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Poll interval while waiting on a child process with a deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Trait for abstracting filesystem operations.
///
/// This trait allows for dependency injection of filesystem operations,
/// making code more testable and allowing for alternative implementations
/// (e.g., in-memory build outputs in tests).
pub trait FileSystem {
    /// Read the entire contents of a file into a byte vector.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Read the contents of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<ReadDir>;

    /// Get metadata for a file or directory.
    fn metadata(&self, path: &Path) -> io::Result<Metadata>;

    /// Create a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    /// Whether `path` names an existing directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<ReadDir> {
        std::fs::read_dir(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        std::fs::metadata(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Trait for abstracting command execution.
///
/// External builds are the only blocking operation in a comparison run, so the
/// seam carries the deadline: implementations must return `Ok(None)` when the
/// command did not finish in time.
pub trait CommandExecutor {
    /// Run a command to completion or until `timeout` elapses.
    ///
    /// Returns `Ok(Some(status))` when the command exited, `Ok(None)` when it was
    /// still running at the deadline (and has been terminated), and `Err` when
    /// it could not be started.
    fn status_with_timeout(
        &self,
        cmd: &mut Command,
        timeout: Duration,
    ) -> io::Result<Option<ExitStatus>>;

    /// Execute a command built with a closure, bounded by `timeout`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_compare::infra::{CommandExecutor, RealCommandExecutor};
    /// use std::time::Duration;
    ///
    /// let executor = RealCommandExecutor;
    /// let status = executor.run(|cmd| {
    ///     cmd.arg("run").arg("build")
    /// }, "npm", Duration::from_secs(60))?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn run<F>(&self, builder: F, program: &str, timeout: Duration) -> io::Result<Option<ExitStatus>>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.status_with_timeout(&mut cmd, timeout)
    }
}

/// Real command executor that spawns the process and polls it against a deadline.
///
/// Output is discarded: the child inherits neither stdout nor stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn status_with_timeout(
        &self,
        cmd: &mut Command,
        timeout: Duration,
    ) -> io::Result<Option<ExitStatus>> {
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // A timeout too large to represent as an Instant means no deadline
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                // The process may exit between try_wait and kill
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes (like `Command::new("true")`) in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8) // Unix stores exit code in upper bits
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("main.js");

        let fs = RealFileSystem;
        fs.write(&file_path, b"export const a = 1;").unwrap();

        assert_eq!(fs.read(&file_path).unwrap(), b"export const a = 1;");
        assert_eq!(
            fs.read_to_string(&file_path).unwrap(),
            "export const a = 1;"
        );
    }

    #[test]
    fn test_is_file_and_is_dir_distinguish_entries() {
        let temp_dir = TempDir::new().unwrap();
        let fs = RealFileSystem;
        let dir = temp_dir.path().join("assets");
        fs.create_dir_all(&dir).unwrap();
        fs.write(&dir.join("a.js"), b"1").unwrap();

        assert!(fs.is_dir(&dir));
        assert!(!fs.is_file(&dir));
        assert!(fs.is_file(&dir.join("a.js")));
        assert!(!fs.is_file(&dir.join("missing.js")));
        assert!(!fs.is_dir(&dir.join("missing")));
    }

    #[test]
    fn test_real_filesystem_read_nonexistent_file_returns_error() {
        let fs = RealFileSystem;
        assert!(fs.read(Path::new("/nonexistent/file.js")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_real_command_executor_reports_exit_status() {
        let executor = RealCommandExecutor;

        let ok = executor
            .run(|cmd| cmd, "true", Duration::from_secs(5))
            .unwrap();
        assert!(ok.map(|s| s.success()).unwrap_or(false));

        let failed = executor
            .run(|cmd| cmd, "false", Duration::from_secs(5))
            .unwrap();
        assert!(matches!(failed, Some(status) if !status.success()));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_command_executor_times_out_long_running_command() {
        let executor = RealCommandExecutor;
        let start = Instant::now();

        let result = executor
            .run(|cmd| cmd.arg("5"), "sleep", Duration::from_millis(200))
            .unwrap();

        assert!(result.is_none(), "sleep 5 should hit the deadline");
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_command_executor_accepts_unrepresentable_timeout() {
        let executor = RealCommandExecutor;

        let status = executor
            .run(|cmd| cmd, "true", Duration::from_secs(u64::MAX))
            .unwrap();

        assert!(matches!(status, Some(status) if status.success()));
    }

    #[test]
    fn test_real_command_executor_nonexistent_command_returns_error() {
        let executor = RealCommandExecutor;
        let result = executor.run(
            |cmd| cmd,
            "nonexistent_command_xyz_123",
            Duration::from_secs(1),
        );
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_mock_exit_status_round_trips_code() {
        assert!(mock_exit_status(0).success());
        assert_eq!(mock_exit_status(2).code(), Some(2));
    }
}
