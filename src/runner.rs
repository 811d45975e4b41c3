//! Process execution seam.
//!
//! Every external program the chain touches (the CLI converter, `which`, the
//! fallback script) goes through a [`CommandRunner`]. Production code uses
//! [`SystemRunner`]; tests inject a recording implementation via
//! [`crate::config::ConversionConfigBuilder::runner`].

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Exit status of an external program, detached from `std::process`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandStatus {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    /// Status of a process that exited with `code`.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs external programs on behalf of the conversion chain.
///
/// Implementations must be `Send + Sync`: the chain runs on a
/// `spawn_blocking` thread and the runner is shared through an `Arc`.
pub trait CommandRunner: Send + Sync {
    /// Resolve `program` on the search path. `Ok(None)` means "not installed".
    fn locate(&self, program: &str) -> io::Result<Option<PathBuf>>;

    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandStatus>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[cfg(not(windows))]
const LOCATOR: &str = "which";
#[cfg(windows)]
const LOCATOR: &str = "where";

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> io::Result<Option<PathBuf>> {
        let output = Command::new(LOCATOR)
            .arg(program)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            debug!("{} {}: not found", LOCATOR, program);
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(first_path(&stdout))
    }

    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandStatus> {
        debug!("Running {} {:?}", program.display(), args);
        let status = Command::new(program).args(args).status()?;
        Ok(status.into())
    }
}

/// First non-empty line of a locator's output.
fn first_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(PathBuf::from)
}
