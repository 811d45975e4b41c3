//! Method 1: an external command-line converter.
//!
//! The tool is called as `<tool> <input.html> <output.pdf>`, the calling
//! convention shared by `wkhtmltopdf` and `weasyprint`. Once the tool is
//! found it owns the conversion: its exit status is recorded and logged
//! but never sends the chain on to the next method.

use crate::runner::{CommandRunner, CommandStatus};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of trying the CLI tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAttempt {
    /// The tool was found and ran to completion.
    Ran {
        program: PathBuf,
        status: CommandStatus,
    },
    /// The tool is not installed, or could not be probed or started.
    Unavailable { reason: String },
}

/// Probe for `tool` and, if present, run it once on `html` → `pdf`.
pub fn try_cli_tool(
    runner: &dyn CommandRunner,
    tool: &str,
    html: &Path,
    pdf: &Path,
) -> ToolAttempt {
    let program = match runner.locate(tool) {
        Ok(Some(p)) => p,
        Ok(None) => {
            debug!("{} not found on PATH", tool);
            return ToolAttempt::Unavailable {
                reason: format!("{tool} not found on PATH"),
            };
        }
        Err(e) => {
            debug!("Probe for {} failed: {}", tool, e);
            return ToolAttempt::Unavailable {
                reason: format!("could not probe for {tool}: {e}"),
            };
        }
    };

    info!("Converting with {}", program.display());
    let args: Vec<OsString> = vec![html.as_os_str().to_owned(), pdf.as_os_str().to_owned()];

    match runner.run(&program, &args) {
        Ok(status) => {
            if !status.success() {
                warn!(
                    "{} exited with {:?}; {} may not have been written",
                    tool,
                    status.code,
                    pdf.display()
                );
            }
            ToolAttempt::Ran { program, status }
        }
        Err(e) => {
            warn!("Failed to start {}: {}", program.display(), e);
            ToolAttempt::Unavailable {
                reason: format!("failed to start {tool}: {e}"),
            }
        }
    }
}
