//! Result types returned by the conversion chain.

use crate::runner::CommandStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One of the three conversion methods, in the order the chain tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMethod {
    /// External command-line converter (e.g. `wkhtmltopdf`).
    CliTool,
    /// In-process rendering library (headless Chrome).
    RenderingLibrary,
    /// Desktop browser + OS print command, driven by a temporary script.
    BrowserPrint,
}

impl ConversionMethod {
    /// All methods in priority order.
    pub const ALL: [ConversionMethod; 3] = [
        ConversionMethod::CliTool,
        ConversionMethod::RenderingLibrary,
        ConversionMethod::BrowserPrint,
    ];
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConversionMethod::CliTool => "command-line tool",
            ConversionMethod::RenderingLibrary => "rendering library",
            ConversionMethod::BrowserPrint => "browser print",
        })
    }
}

/// A method the chain passed over, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSkip {
    pub method: ConversionMethod,
    pub reason: String,
}

/// What the chain did for a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// The method that handled the document.
    pub method: ConversionMethod,

    /// Human name of the program that ran: tool name, renderer name, or
    /// browser application.
    pub backend: String,

    /// The requested output path.
    ///
    /// For [`ConversionMethod::BrowserPrint`] the PDF usually lands in the
    /// browser's downloads folder instead; see [`Self::note`].
    pub pdf_path: PathBuf,

    /// Exit status of the external program, when one ran.
    ///
    /// A CLI tool's status is recorded but never causes fall-through, so a
    /// non-successful status here means the tool ran and probably wrote
    /// nothing.
    pub status: Option<CommandStatus>,

    /// Methods skipped before this one.
    pub skipped: Vec<MethodSkip>,

    /// Caveat about where the output actually ended up.
    pub note: Option<String>,

    /// Wall-clock time for the whole chain.
    pub duration_ms: u64,
}

impl ConversionOutcome {
    /// `false` when an external program reported failure.
    pub fn status_ok(&self) -> bool {
        self.status.map_or(true, |s| s.success())
    }
}

/// Whether a method could run on this machine, as reported by
/// [`crate::convert::check_methods`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAvailability {
    pub method: ConversionMethod,
    pub backend: String,
    pub available: bool,
    /// Resolved location or the reason the method is unavailable.
    pub detail: String,
}
