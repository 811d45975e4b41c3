//! User-facing messages printed by the CLI after a conversion.

use crate::output::{ConversionMethod, ConversionOutcome};
use std::fmt::Display;

/// Manual alternatives printed when every method failed.
pub const REMEDIATION_HINTS: [&str; 3] = [
    "Open the HTML file in a browser and use Print > Save as PDF",
    "Install pandoc: brew install pandoc",
    "Install wkhtmltopdf: brew install wkhtmltopdf",
];

/// One-line summary of a successful chain run.
pub fn success_message(outcome: &ConversionOutcome) -> String {
    match outcome.method {
        ConversionMethod::CliTool | ConversionMethod::RenderingLibrary => format!(
            "PDF created using {}: {}",
            outcome.backend,
            outcome.pdf_path.display()
        ),
        ConversionMethod::BrowserPrint => format!(
            "Attempted to print via {} - check your Downloads folder for the PDF",
            outcome.backend
        ),
    }
}

/// The full failure report: error, numbered alternatives, and the input
/// location so the user can finish the job by hand.
pub fn failure_report(error: &dyn Display, html: &str) -> String {
    let mut out = format!("All PDF conversion methods failed: {error}\n");
    out.push_str("\nAlternative solutions:\n");
    for (i, hint) in REMEDIATION_HINTS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, hint));
    }
    out.push_str(&format!("\nHTML file is available at: {html}\n"));
    out
}
