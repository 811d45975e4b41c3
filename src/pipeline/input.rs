//! Input handling: the HTML path handed to every conversion method.
//!
//! The path is passed through as given. Whether the file exists is left to
//! each method: the CLI tool, the renderer and the browser all report a
//! missing document in their own way, and the chain never skips a method
//! because of it.

use crate::error::Html2PdfError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accept `input` as the HTML path for the chain.
///
/// Only an empty or whitespace-only path is rejected, since no method could
/// be invoked with it.
pub fn resolve_input(input: &Path) -> Result<PathBuf, Html2PdfError> {
    if input.to_string_lossy().trim().is_empty() {
        return Err(Html2PdfError::InvalidInput {
            input: input.display().to_string(),
        });
    }
    debug!("HTML input: {}", input.display());
    Ok(input.to_path_buf())
}

/// Output path used when the caller gave none: a sibling `.pdf`.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension("pdf")
}
