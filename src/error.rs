//! Error types for the edgequake-html2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Html2PdfError`] is **fatal**: the chain cannot produce a PDF (empty
//!   input path, render crashed, fallback script failed). Returned as
//!   `Err(Html2PdfError)` from the top-level `convert*` functions.
//!
//! * [`RenderError`] is the rendering library's own signal. `Unavailable`
//!   tells the chain to move on to the browser fallback; `Failed` is
//!   promoted to [`Html2PdfError::RenderFailed`] and ends the chain.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-html2pdf library.
#[derive(Debug, Error)]
pub enum Html2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input path is empty.
    #[error("Invalid input '{input}': expected the path of an HTML file")]
    InvalidInput { input: String },

    // ── Rendering library ─────────────────────────────────────────────────
    /// The rendering library was available but failed to produce a PDF.
    #[error("{renderer} failed to render the document: {detail}")]
    RenderFailed { renderer: String, detail: String },

    // ── Browser fallback ──────────────────────────────────────────────────
    /// The temporary print script could not be created.
    #[error("Failed to write fallback print script: {source}")]
    ScriptWriteFailed {
        #[source]
        source: std::io::Error,
    },

    /// The temporary print script could not be executed.
    #[error("Failed to run fallback print script '{path}': {source}")]
    ScriptLaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The print script ran but reported failure.
    #[error("Fallback print script exited with {}", describe_code(*code))]
    ScriptFailed { code: Option<i32> },

    /// The print script ran but could not be deleted afterwards.
    #[error("Failed to remove fallback print script '{path}': {source}")]
    ScriptCleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Outcome of a failed render attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The renderer cannot run on this machine; the chain moves on.
    #[error("{renderer} is unavailable: {reason}")]
    Unavailable { renderer: String, reason: String },

    /// The renderer ran and failed.
    #[error("{renderer} failed: {detail}")]
    Failed { renderer: String, detail: String },
}

impl From<RenderError> for Html2PdfError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Failed { renderer, detail } => {
                Html2PdfError::RenderFailed { renderer, detail }
            }
            RenderError::Unavailable { renderer, reason } => Html2PdfError::RenderFailed {
                renderer,
                detail: format!("unavailable: {reason}"),
            },
        }
    }
}
