//! # edgequake-html2pdf
//!
//! Convert an HTML document to PDF with whatever converter this machine has.
//!
//! ## Why a chain?
//!
//! There is no single HTML-to-PDF converter that is installed everywhere.
//! This crate tries the options in order of fidelity and stops at the first
//! one that is present, so the same command works on a build server with
//! `wkhtmltopdf`, a laptop with only Chrome, or a bare Mac with Safari.
//!
//! ## Chain Overview
//!
//! ```text
//! HTML
//!  │
//!  ├─ 0. Input     local HTML path, passed through unchecked
//!  ├─ 1. CLI tool  `wkhtmltopdf in.html out.pdf` if it is on PATH
//!  ├─ 2. Library   headless Chrome print-to-PDF (feature `chrome`)
//!  └─ 3. Fallback  temp script: open in Safari, wait, OS print command
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_html2pdf::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let outcome = convert("page.html", "page.pdf", &config).await?;
//!     println!("converted with {} ({})", outcome.method, outcome.backend);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `html2pdf` binary (clap + anyhow + tracing-subscriber) |
//! | `chrome` | on      | Compiles in the headless Chrome renderer |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod runner;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_HTML_PATH, DEFAULT_PDF_PATH};
pub use convert::{check_methods, convert, convert_sync, run_chain};
pub use error::{Html2PdfError, RenderError};
pub use output::{ConversionMethod, ConversionOutcome, MethodAvailability, MethodSkip};
pub use pipeline::input::default_output_path;
pub use pipeline::library::{HtmlRenderer, UnavailableRenderer};
#[cfg(feature = "chrome")]
pub use pipeline::library::ChromeRenderer;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use runner::{CommandRunner, CommandStatus, SystemRunner};
