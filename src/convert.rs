//! Conversion entry points: the attempt chain itself.
//!
//! The chain is strictly sequential and blocking. [`convert`] runs every
//! method on a single `spawn_blocking` thread because each of them blocks on
//! an external process or a browser.

use crate::config::ConversionConfig;
use crate::error::{Html2PdfError, RenderError};
use crate::output::{ConversionMethod, ConversionOutcome, MethodAvailability, MethodSkip};
use crate::pipeline::fallback::{self, DOWNLOADS_NOTE};
use crate::pipeline::library::{default_renderer, HtmlRenderer};
use crate::pipeline::input;
use crate::pipeline::tool::{self, ToolAttempt};
use crate::runner::{CommandRunner, SystemRunner};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Convert an HTML file to PDF using the first method that works.
///
/// Tries, in order: the CLI tool, the rendering library, the browser print
/// fallback.
///
/// # Errors
/// - the input path is empty
/// - the rendering library ran and failed
/// - the browser fallback could not run or reported failure
pub async fn convert(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutcome, Html2PdfError> {
    let html = input::resolve_input(input_path.as_ref())?;
    info!("Starting conversion: {}", html.display());

    let output = output_path.as_ref().to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || run_chain(&html, &output, &config))
        .await
        .map_err(|e| Html2PdfError::Internal(format!("Conversion task panicked: {}", e)))?
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutcome, Html2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Html2PdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_path, output_path, config))
}

/// Report which conversion methods could run on this machine.
///
/// Runs the same probes as the chain but converts nothing.
pub async fn check_methods(config: &ConversionConfig) -> Result<Vec<MethodAvailability>, Html2PdfError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || check_methods_blocking(&config))
        .await
        .map_err(|e| Html2PdfError::Internal(format!("Probe task panicked: {}", e)))
}

/// The attempt chain.
///
/// `html` is handed to each method unchecked; a missing file makes the
/// methods fail rather than being skipped.
pub fn run_chain(
    html: &Path,
    pdf: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutcome, Html2PdfError> {
    let start = Instant::now();
    let runner = resolve_runner(config);
    let renderer = resolve_renderer(config);
    let mut skipped: Vec<MethodSkip> = Vec::new();

    // ── Method 1: CLI tool ───────────────────────────────────────────────
    notify_start(config, ConversionMethod::CliTool);
    match tool::try_cli_tool(runner.as_ref(), &config.cli_tool, html, pdf) {
        ToolAttempt::Ran { program, status } => {
            debug!("{} finished with {:?}", program.display(), status);
            notify_complete(config, ConversionMethod::CliTool);
            return Ok(ConversionOutcome {
                method: ConversionMethod::CliTool,
                backend: config.cli_tool.clone(),
                pdf_path: pdf.to_path_buf(),
                status: Some(status),
                skipped,
                note: None,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }
        ToolAttempt::Unavailable { reason } => {
            skip(config, &mut skipped, ConversionMethod::CliTool, reason);
        }
    }

    // ── Method 2: rendering library ──────────────────────────────────────
    notify_start(config, ConversionMethod::RenderingLibrary);
    match renderer.render(html, pdf) {
        Ok(()) => {
            notify_complete(config, ConversionMethod::RenderingLibrary);
            return Ok(ConversionOutcome {
                method: ConversionMethod::RenderingLibrary,
                backend: renderer.name().to_string(),
                pdf_path: pdf.to_path_buf(),
                status: None,
                skipped,
                note: None,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }
        Err(RenderError::Unavailable { reason, .. }) => {
            skip(config, &mut skipped, ConversionMethod::RenderingLibrary, reason);
        }
        Err(e @ RenderError::Failed { .. }) => return Err(e.into()),
    }

    // ── Method 3: browser print fallback ─────────────────────────────────
    notify_start(config, ConversionMethod::BrowserPrint);
    let run = fallback::run_print_fallback(
        runner.as_ref(),
        &config.browser_app,
        html,
        config.print_delay_secs,
    )?;
    notify_complete(config, ConversionMethod::BrowserPrint);

    Ok(ConversionOutcome {
        method: ConversionMethod::BrowserPrint,
        backend: config.browser_app.clone(),
        pdf_path: pdf.to_path_buf(),
        status: Some(run.status),
        skipped,
        note: Some(DOWNLOADS_NOTE.to_string()),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn check_methods_blocking(config: &ConversionConfig) -> Vec<MethodAvailability> {
    let runner = resolve_runner(config);
    let renderer = resolve_renderer(config);

    let tool = match runner.locate(&config.cli_tool) {
        Ok(Some(p)) => (true, p.display().to_string()),
        Ok(None) => (false, "not found on PATH".to_string()),
        Err(e) => (false, format!("probe failed: {e}")),
    };

    let library = match renderer.probe() {
        Ok(detail) => (true, detail),
        Err(e) => (false, e.to_string()),
    };

    // The fallback needs `open` and `osascript`; the browser itself is
    // resolved by `open -a` at run time.
    let missing: Vec<&str> = ["open", "osascript"]
        .into_iter()
        .filter(|p| !matches!(runner.locate(p), Ok(Some(_))))
        .collect();
    let browser = if missing.is_empty() {
        (true, format!("open -a {} + osascript", config.browser_app))
    } else {
        (false, format!("missing {}", missing.join(", ")))
    };

    vec![
        MethodAvailability {
            method: ConversionMethod::CliTool,
            backend: config.cli_tool.clone(),
            available: tool.0,
            detail: tool.1,
        },
        MethodAvailability {
            method: ConversionMethod::RenderingLibrary,
            backend: renderer.name().to_string(),
            available: library.0,
            detail: library.1,
        },
        MethodAvailability {
            method: ConversionMethod::BrowserPrint,
            backend: config.browser_app.clone(),
            available: browser.0,
            detail: browser.1,
        },
    ]
}

fn resolve_runner(config: &ConversionConfig) -> Arc<dyn CommandRunner> {
    match config.runner {
        Some(ref r) => Arc::clone(r),
        None => Arc::new(SystemRunner),
    }
}

fn resolve_renderer(config: &ConversionConfig) -> Arc<dyn HtmlRenderer> {
    match config.renderer {
        Some(ref r) => Arc::clone(r),
        None => default_renderer(config),
    }
}

fn skip(
    config: &ConversionConfig,
    skipped: &mut Vec<MethodSkip>,
    method: ConversionMethod,
    reason: String,
) {
    debug!("Skipping {}: {}", method, reason);
    if let Some(ref cb) = config.progress_callback {
        cb.on_method_skipped(method, &reason);
    }
    skipped.push(MethodSkip { method, reason });
}

fn notify_start(config: &ConversionConfig, method: ConversionMethod) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_method_start(method);
    }
}

fn notify_complete(config: &ConversionConfig, method: ConversionMethod) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_method_complete(method);
    }
}

