//! CLI binary for edgequake-html2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results. Conversion failures are printed
//! with manual alternatives; the process still exits 0.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_html2pdf::report::{failure_report, success_message};
use edgequake_html2pdf::{
    check_methods, convert, default_output_path, ConversionConfig, ConversionMethod,
    ConversionProgressCallback, ProgressCallback, DEFAULT_HTML_PATH, DEFAULT_PDF_PATH,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner that names the method currently being tried and logs skips.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.set_message("resolving input…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_method_start(&self, method: ConversionMethod) {
        let msg = match method {
            ConversionMethod::BrowserPrint => format!("trying {method} (waits for the browser)…"),
            _ => format!("trying {method}…"),
        };
        self.bar.set_message(msg);
    }

    fn on_method_skipped(&self, method: ConversionMethod, reason: &str) {
        self.bar
            .println(format!("  {} {:<18} {}", dim("–"), method.to_string(), dim(reason)));
    }

    fn on_method_complete(&self, method: ConversionMethod) {
        self.bar
            .println(format!("  {} {}", green("✓"), method));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert the default document
  html2pdf

  # Convert a file next to itself (page.pdf)
  html2pdf page.html

  # Choose the output path
  html2pdf page.html -o /tmp/page.pdf

  # Use weasyprint as the CLI tool and Chrome for the browser fallback
  html2pdf --tool weasyprint --browser "Google Chrome" page.html

  # Show which methods are available on this machine
  html2pdf --check

CONVERSION METHODS (tried in order):
  1. CLI tool       <tool> <input> <output>            default: wkhtmltopdf
  2. Library        headless Chrome print-to-PDF       needs Chrome/Chromium
  3. Browser print  open -a <browser>, sleep, osascript print   macOS only
                    (the PDF lands where the print dialog saves, usually ~/Downloads)

ENVIRONMENT VARIABLES:
  HTML2PDF_OUTPUT          Output path
  HTML2PDF_TOOL            CLI converter to probe for
  HTML2PDF_BROWSER         Desktop browser for the print fallback
  HTML2PDF_PRINT_DELAY     Seconds to wait before printing
  RUST_LOG                 Override log filter (e.g. edgequake_html2pdf=debug)
"#;

/// Convert HTML files to PDF with the first converter available.
#[derive(Parser, Debug)]
#[command(
    name = "html2pdf",
    version,
    about = "Convert HTML files to PDF with the first converter available",
    long_about = "Convert an HTML document to PDF by trying, in order, a command-line converter \
(wkhtmltopdf by default), headless Chrome, and finally the desktop browser's print command.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// HTML file to convert.
    #[arg(default_value = DEFAULT_HTML_PATH)]
    input: String,

    /// Write the PDF here. Default: next to the input.
    #[arg(short, long, env = "HTML2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Command-line converter to try first.
    #[arg(long, env = "HTML2PDF_TOOL", default_value = "wkhtmltopdf")]
    tool: String,

    /// Desktop browser used by the print fallback.
    #[arg(long, env = "HTML2PDF_BROWSER", default_value = "Safari")]
    browser: String,

    /// Seconds to let the browser load the page before printing (0–60).
    #[arg(long, env = "HTML2PDF_PRINT_DELAY", default_value_t = 3,
          value_parser = clap::value_parser!(u64).range(0..=60))]
    print_delay: u64,

    /// Render in landscape (headless Chrome only).
    #[arg(long, env = "HTML2PDF_LANDSCAPE")]
    landscape: bool,

    /// Skip CSS backgrounds (headless Chrome only).
    #[arg(long, env = "HTML2PDF_NO_BACKGROUND")]
    no_background: bool,

    /// Show which conversion methods are available, convert nothing.
    #[arg(long)]
    check: bool,

    /// Output structured JSON instead of text.
    #[arg(long, env = "HTML2PDF_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "HTML2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "HTML2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except the result.
    #[arg(short, long, env = "HTML2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.check;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli, show_progress).await {
        println!("{}", failure_report(&format!("{e:#}"), &cli.input));
    }

    Ok(())
}

async fn run(cli: &Cli, show_progress: bool) -> Result<()> {
    let progress = show_progress.then(CliProgressCallback::new);
    let config = build_config(cli, progress.clone().map(|p| p as ProgressCallback))?;

    // ── Check-only mode ──────────────────────────────────────────────────
    if cli.check {
        let methods = check_methods(&config).await.context("Failed to probe methods")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&methods).context("Failed to serialise methods")?
            );
        } else {
            for (i, m) in methods.iter().enumerate() {
                println!(
                    "{}. {} {:<18} {:<16} {}",
                    i + 1,
                    if m.available { green("✓") } else { red("✗") },
                    m.method.to_string(),
                    m.backend,
                    dim(&m.detail),
                );
            }
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let output_path = resolve_output(cli);
    let result = convert(&cli.input, &output_path, &config).await;
    if let Some(ref p) = progress {
        p.finish();
    }
    let outcome = result?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialise outcome")?
        );
        return Ok(());
    }

    println!("{}", success_message(&outcome));

    if !outcome.status_ok() {
        eprintln!(
            "{} {} exited with {:?}; check {} before relying on it",
            cyan("⚠"),
            outcome.backend,
            outcome.status.and_then(|s| s.code),
            outcome.pdf_path.display(),
        );
    }
    if !cli.quiet {
        if let Some(ref note) = outcome.note {
            eprintln!("   {}", dim(note));
        }
        eprintln!("   {}", dim(&format!("{}ms", outcome.duration_ms)));
    }

    Ok(())
}

/// Output path: explicit flag, else the fixed default for the fixed
/// default input, else next to the input.
fn resolve_output(cli: &Cli) -> PathBuf {
    match cli.output {
        Some(ref p) => p.clone(),
        None if cli.input == DEFAULT_HTML_PATH => PathBuf::from(DEFAULT_PDF_PATH),
        None => default_output_path(&cli.input),
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .cli_tool(&cli.tool)
        .browser_app(&cli.browser)
        .print_delay_secs(cli.print_delay)
        .landscape(cli.landscape)
        .print_background(!cli.no_background);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Failed to build configuration")
}
