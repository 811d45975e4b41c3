//! Configuration types for HTML-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Input and output locations are not
//! part of the config; they are arguments to [`crate::convert::convert`].

use crate::error::Html2PdfError;
use crate::pipeline::library::HtmlRenderer;
use crate::progress::ProgressCallback;
use crate::runner::CommandRunner;
use std::fmt;
use std::sync::Arc;

/// Input document converted when the CLI is run without arguments.
pub const DEFAULT_HTML_PATH: &str = "/Users/matvey/Dev/MusicVisualizer/OPTIMIZATION_ROADMAP.html";

/// Output written when the CLI is run without arguments.
pub const DEFAULT_PDF_PATH: &str = "/Users/matvey/Dev/MusicVisualizer/OPTIMIZATION_ROADMAP.pdf";

/// Longest print delay accepted by the builder, in seconds.
pub const MAX_PRINT_DELAY_SECS: u64 = 60;

/// Configuration for an HTML-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_html2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .cli_tool("wkhtmltopdf")
///     .browser_app("Safari")
///     .print_delay_secs(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Command-line converter probed first. Called as `<tool> <input> <output>`.
    /// Default: `wkhtmltopdf`.
    pub cli_tool: String,

    /// Desktop browser the fallback opens the document in. Default: `Safari`.
    pub browser_app: String,

    /// Seconds the fallback script waits between opening the document and
    /// sending the print command. Default: 3.
    pub print_delay_secs: u64,

    /// Print CSS backgrounds when rendering with headless Chrome. Default: true.
    pub print_background: bool,

    /// Landscape orientation for headless Chrome. Default: false.
    pub landscape: bool,

    /// Process runner. `None` uses [`crate::runner::SystemRunner`].
    pub runner: Option<Arc<dyn CommandRunner>>,

    /// Rendering library. `None` uses [`crate::pipeline::library::default_renderer`].
    pub renderer: Option<Arc<dyn HtmlRenderer>>,

    /// Optional progress callback. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            cli_tool: "wkhtmltopdf".to_string(),
            browser_app: "Safari".to_string(),
            print_delay_secs: 3,
            print_background: true,
            landscape: false,
            runner: None,
            renderer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("cli_tool", &self.cli_tool)
            .field("browser_app", &self.browser_app)
            .field("print_delay_secs", &self.print_delay_secs)
            .field("print_background", &self.print_background)
            .field("landscape", &self.landscape)
            .field("runner", &self.runner.as_ref().map(|_| "<dyn CommandRunner>"))
            .field("renderer", &self.renderer.as_ref().map(|r| r.name().to_string()))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn cli_tool(mut self, tool: impl Into<String>) -> Self {
        self.config.cli_tool = tool.into();
        self
    }

    pub fn browser_app(mut self, app: impl Into<String>) -> Self {
        self.config.browser_app = app.into();
        self
    }

    pub fn print_delay_secs(mut self, secs: u64) -> Self {
        self.config.print_delay_secs = secs.min(MAX_PRINT_DELAY_SECS);
        self
    }

    pub fn print_background(mut self, v: bool) -> Self {
        self.config.print_background = v;
        self
    }

    pub fn landscape(mut self, v: bool) -> Self {
        self.config.landscape = v;
        self
    }

    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.config.runner = Some(runner);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn HtmlRenderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    /// Set a progress callback to receive per-method events.
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// The browser name is spliced into a shell script and an AppleScript
    /// string literal, so quotes are rejected outright.
    pub fn build(self) -> Result<ConversionConfig, Html2PdfError> {
        let c = &self.config;
        let tool = c.cli_tool.trim();
        if tool.is_empty() || tool.contains(char::is_whitespace) {
            return Err(Html2PdfError::InvalidConfig(format!(
                "CLI tool must be a single program name, got {:?}",
                c.cli_tool
            )));
        }
        let app = c.browser_app.trim();
        if app.is_empty() {
            return Err(Html2PdfError::InvalidConfig(
                "Browser application must not be empty".into(),
            ));
        }
        if app.contains(['"', '\'', '\\']) {
            return Err(Html2PdfError::InvalidConfig(format!(
                "Browser application must not contain quotes, got {:?}",
                c.browser_app
            )));
        }
        Ok(self.config)
    }
}
