//! Method 2: an in-process rendering library.
//!
//! The bundled renderer drives headless Chrome through the `headless_chrome`
//! crate (cargo feature `chrome`). Building without the feature, or running
//! on a machine with no Chrome/Chromium, makes the renderer report
//! [`RenderError::Unavailable`] and the chain moves on to the browser
//! fallback, whether or not the input file exists. Once Chrome is known to
//! be present, any failure (including a missing input) is a real render
//! failure and ends the chain.

use crate::config::ConversionConfig;
use crate::error::RenderError;
use std::path::Path;
use std::sync::Arc;

/// A library that can render an HTML file straight to a PDF file.
pub trait HtmlRenderer: Send + Sync {
    /// Human-readable name used in messages ("headless Chrome").
    fn name(&self) -> &str;

    /// Cheap availability check that does not render anything.
    fn probe(&self) -> Result<String, RenderError>;

    /// Render `html` to `pdf`, overwriting it.
    fn render(&self, html: &Path, pdf: &Path) -> Result<(), RenderError>;
}

/// The renderer used when the config does not supply one.
pub fn default_renderer(config: &ConversionConfig) -> Arc<dyn HtmlRenderer> {
    #[cfg(feature = "chrome")]
    {
        Arc::new(chrome::ChromeRenderer::new(
            config.landscape,
            config.print_background,
        ))
    }
    #[cfg(not(feature = "chrome"))]
    {
        let _ = config;
        Arc::new(UnavailableRenderer)
    }
}

/// Renderer for builds without any rendering library compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRenderer;

impl HtmlRenderer for UnavailableRenderer {
    fn name(&self) -> &str {
        "rendering library"
    }

    fn probe(&self) -> Result<String, RenderError> {
        Err(self.unavailable())
    }

    fn render(&self, _html: &Path, _pdf: &Path) -> Result<(), RenderError> {
        Err(self.unavailable())
    }
}

impl UnavailableRenderer {
    fn unavailable(&self) -> RenderError {
        RenderError::Unavailable {
            renderer: self.name().to_string(),
            reason: "built without the `chrome` feature".to_string(),
        }
    }
}

#[cfg(feature = "chrome")]
pub use chrome::ChromeRenderer;

#[cfg(feature = "chrome")]
mod chrome {
    use super::HtmlRenderer;
    use crate::error::RenderError;
    use headless_chrome::types::PrintToPdfOptions;
    use headless_chrome::{Browser, LaunchOptions};
    use std::path::Path;
    use std::time::Instant;
    use tracing::{debug, info};
    use url::Url;

    const NAME: &str = "headless Chrome";

    /// Renders through headless Chrome's `Page.printToPDF`.
    #[derive(Debug, Clone)]
    pub struct ChromeRenderer {
        landscape: bool,
        print_background: bool,
    }

    impl ChromeRenderer {
        pub fn new(landscape: bool, print_background: bool) -> Self {
            Self {
                landscape,
                print_background,
            }
        }

        fn unavailable(reason: impl ToString) -> RenderError {
            RenderError::Unavailable {
                renderer: NAME.to_string(),
                reason: reason.to_string(),
            }
        }

        fn failed(detail: impl ToString) -> RenderError {
            RenderError::Failed {
                renderer: NAME.to_string(),
                detail: detail.to_string(),
            }
        }

        fn launch(&self) -> Result<Browser, RenderError> {
            let options = LaunchOptions::default_builder()
                .headless(true)
                // Chrome's sandbox cannot start inside most containers; only
                // local files are ever loaded.
                .sandbox(false)
                .build()
                .map_err(Self::unavailable)?;

            debug!("Launching headless Chrome");
            Browser::new(options).map_err(Self::unavailable)
        }

        fn print_options(&self) -> PrintToPdfOptions {
            PrintToPdfOptions {
                landscape: Some(self.landscape),
                display_header_footer: Some(false),
                print_background: Some(self.print_background),
                ..Default::default()
            }
        }
    }

    impl HtmlRenderer for ChromeRenderer {
        fn name(&self) -> &str {
            NAME
        }

        fn probe(&self) -> Result<String, RenderError> {
            headless_chrome::browser::default_executable()
                .map(|p| p.display().to_string())
                .map_err(Self::unavailable)
        }

        fn render(&self, html: &Path, pdf: &Path) -> Result<(), RenderError> {
            let start = Instant::now();
            self.probe()?;

            let absolute = std::fs::canonicalize(html).map_err(Self::failed)?;
            let url = Url::from_file_path(&absolute)
                .map_err(|_| Self::failed(format!("not a valid file URL: {}", absolute.display())))?;

            let browser = self.launch()?;
            let tab = browser.new_tab().map_err(Self::failed)?;

            tab.navigate_to(url.as_str())
                .map_err(Self::failed)?
                .wait_until_navigated()
                .map_err(Self::failed)?;

            let bytes = tab
                .print_to_pdf(Some(self.print_options()))
                .map_err(Self::failed)?;

            std::fs::write(pdf, &bytes)
                .map_err(|e| Self::failed(format!("writing {}: {e}", pdf.display())))?;

            info!(
                "Rendered {} bytes with headless Chrome in {:?}",
                bytes.len(),
                start.elapsed()
            );
            Ok(())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_renderer_never_renders() {
        let r = UnavailableRenderer;
        assert!(matches!(r.probe(), Err(RenderError::Unavailable { .. })));
        assert!(matches!(
            r.render(Path::new("a.html"), Path::new("a.pdf")),
            Err(RenderError::Unavailable { .. })
        ));
    }

    #[test]
    fn default_renderer_has_a_name() {
        let r = default_renderer(&ConversionConfig::default());
        assert!(!r.name().is_empty());
    }
}
