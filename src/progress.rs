//! Progress-callback trait for conversion-chain events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to hear
//! which method the chain is trying. The CLI uses it to drive a spinner,
//! which matters mostly during the browser fallback's fixed print delay.
//!
//! # Example
//!
//! ```rust
//! use edgequake_html2pdf::{ConversionConfig, ConversionMethod, ConversionProgressCallback};
//! use std::sync::Arc;
//!
//! struct Logger;
//!
//! impl ConversionProgressCallback for Logger {
//!     fn on_method_start(&self, method: ConversionMethod) {
//!         eprintln!("trying {method}");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(Logger) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ConversionMethod;
use std::sync::Arc;

/// Called by the chain as it moves through the conversion methods.
///
/// Events arrive from the blocking worker thread, hence `Send + Sync`.
/// All methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// The chain is about to try `method`.
    fn on_method_start(&self, method: ConversionMethod) {
        let _ = method;
    }

    /// `method` is unavailable; the chain moves on.
    fn on_method_skipped(&self, method: ConversionMethod, reason: &str) {
        let _ = (method, reason);
    }

    /// `method` handled the document and the chain stops.
    fn on_method_complete(&self, method: ConversionMethod) {
        let _ = method;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
