//! Chain stages for HTML-to-PDF conversion.
//!
//! Each submodule implements one step, so each can be tested against a
//! fake [`crate::runner::CommandRunner`] without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ tool ──miss──▶ library ──unavailable──▶ fallback
//! ```
//!
//! 1. [`input`]   : accept the HTML path as given (no existence check)
//! 2. [`tool`]    : probe for and run the CLI converter
//! 3. [`library`] : render in-process with headless Chrome
//! 4. [`fallback`]: self-deleting print script for the desktop browser

pub mod fallback;
pub mod input;
pub mod library;
pub mod tool;
