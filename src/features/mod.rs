//! Feature modules - Consumer-facing output
//!
//! This module contains helpers for handing a converted macro table to a
//! renderer:
//! - JSON and ES module export

#[cfg(feature = "json")]
pub mod export;

#[cfg(feature = "json")]
pub use export::{export_macros, to_js_module, to_json, OutputFormat};
