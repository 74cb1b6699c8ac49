//! # sty2katex
//!
//! Convert LaTeX macro stylesheets into macro tables for KaTeX.
//!
//! ## Features
//!
//! - **Optional Arguments**: `\newcommand{\x}[n][default]{...}` is collapsed
//!   to a fixed-arity macro, and bracketed calls inside other definitions are
//!   expanded to a fixed point
//! - **Math Operators**: `\DeclareMathOperator` becomes `\operatorname`
//! - **Ordered Output**: macros keep the order of the stylesheet
//! - **Diagnostics**: skipped lines, redefinitions and cycles are reported
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use sty2katex::parse_macros;
//!
//! let macros = parse_macros(r"
//!     \newcommand{\R}{\mathbb{R}}
//!     \newcommand{\norm}[2][2]{\|#2\|_{#1}}
//!     \newcommand{\dist}{\norm[\infty]{x - y}}
//!     \DeclareMathOperator*{\argmax}{arg\,max}
//! ").unwrap();
//!
//! assert_eq!(macros[r"\R"], r"\mathbb{R}");
//! assert_eq!(macros[r"\norm"], r"\|#1\|_{2}");
//! assert_eq!(macros[r"\dist"], r"\|x - y\|_{\infty}");
//! assert_eq!(macros[r"\argmax"], r"\operatorname*{arg\,max}");
//! ```

/// Core parsing modules
pub mod core;

/// Feature modules - output formats
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types
pub use crate::core::{
    DefinitionRewriter, LineOutcome, MacroMap, MacroOutput, MacroParser, OptionalArgIndex,
    OptionalArgMacro, ParseOptions,
};

// Re-export feature modules
#[cfg(feature = "json")]
pub use features::export;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ConversionError, ConversionResult, ConversionWarning};

/// Parse a stylesheet into a KaTeX macro table
///
/// # Arguments
/// * `source` - Stylesheet text, one definition per line
///
/// # Returns
/// Macro name to expansion template, in source order
pub fn parse_macros(source: &str) -> ConversionResult<MacroMap> {
    MacroParser::new().parse(source)
}

/// Parse a stylesheet with custom limits
pub fn parse_macros_with_options(
    source: &str,
    options: &ParseOptions,
) -> ConversionResult<MacroMap> {
    MacroParser::with_options(options.clone()).parse(source)
}

/// Parse a stylesheet and report skipped lines and redefinitions
pub fn parse_macros_with_diagnostics(source: &str) -> ConversionResult<MacroOutput> {
    MacroParser::new().parse_with_diagnostics(source)
}
