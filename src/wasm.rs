//! WASM bindings for sty2katex
//!
//! This module provides JavaScript-accessible functions that turn a
//! stylesheet into an object suitable for KaTeX's `macros` option.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{MacroMap, MacroParser, ParseOptions};

/// Parse options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMacrosOptions {
    /// Rewrite passes allowed before an expansion is reported as cyclic
    #[serde(default = "default_max_expansion_passes")]
    pub max_expansion_passes: usize,
    /// Largest template (in bytes) allowed during expansion
    #[serde(default = "default_max_template_len")]
    pub max_template_len: usize,
}

#[cfg(feature = "wasm")]
impl Default for ParseMacrosOptions {
    fn default() -> Self {
        Self {
            max_expansion_passes: default_max_expansion_passes(),
            max_template_len: default_max_template_len(),
        }
    }
}

#[cfg(feature = "wasm")]
fn default_max_expansion_passes() -> usize {
    ParseOptions::default().max_expansion_passes
}

#[cfg(feature = "wasm")]
fn default_max_template_len() -> usize {
    ParseOptions::default().max_template_len
}

/// Parse result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct ParseResult {
    /// The converted macro table
    pub macros: MacroMap,
    /// Whether parsing was successful
    pub success: bool,
    /// Error message if parsing failed
    pub error: Option<String>,
    /// Warnings during parsing
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Serialize maps as plain objects rather than `Map`
#[cfg(feature = "wasm")]
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Parse a stylesheet into a KaTeX macro object
///
/// # Arguments
/// * `source` - Stylesheet text
///
/// # Returns
/// Plain object mapping macro names to templates; throws on cyclic expansion
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "parseMacros")]
pub fn parse_macros_wasm(source: &str) -> Result<JsValue, JsValue> {
    let macros = crate::parse_macros(source).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&macros)
}

/// Parse a stylesheet with options, never throwing on parse failure
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "parseMacrosWithOptions")]
pub fn parse_macros_with_options_wasm(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let opts: ParseMacrosOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let parse_opts = ParseOptions::new()
        .with_max_expansion_passes(opts.max_expansion_passes)
        .with_max_template_len(opts.max_template_len);

    let result = match MacroParser::with_options(parse_opts).parse_with_diagnostics(source) {
        Ok(output) => ParseResult {
            macros: output.macros,
            success: true,
            error: None,
            warnings: output.warnings.iter().map(|w| w.to_string()).collect(),
        },
        Err(e) => ParseResult {
            macros: MacroMap::new(),
            success: false,
            error: Some(e.to_string()),
            warnings: vec![],
        },
    };

    to_js(&result)
}

/// Check a stylesheet for potential issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkStylesheet")]
pub fn check_stylesheet_wasm(source: &str) -> Result<JsValue, JsValue> {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_stylesheet(source);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.to_string()),
            DiagnosticLevel::Warning => warnings.push(d.to_string()),
            DiagnosticLevel::Info => infos.push(d.to_string()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    to_js(&summary)
}

/// Summary of stylesheet check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
