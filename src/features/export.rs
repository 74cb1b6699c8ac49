//! Output formats for converted macro tables
//!
//! KaTeX takes macros as a plain object (`katex.render(tex, el, { macros })`),
//! so the table is written either as a JSON object or as an ES module whose
//! default export is that object. Key order follows the stylesheet.

use std::fmt;
use std::str::FromStr;

use crate::core::MacroMap;
use crate::utils::error::{ConversionError, ConversionResult};

/// Serialization target for a macro table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A JSON object
    #[default]
    Json,
    /// `export default { ... };`
    JsModule,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsModule => write!(f, "js"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "js" | "mjs" | "esm" => Ok(OutputFormat::JsModule),
            other => Err(ConversionError::invalid(format!(
                "unknown output format '{}'",
                other
            ))),
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::InvalidInput {
            message: err.to_string(),
        }
    }
}

/// Serialize as a JSON object
pub fn to_json(macros: &MacroMap, pretty: bool) -> ConversionResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(macros)?
    } else {
        serde_json::to_string(macros)?
    };
    Ok(json)
}

/// Serialize as an ES module with the table as default export
pub fn to_js_module(macros: &MacroMap, pretty: bool) -> ConversionResult<String> {
    Ok(format!("export default {};\n", to_json(macros, pretty)?))
}

/// Serialize in the requested format
pub fn export_macros(macros: &MacroMap, format: OutputFormat, pretty: bool) -> ConversionResult<String> {
    match format {
        OutputFormat::Json => to_json(macros, pretty),
        OutputFormat::JsModule => to_js_module(macros, pretty),
    }
}
